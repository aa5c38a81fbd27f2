//! Storage backend selection.
//!
//! # Responsibility
//! - Resolve which backend and path a caller wants to use.
//! - Read the same settings from the process environment.
//!
//! # Invariants
//! - An explicit backend always wins over extension inference.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Path of the supplier store file.
pub const STORE_PATH_ENV: &str = "SUPPLIER_STORE_PATH";
/// Optional backend override (`json|yaml|sqlite`).
pub const STORE_BACKEND_ENV: &str = "SUPPLIER_STORE_BACKEND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
    UnknownBackend(String),
    /// Backend was not given and cannot be inferred from the path.
    UnrecognizedExtension(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "environment variable `{name}` is not set"),
            Self::UnknownBackend(value) => write!(
                f,
                "unknown storage backend `{value}`; expected json|yaml|sqlite"
            ),
            Self::UnrecognizedExtension(path) => write!(
                f,
                "cannot infer storage backend from `{}`; use .json, .yaml, .yml, .db, .sqlite or .sqlite3",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Storage engine behind a supplier repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Json,
    Yaml,
    Sqlite,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Sqlite => "sqlite",
        }
    }

    /// Infers the backend from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "db" | "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "sqlite" | "sqlite3" | "db" => Ok(Self::Sqlite),
            _ => Err(ConfigError::UnknownBackend(value.to_string())),
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how suppliers are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: BackendKind,
    pub path: PathBuf,
}

impl StorageConfig {
    pub fn new(backend: BackendKind, path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            path: path.into(),
        }
    }

    /// Builds a config whose backend is inferred from the path extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        match BackendKind::from_path(&path) {
            Some(backend) => Ok(Self { backend, path }),
            None => Err(ConfigError::UnrecognizedExtension(path)),
        }
    }

    /// Builds a config from an optional explicit backend name and a path.
    pub fn resolve(
        backend: Option<&str>,
        path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        match backend {
            Some(name) => Ok(Self::new(name.parse()?, path)),
            None => Self::from_path(path),
        }
    }

    /// Reads `SUPPLIER_STORE_PATH` and the optional `SUPPLIER_STORE_BACKEND`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StorageConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = lookup(STORE_PATH_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(STORE_PATH_ENV))?;
        let backend = lookup(STORE_BACKEND_ENV).filter(|value| !value.trim().is_empty());
        Self::resolve(backend.as_deref(), path.trim())
    }
}

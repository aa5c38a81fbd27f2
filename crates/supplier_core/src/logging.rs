//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Install the `flexi_logger` backend behind the `log` facade once per
//!   process, writing to stderr or to a rotating file directory.
//!
//! # Invariants
//! - Initialization is idempotent for an identical config.
//! - Re-initialization with a different config is rejected.
//! - Initialization never panics.
//! - Core log lines carry metadata only (ids, counts, field names), never
//!   supplier contact data.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "suppliers";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    config: LoggingConfig,
    _handle: LoggerHandle,
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Absolute directory holding rotating `suppliers*.log` files.
    Directory(PathBuf),
}

/// Normalized logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    target: LogTarget,
}

impl LoggingConfig {
    /// # Errors
    /// - `UnsupportedLevel` unless `level` is one of
    ///   `trace|debug|info|warn|error` (case-insensitive).
    /// - `InvalidLogDir` when a directory target is empty or relative.
    pub fn new(level: &str, target: LogTarget) -> Result<Self, LoggingError> {
        let level = normalize_level(level)?;
        let target = match target {
            LogTarget::Stderr => LogTarget::Stderr,
            LogTarget::Directory(dir) => LogTarget::Directory(normalize_log_dir(&dir)?),
        };
        Ok(Self { level, target })
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn target(&self) -> &LogTarget {
        &self.target
    }
}

#[derive(Debug)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidLogDir(String),
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Backend(FlexiLoggerError),
    /// Logging is already active with a different config.
    AlreadyInitialized {
        active: LoggingConfig,
        requested: LoggingConfig,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::InvalidLogDir(message) => write!(f, "invalid log directory: {message}"),
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create log directory `{}`: {source}",
                path.display()
            ),
            Self::Backend(err) => write!(f, "failed to start logger: {err}"),
            Self::AlreadyInitialized { active, requested } => write!(
                f,
                "logging already initialized as {active:?}; refusing to switch to {requested:?}"
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            Self::UnsupportedLevel(_)
            | Self::InvalidLogDir(_)
            | Self::AlreadyInitialized { .. } => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Installs the global logger described by `config`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let state = LOGGING_STATE.get_or_try_init(|| start_logger(config))?;
    if state.config != *config {
        return Err(LoggingError::AlreadyInitialized {
            active: state.config.clone(),
            requested: config.clone(),
        });
    }
    Ok(())
}

/// Returns the active logging config, or `None` before initialization.
pub fn logging_status() -> Option<LoggingConfig> {
    LOGGING_STATE.get().map(|state| state.config.clone())
}

/// Returns the default log level for the current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: &LoggingConfig) -> Result<LoggingState, LoggingError> {
    let logger = Logger::try_with_str(config.level)?;
    let logger = match &config.target {
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
    };
    let handle = logger.start()?;

    info!(
        "event=core_init module=logging status=ok level={} target={} version={}",
        config.level,
        target_label(&config.target),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        config: config.clone(),
        _handle: handle,
    })
}

fn target_label(target: &LogTarget) -> String {
    match target {
        LogTarget::Stderr => "stderr".to_string(),
        LogTarget::Directory(dir) => dir.display().to_string(),
    }
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(LoggingError::UnsupportedLevel(other.to_string())),
    }
}

fn normalize_log_dir(dir: &Path) -> Result<PathBuf, LoggingError> {
    if dir.as_os_str().is_empty() {
        return Err(LoggingError::InvalidLogDir("path is empty".to_string()));
    }
    if !dir.is_absolute() {
        return Err(LoggingError::InvalidLogDir(format!(
            "`{}` is not absolute",
            dir.display()
        )));
    }
    Ok(dir.to_path_buf())
}

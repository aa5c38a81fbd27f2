//! Supplier store command-line driver.
//!
//! # Responsibility
//! - Resolve a storage config, open the matching repository and call the
//!   public repository surface.
//! - Keep all supplier rules inside `supplier_core`.

use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use supplier_core::db::open_db;
use supplier_core::{
    init_logging, supplier_from_delimited, supplier_from_json, BackendKind, JsonFileStore,
    LogTarget, LoggingConfig, SqliteSupplierRepository, StorageConfig, StoreRepository,
    SupplierId, SupplierRepository, YamlFileStore,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "supplier_cli", version, about = "Inspect and edit a supplier store")]
struct Cli {
    /// Store file (.json, .yaml/.yml, .db/.sqlite/.sqlite3).
    #[arg(long, env = "SUPPLIER_STORE_PATH")]
    store: PathBuf,

    /// Backend override when the extension is not conclusive.
    #[arg(long, env = "SUPPLIER_STORE_BACKEND")]
    backend: Option<String>,

    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Write rotating log files here instead of stderr.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the number of stored suppliers.
    Count,
    /// Print one supplier.
    Get { id: i64 },
    /// Print summaries of page NUMBER (1-based) with SIZE entries per page.
    Page { size: u32, number: u32 },
    /// Print all suppliers ordered by city.
    SortByCity,
    /// Add one supplier given as a JSON object; its `id` is replaced.
    Add { json: String },
    /// Add every line of a delimited file (`id;name;contact;phone;email;city;address;tax_id`).
    Import {
        file: PathBuf,
        #[arg(long, default_value_t = ';')]
        delimiter: char,
    },
    /// Replace supplier ID with a JSON object.
    Replace { id: i64, json: String },
    /// Delete supplier ID.
    Delete { id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let target = match cli.log_dir {
        Some(dir) => LogTarget::Directory(dir),
        None => LogTarget::Stderr,
    };
    init_logging(&LoggingConfig::new(&cli.log_level, target)?)?;

    let config = StorageConfig::resolve(cli.backend.as_deref(), cli.store)?;
    info!(
        "event=cli_start module=cli status=ok backend={}",
        config.backend
    );

    match config.backend {
        BackendKind::Json => {
            let mut repo = StoreRepository::new(JsonFileStore::new(config.path));
            execute(&mut repo, cli.command)
        }
        BackendKind::Yaml => {
            let mut repo = StoreRepository::new(YamlFileStore::try_new(config.path)?);
            execute(&mut repo, cli.command)
        }
        BackendKind::Sqlite => {
            let mut conn = open_db(&config.path)?;
            let mut repo = SqliteSupplierRepository::try_new(&mut conn)?;
            execute(&mut repo, cli.command)
        }
    }
}

fn execute<R: SupplierRepository>(repo: &mut R, command: Command) -> CliResult<()> {
    match command {
        Command::Count => println!("{}", repo.count()?),
        Command::Get { id } => match repo.get_by_id(SupplierId::new(id)?)? {
            Some(supplier) => println!("{supplier}"),
            None => println!("supplier {id} not found"),
        },
        Command::Page { size, number } => {
            for summary in repo.get_page(size, number)? {
                println!("{summary}");
            }
        }
        Command::SortByCity => {
            for supplier in repo.sort_by_city()? {
                println!("{supplier}");
            }
        }
        Command::Add { json } => {
            let stored = repo.add(supplier_from_json(&json)?)?;
            println!("added {stored}");
        }
        Command::Import { file, delimiter } => {
            let text = std::fs::read_to_string(&file)?;
            let mut added = 0usize;
            for (index, line) in text.lines().enumerate() {
                if line.trim().is_empty() || line.trim_start().starts_with('#') {
                    continue;
                }
                let candidate = supplier_from_delimited(line, delimiter)
                    .map_err(|err| format!("line {}: {err}", index + 1))?;
                let stored = repo
                    .add(candidate)
                    .map_err(|err| format!("line {}: {err}", index + 1))?;
                println!("added {stored}");
                added += 1;
            }
            println!("imported {added} supplier(s)");
        }
        Command::Replace { id, json } => {
            let replaced = repo.replace_by_id(SupplierId::new(id)?, supplier_from_json(&json)?)?;
            if replaced {
                println!("replaced supplier {id}");
            } else {
                println!("supplier {id} not found");
            }
        }
        Command::Delete { id } => {
            if repo.delete_by_id(SupplierId::new(id)?)? {
                println!("deleted supplier {id}");
            } else {
                println!("supplier {id} not found");
            }
        }
    }
    Ok(())
}

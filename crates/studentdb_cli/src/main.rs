//! Interactive student management console.
//!
//! # Responsibility
//! - Parse startup flags, initialize logging and open the student store.
//! - Hand stdin/stdout to the menu loop.

mod menu;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io;
use std::path::PathBuf;
use studentdb_core::{
    default_log_level, init_logging, DbConfig, LogLevel, LoggingObserver,
    SqliteStudentRepository, StudentService,
};

#[derive(Debug, Parser)]
#[command(name = "studentdb", version, about = "Manage student records from a text menu")]
struct Cli {
    /// SQLite database file. An in-memory database is used when omitted.
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error. Only valid together with --log-dir.
    #[arg(long, value_name = "LEVEL", requires = "log_dir")]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.unwrap_or_else(default_log_level);
        init_logging(level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let config = cli
        .db
        .as_ref()
        .map(DbConfig::file)
        .unwrap_or_else(DbConfig::in_memory);
    let repo = SqliteStudentRepository::open(config).context("failed to open student database")?;
    let service = StudentService::new(repo).with_observer(LoggingObserver);
    info!("event=cli_start module=cli status=ok");

    menu::run(&service, io::stdin().lock(), io::stdout().lock())
        .context("console i/o failed")?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

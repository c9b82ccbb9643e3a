//! Media Organizer - photo and video organization tool
//!
//! Copies media files from a source tree into `YYYY/MM/MM-DD` folders
//! under a target directory, by capture date.

use anyhow::{Result, bail};
use chrono::Local;
use clap::Parser;
use media_organizer::{Cli, Config, LineRunner, Messages, output};
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", Config::sample_config());
        return Ok(());
    }

    let messages = match cli.lang {
        Some(language) => Messages::new(language),
        None => Messages::detect(),
    };

    let config = load_config(&cli)?;

    let exe_dir = get_executable_dir()?;
    let log_dir = exe_dir.join("Log");
    let _guard = setup_logging(&cli, &config, &log_dir)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Media Organizer starting");
    info!(?config, "Configuration loaded");

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        bail!(e);
    }

    let runner = LineRunner::new(config, messages, &log_dir)?;

    let cancel = runner.cancel_flag();
    ctrlc::set_handler(move || {
        output::print_blank();
        output::print_warning(messages.interrupted());
        cancel.cancel();
    })?;

    match runner.run() {
        Ok(stats) => {
            info!("{}", stats.summary());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Run aborted");
            std::process::exit(1);
        }
    }
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Resolve config path - `name` also matches `name.toml`
fn resolve_config_path(config_path: &Path) -> PathBuf {
    if config_path.exists() {
        return config_path.to_path_buf();
    }

    if config_path.extension().is_none() {
        let with_extension = config_path.with_extension("toml");
        if with_extension.exists() {
            return with_extension;
        }
    }

    config_path.to_path_buf()
}

/// Load configuration with precedence CLI > file > defaults
fn load_config(cli: &Cli) -> Result<Config> {
    let config_file = match cli.config {
        Some(ref path) => Some(resolve_config_path(path)),
        None => Config::find_config_file(),
    };

    let config = match config_file {
        Some(path) => {
            let file_config = Config::load_from_file(&path)?;
            cli.merge_with_config(file_config)
        }
        None => cli.to_config(),
    };

    Ok(config)
}

/// Diagnostic logging: file (plain or JSON) plus warnings on stderr
fn setup_logging(cli: &Cli, config: &Config, log_dir: &Path) -> Result<WorkerGuard> {
    let level: Level = config.log_level.into();

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    std::fs::create_dir_all(log_dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("CLIRun_{}.log", timestamp));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    // Each branch builds its own stderr layer; a layer is typed by the
    // subscriber stack beneath it
    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(LevelFilter::WARN),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_filter(LevelFilter::WARN),
            )
            .init();
    }

    Ok(guard)
}

mod platform;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use archiver_engine::EngineHandle;
use archiver_logging::{archiver_info, archiver_warn, LogDestination, DEFAULT_LOG_FILE};
use clap::Parser;

use platform::app::ConsoleApp;
use platform::config::{load_config, write_config, ClientConfig, CONFIG_FILENAME};

#[derive(Parser, Debug)]
#[command(name = "archiver", version, about = "Console client for the archiver backend")]
struct Cli {
    /// Path of the RON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend origin, e.g. http://127.0.0.1:1080.
    #[arg(long)]
    server: Option<String>,
    /// Log destination: file, terminal or both.
    #[arg(long)]
    log: Option<LogDestination>,
    /// Write the effective config to the config path and exit.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    let (mut config, config_error) = match load_config(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (ClientConfig::default(), Some(err)),
    };
    if let Some(server) = cli.server {
        config.server = server;
    }
    if let Some(log) = cli.log {
        config.log = log;
    }

    archiver_logging::initialize(
        config.log,
        config.level_filter(),
        &PathBuf::from(DEFAULT_LOG_FILE),
    );
    if let Some(err) = config_error {
        archiver_warn!("{}; using defaults", err);
        eprintln!("Warning: {err}; using defaults");
    }

    if cli.init_config {
        write_config(&config_path, &config)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    archiver_info!("starting console client against {}", config.server);
    let engine = EngineHandle::new(&config.client_settings())
        .with_context(|| format!("cannot talk to {}", config.server))?;

    let stdin = io::stdin();
    let mut app = ConsoleApp::new(engine, config.server.clone(), stdin.lock(), io::stdout());
    app.run().context("console i/o failed")?;
    Ok(())
}

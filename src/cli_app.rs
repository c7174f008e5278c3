//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use edx52_display::cargo::NameLookupTable;
use edx52_display::core::config::{Config, LOG_LEVELS};
use edx52_display::core::errors::EdxError;
use edx52_display::daemon::service::{DisplayService, ServiceDeps, ServiceOptions};
use edx52_display::daemon::signals::SignalHandler;
use edx52_display::display::{DisplayDevice, JsonFileDevice, TextDevice};
use edx52_display::logger;
use edx52_display::sysinfo::{EdsmClient, SystemInfoService};

/// How often the run loop checks for signals.
const SIGNAL_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// EDx52 display: Elite Dangerous journal data on the X52 Pro MFD.
#[derive(Debug, Parser)]
#[command(
    name = "edx52d",
    author,
    version,
    about = "Elite Dangerous journal tailer for the X52 Pro MFD",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the configured log level.
    #[arg(long, global = true, value_name = "LEVEL", value_parser = LOG_LEVELS)]
    log: Option<String>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Tail the journal and keep the MFD document updated until interrupted.
    Run,
    /// Run one update cycle and print the pages to stdout.
    Render(RenderArgs),
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Debug, Clone, Args, Default)]
struct RenderArgs {
    /// Read this journal folder instead of the configured one.
    #[arg(long, value_name = "PATH")]
    journal_dir: Option<PathBuf>,
}

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Library failure, already carrying its EDX code.
    #[error(transparent)]
    Core(#[from] EdxError),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log {
        config.logging.level.clone_from(level);
    }

    match &cli.command {
        Command::Run => run_service(&config),
        Command::Render(args) => run_render(&config, args),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load_names(config: &Config) -> Result<Arc<NameLookupTable>, CliError> {
    let names = NameLookupTable::load(
        &config.names.commodity_path(),
        &config.names.rare_commodity_path(),
    )?;
    Ok(Arc::new(names))
}

fn edsm_client(config: &Config) -> Arc<dyn SystemInfoService> {
    Arc::new(EdsmClient::new(&config.edsm.base_url, config.edsm.timeout_secs))
}

fn run_service(config: &Config) -> Result<(), CliError> {
    logger::init(&config.logging.level, config.logging.file_path().as_deref())?;
    let options = ServiceOptions::from_config(config);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config_hash = %config.stable_hash().unwrap_or_default(),
        journal = %options.journal_folder.display(),
        "starting"
    );

    let names = load_names(config)?;
    let device: Arc<dyn DisplayDevice> = Arc::new(JsonFileDevice::open(config.display.output_path())?);
    let deps = ServiceDeps {
        names,
        sysinfo: edsm_client(config),
        device,
    };
    let handle = DisplayService::new(options, deps)?.spawn(config.journal.refresh_interval())?;

    let signals = SignalHandler::new();
    while !signals.should_shutdown() {
        if signals.should_refresh() {
            info!("SIGHUP received");
            handle.refresh();
        }
        thread::sleep(SIGNAL_POLL_INTERVAL);
    }
    info!("shutdown requested");
    handle.stop()?;
    Ok(())
}

fn run_render(config: &Config, args: &RenderArgs) -> Result<(), CliError> {
    logger::init(&config.logging.level, config.logging.file_path().as_deref())?;
    let mut options = ServiceOptions::from_config(config);
    if let Some(dir) = &args.journal_dir {
        options.journal_folder.clone_from(dir);
    }
    options.splash_duration = Duration::ZERO;

    let deps = ServiceDeps {
        names: load_names(config)?,
        sysinfo: edsm_client(config),
        device: Arc::new(TextDevice::new(io::stdout())),
    };
    DisplayService::new(options, deps)?.run_cycle()?;
    Ok(())
}

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pipeviz::playback::{PlaybackController, RunOutcome};
use pipeviz::simulation::{FileBackend, HttpBackend, SimulationBackend};
use pipeviz::ui::terminal_guard::install_panic_hook;
use pipeviz::ui::{App, ConsoleSlots};
use pipeviz::{util, Config};

/// Replay a simulated parent/child pipe exchange in the terminal.
#[derive(Debug, Parser)]
#[command(name = "pipeviz", version, about)]
struct Cli {
    /// Config file (default: <data-dir>/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory for config and logs (default: ~/.pipeviz)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Simulation endpoint to POST requests to
    #[arg(long)]
    endpoint: Option<String>,

    /// Replay a saved simulation response instead of calling the backend
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Message the parent sends
    #[arg(long)]
    message: Option<String>,

    /// Auth token presented when the IPC connection is set up
    #[arg(long)]
    auth_token: Option<String>,

    /// Send the message in plain text
    #[arg(long)]
    no_encryption: bool,

    /// Encryption key
    #[arg(long)]
    key: Option<String>,

    /// Pause after each step, in milliseconds
    #[arg(long)]
    pause_ms: Option<u64>,

    /// Delay per pipe animation frame, in milliseconds
    #[arg(long)]
    frame_delay_ms: Option<u64>,

    /// Play back once, printing to stdout instead of the terminal UI
    #[arg(long)]
    headless: bool,

    /// Start a playback as soon as the terminal UI opens
    #[arg(long)]
    autorun: bool,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(endpoint) = &self.endpoint {
            config.backend.endpoint = endpoint.clone();
        }
        if let Some(message) = &self.message {
            config.request.message = message.clone();
        }
        if let Some(token) = &self.auth_token {
            config.request.auth_token = token.clone();
        }
        if self.no_encryption {
            config.request.use_encryption = false;
        }
        if let Some(key) = &self.key {
            config.request.enc_key = key.clone();
        }
        if let Some(pause_ms) = self.pause_ms {
            config.playback.inter_step_pause_ms = pause_ms;
        }
        if let Some(frame_delay_ms) = self.frame_delay_ms {
            config.playback.frame_delay_ms = frame_delay_ms;
        }
        config
    }

    fn backend(&self, config: &Config) -> Arc<dyn SimulationBackend> {
        match &self.replay {
            Some(path) => Arc::new(FileBackend::new(path)),
            None => Arc::new(HttpBackend::new(
                config.backend.endpoint.clone(),
                config.backend.timeout,
            )),
        }
    }
}

fn init_logging() -> Result<()> {
    // Log to file (~/.pipeviz/logs/pipeviz.log) so the terminal UI stays clean
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    Ok(())
}

async fn run_headless(config: Config, backend: Arc<dyn SimulationBackend>) -> Result<ExitCode> {
    let slots = Arc::new(ConsoleSlots::new(std::io::stdout()));
    let controller = PlaybackController::new(backend, slots, config.playback);

    match controller.run(config.request).await {
        Ok(RunOutcome::Completed) => Ok(ExitCode::SUCCESS),
        Ok(outcome) => {
            tracing::warn!(?outcome, "Headless playback did not complete");
            Ok(ExitCode::FAILURE)
        }
        // Already printed by the console slots
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    util::init_data_dir(cli.data_dir.clone());
    init_logging()?;

    let config = match &cli.config {
        Some(path) => Config::try_load_from(path)?,
        None => Config::load(),
    };
    let config = cli.apply(config);
    config
        .playback
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid playback settings: {e}"))?;

    let backend = cli.backend(&config);
    tracing::info!(backend = %backend.name(), headless = cli.headless, "Starting pipeviz");

    if cli.headless {
        return run_headless(config, backend).await;
    }

    install_panic_hook();
    let mut app = App::new(config, backend);
    app.run(cli.autorun).await?;
    Ok(ExitCode::SUCCESS)
}

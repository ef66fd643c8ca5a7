//! camera-console: terminal front end for the remote camera controller.
//!
//! ## Subcommands
//!
//! - `watch`: live view, reads toggle/refresh/duration commands from stdin
//! - `status`: fetch and print the latest snapshot once
//! - `on` / `off`: send a single camera command

mod logging;
mod oneshot;
mod terminal;
mod watch;

use std::path::PathBuf;

use camera_ui::{load_config, UiConfig, UiError};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "camera-console")]
#[command(about = "Remote camera viewer and switch")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $CAMERA_UI_CONFIG or ~/.camera-ui/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Camera server base URL, overrides the config file
    #[arg(long, global = true, value_name = "URL")]
    server: Option<String>,

    /// Also write daily-rotated logs into this directory
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the server and render updates until quit
    Watch,

    /// Print the latest image snapshot
    Status {
        /// Print the raw snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Turn the camera on for a number of seconds
    On {
        /// Capture duration in seconds (defaults to the configured value)
        #[arg(long, value_name = "SECS")]
        time: Option<String>,
    },

    /// Turn the camera off
    Off,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Ui(#[from] UiError),

    #[error("Server rejected the command: {0}")]
    Rejected(String),

    #[error("Failed to encode snapshot: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Failed to start stdin reader: {0}")]
    Stdin(#[source] std::io::Error),
}

fn resolve_config(cli: &Cli) -> Result<UiConfig, CommandError> {
    let config = load_config(cli.config.clone())?;
    let config = match &cli.server {
        Some(url) => config.with_server_url(url.clone()),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    let _logging_guard = logging::init(cli.log_dir.as_deref());

    let result = resolve_config(&cli).and_then(|config| match &cli.command {
        Commands::Watch => watch::run(config),
        Commands::Status { json } => oneshot::status(&config, *json),
        Commands::On { time } => oneshot::turn_on(&config, time.as_deref()),
        Commands::Off => oneshot::turn_off(&config),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "camera-console failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

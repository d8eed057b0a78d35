//! pkgweb - transient operation states for package daemon front ends
//!
//! This is the main CLI application. It loads configuration, wires the
//! operations context to a package daemon client and renders results.

mod cli;
mod display;
mod error;
mod logging;
mod scenario;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::scenario::Scenario;
use clap::Parser;
use pkgweb_config::{Config, GeneralConfig};
use pkgweb_events::EventReceiver;
use pkgweb_ops::{OperationResult, OpsContextBuilder};
use std::future::Future;
use std::process;
use tokio::select;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    // Config carries the log level; it loads before tracing is up.
    let config = match load_config(&cli.global).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    init_tracing(&config.general, json_mode);

    if let Err(e) = run(cli, config).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Load configuration with file < environment < CLI flag precedence
async fn load_config(global: &GlobalArgs) -> Result<Config, CliError> {
    let mut config = Config::load_or_default(global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, global);
    Ok(config)
}

fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if global.debug {
        config.general.log_level = "debug".to_string();
    }
}

/// Main application logic
async fn run(cli: Cli, mut config: Config) -> Result<(), CliError> {
    info!("Starting pkgweb v{}", env!("CARGO_PKG_VERSION"));
    let renderer = OutputRenderer::new(cli.global.json);

    match cli.command {
        Commands::Config => {
            let toml = config.to_toml()?;
            print!("{toml}");
        }

        Commands::Replay { scenario } => {
            let scenario = Scenario::load(&scenario).await?;
            if let Some(duration_ms) = scenario.tracker_duration_ms {
                config.tracker.duration_ms = duration_ms;
                config.validate()?;
            }

            let (event_sender, event_receiver) = pkgweb_events::channel();
            let client = scenario.client();
            let poll_interval = config.client.poll_interval();
            let ctx = OpsContextBuilder::new()
                .with_client(client.clone())
                .with_event_sender(event_sender)
                .with_config(config)
                .build()?;

            let results = with_event_logging(
                scenario::replay(&ctx, &client, &scenario.steps, poll_interval),
                event_receiver,
            )
            .await?;

            for result in &results {
                renderer.render_result(result)?;
            }
        }
    }

    info!("Command completed successfully");
    Ok(())
}

/// Drive `command` while forwarding emitted events to tracing
async fn with_event_logging<F>(
    command: F,
    mut event_receiver: EventReceiver,
) -> Result<Vec<OperationResult>, CliError>
where
    F: Future<Output = Result<Vec<OperationResult>, pkgweb_errors::Error>>,
{
    let mut command_future = Box::pin(command);

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(message) = event_receiver.try_recv() {
                    logging::log_event_with_tracing(&message);
                }
                return result.map_err(CliError::from);
            }

            message = event_receiver.recv() => {
                match message {
                    Some(message) => logging::log_event_with_tracing(&message),
                    None => { /* Channel closed: keep waiting for command to finish */ }
                }
            }
        }
    }
}

fn init_tracing(general: &GeneralConfig, json_mode: bool) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &general.log_level;
        EnvFilter::new(format!(
            "warn,pkgweb={level},pkgweb_ops={level},pkgweb_tracker={level},pkgweb_client={level}"
        ))
    });

    // Logs always go to stderr so stdout carries only results
    if json_mode || general.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

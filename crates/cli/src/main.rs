use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pickport_core::{
    load_config, load_config_from_env, validate_config, Agent, SanitizedConfig,
};

/// Resolve cloud-storage pickcodes into download tickets and HLS manifests.
#[derive(Debug, Parser)]
#[command(name = "pickport", version)]
struct Cli {
    /// Config file (default: $PICKPORT_CONFIG, then ./pickport.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a download ticket and print it as a curl command
    Ticket {
        pickcode: String,
        /// Print the ticket as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Write the HLS manifest of a video (stdout by default)
    Hls {
        pickcode: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration with the credential redacted
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr so stdout stays clean for tickets and manifests
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var("PICKPORT_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("pickport.toml"));

    let config = if config_path.exists() {
        debug!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config at {:?}, using defaults and environment", config_path);
        load_config_from_env().context("Failed to load config from environment")?
    };
    validate_config(&config).context("Configuration validation failed")?;

    match cli.command {
        Command::Config => {
            let sanitized = SanitizedConfig::from(&config);
            println!("{}", serde_json::to_string_pretty(&sanitized)?);
        }
        Command::Ticket { pickcode, json } => {
            let agent = Agent::from_config(&config).context("Failed to create agent")?;
            let ticket = agent
                .create_download_ticket(&pickcode)
                .await
                .with_context(|| format!("Failed to create download ticket for {}", pickcode))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                let mut cmd = format!("curl {}", shell_quote(&ticket.url));
                for line in ticket.header_lines() {
                    cmd.push_str(&format!(" -H {}", shell_quote(&line)));
                }
                cmd.push_str(&format!(" -o {}", shell_quote(&ticket.file_name)));
                println!("{}", cmd);
            }
        }
        Command::Hls { pickcode, output } => {
            let agent = Agent::from_config(&config).context("Failed to create agent")?;
            let content = agent
                .video_hls_content(&pickcode)
                .await
                .with_context(|| format!("Failed to get HLS content for {}", pickcode))?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    info!("Wrote {} bytes to {:?}", content.len(), path);
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&content)?;
                    stdout.flush()?;
                }
            }
        }
    }

    Ok(())
}

/// Single-quote a value for POSIX shells.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

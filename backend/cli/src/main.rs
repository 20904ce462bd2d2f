mod config;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use tracing::info;

use plantguard_core::{Session, ViewState};
use plantguard_gateway::{start_server, AppState};
use plantguard_inference::{DiagnosisPipeline, GeminiProvider};
use plantguard_report::render_report_text;

use config::Config;

#[derive(Parser)]
#[command(name = "plantguard")]
#[command(about = "PlantGuard — AI plant disease identifier")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the diagnosis page and JSON API
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Diagnose a single plant photo from the terminal
    Diagnose {
        /// Path to the image file
        image: PathBuf,
    },
    /// Show whether a local server is up
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Diagnose { image } => {
            diagnose_file(&config, &image).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("PlantGuard is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

fn build_pipeline(config: &Config) -> Result<DiagnosisPipeline> {
    let api_key = config
        .api_key
        .clone()
        .context("PLANTGUARD_API_KEY is not set")?;
    let mut provider = GeminiProvider::new(api_key, config.model.clone());
    if let Some(url) = &config.api_base_url {
        provider = provider.with_base_url(url.clone());
    }
    Ok(DiagnosisPipeline::new(Arc::new(provider)))
}

async fn run_server(config: Config) -> Result<()> {
    info!(port = config.port, bind = %config.bind_address, model = %config.model,
        "Starting PlantGuard gateway");

    let pipeline = build_pipeline(&config)?;
    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .context("invalid bind address")?;

    start_server(addr, Arc::new(AppState::new(pipeline))).await
}

/// One-shot diagnosis: same upload → analyze lifecycle the page goes
/// through, printed as a plain-text report.
async fn diagnose_file(config: &Config, path: &Path) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");

    let mut session = Session::new();
    plantguard_media::submit_file(&mut session, filename, None, Bytes::from(bytes))?;

    let image = session.begin_analysis()?;
    let outcome = pipeline.analyze(&image).await;
    session.finish(outcome)?;

    match session.state() {
        ViewState::Result { record, .. } => print!("{}", render_report_text(record)),
        ViewState::Error { message, .. } => bail!("{message}"),
        other => bail!("unexpected state: {}", other.name()),
    }
    Ok(())
}

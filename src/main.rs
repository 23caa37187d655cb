//! Horizon uncertainty viewer
//!
//! Depth cross-sections through wells, surfaces, and surface uncertainty
//! envelopes for a depth-conversion model directory.
//!
//! # Usage
//!
//! ```bash
//! # Serve the viewer API for a model directory
//! horizon-uncertainty --basedir /project/drogon/hum serve
//!
//! # Write the cross-section figure along one well
//! horizon-uncertainty --basedir /project/drogon/hum section --well OP_1 --out op1.json
//!
//! # Show what a model directory contains
//! horizon-uncertainty --basedir /project/drogon/hum model
//! ```
//!
//! # Environment Variables
//!
//! - `HORIZON_CONFIG`: Path to the TOML config file
//! - `HORIZON_SERVER_ADDR`: Bind address override
//! - `HORIZON_CORS_ORIGINS`: Comma-separated allowed origins
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use horizon_uncertainty::api::{create_app, ViewerState};
use horizon_uncertainty::config::{ViewerConfig, CONFIG_ENV};
use horizon_uncertainty::model::{ModelLayout, ModelSummary};
use horizon_uncertainty::plot::make_figure;
use horizon_uncertainty::viewer::{FileSource, Session, SessionSettings, ViewerEvent, ViewerSetup};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "horizon-uncertainty")]
#[command(about = "Depth cross-sections with surface uncertainty envelopes")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Model directory (overrides `[model] basedir`)
    #[arg(short, long)]
    basedir: Option<PathBuf>,

    /// Override the server address (default: "127.0.0.1:8050")
    #[arg(short, long)]
    addr: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the viewer API (default)
    Serve,

    /// Write the cross-section figure along a well as JSON
    Section {
        /// Well name (file stem of the well file)
        #[arg(long)]
        well: String,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print a summary of the model directory
    Model,
}

// ============================================================================
// Setup
// ============================================================================

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ViewerConfig> {
    match path {
        Some(p) => ViewerConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(ViewerConfig::load()),
    }
}

fn build_session(config: &ViewerConfig, layout: &ModelLayout) -> Result<Session> {
    let setup = ViewerSetup::from_model(
        layout,
        &config.display.colors,
        Some(config.display.zunit.clone()),
    )
    .with_context(|| format!("Failed to set up viewer from {}", layout.basedir().display()))?;

    Ok(Session::new(
        setup,
        SessionSettings::from_config(config),
        Arc::new(FileSource),
    ))
}

// ============================================================================
// Subcommands
// ============================================================================

async fn run_serve(config: &ViewerConfig, layout: &ModelLayout, addr: String) -> Result<()> {
    let summary = ModelSummary::collect(layout)
        .with_context(|| format!("Failed to read model {}", layout.basedir().display()))?;
    let mut session = build_session(config, layout)?;

    match session.initialize() {
        Ok(section) => info!(
            surfaces = section.surfaces.len(),
            well = section.well.as_ref().map_or("-", |w| w.name.as_str()),
            "Initial cross-section ready"
        ),
        Err(e) => warn!(error = %e, "No initial cross-section"),
    }

    let app = create_app(ViewerState::new(session, Some(summary)));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!(addr = %addr, "HTTP server listening");

    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown");
        shutdown_token.cancel();
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await;

    match result {
        Ok(()) => {
            info!("Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "HTTP server error");
            Err(anyhow::anyhow!("HTTP server error: {e}"))
        }
    }
}

fn run_section(
    config: &ViewerConfig,
    layout: &ModelLayout,
    well: String,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut session = build_session(config, layout)?;
    let zunit = session.setup().zunit().to_string();
    let section = session
        .handle(ViewerEvent::WellSelected { well: well.clone() })
        .with_context(|| format!("Failed to build cross-section along {well}"))?;
    let figure = make_figure(section, &zunit);
    let json = serde_json::to_string_pretty(&figure)?;

    match out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), well = %well, "Cross-section written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_model(layout: &ModelLayout) -> Result<()> {
    let summary = ModelSummary::collect(layout)
        .with_context(|| format!("Failed to read model {}", layout.basedir().display()))?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let config = load_config(args.config.as_ref())?;
    let basedir = args.basedir.unwrap_or_else(|| config.model.basedir.clone());
    let layout = ModelLayout::new(basedir);

    match args.command.unwrap_or(SubCommand::Serve) {
        SubCommand::Serve => {
            let addr = args.addr.unwrap_or_else(|| config.server_addr());
            run_serve(&config, &layout, addr).await
        }
        SubCommand::Section { well, out } => run_section(&config, &layout, well, out),
        SubCommand::Model => run_model(&layout),
    }
}

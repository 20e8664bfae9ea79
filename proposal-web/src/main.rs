//! Proposal web server entry point.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use proposal_generator::config::runtime_paths;
use proposal_generator::logging;
use proposal_web::config::{default_web_config_path, load_web_config};
use proposal_web::{router, AppState};

/// Proposal web: staff intake form for the proposal generator.
#[derive(Parser)]
#[command(name = "proposal-web", version, about)]
struct Cli {
    /// Config file (default: ~/.proposal-generator/web.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let paths = runtime_paths()?;
    let _logging_guard = logging::init_production(&paths.logs_dir, "proposal-web.log")?;

    let config_path = match cli.config {
        Some(path) => path,
        None => default_web_config_path()?,
    };
    let config = load_web_config(&config_path)?;

    let access_code = std::env::var(&config.access_code_env).ok();
    if access_code.is_none() && !config.dev_auto_login {
        warn!(
            variable = %config.access_code_env,
            "no access code configured; staff sign-in is disabled"
        );
    }
    if config.dev_auto_login {
        warn!("dev_auto_login is enabled; every visitor is signed in");
    }

    let bind = config.bind.clone();
    let app = router(AppState::new(config, access_code));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(addr = %bind, "proposal web server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("shutdown requested");
        })
        .await
        .context("web server error")?;

    Ok(())
}

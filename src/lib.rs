pub mod cli;
pub mod core;
pub mod providers;
pub mod render;
pub mod store;
pub mod web;

use crate::cli::show::ShowArgs;
use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::{debug, info};

pub enum AppCommand {
    /// Run the web dashboard. Unset values fall back to the `server` section.
    Serve {
        bind: Option<String>,
        port: Option<u16>,
    },
    /// Print one dashboard view to the terminal.
    Show(ShowArgs),
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;

    match command {
        AppCommand::Serve { bind, port } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{bind}:{port}")
                .parse()
                .with_context(|| format!("Invalid bind address {bind}:{port}"))?;

            info!("Macro dashboard starting...");
            let state = web::state::AppState::new(config)?;
            web::serve(state, addr).await
        }
        AppCommand::Show(args) => {
            let provider = providers::build_provider(&config)?;
            cli::show::show(&config, provider.as_ref(), &args).await
        }
    }
}

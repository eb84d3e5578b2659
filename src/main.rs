mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use settlement_gateway::config::{Config, LogFormat};
use settlement_gateway::stripe::StripeClient;
use settlement_gateway::{create_app, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_info = Config::from_env()?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Config => {
            cli::print_config(&config_info);
            Ok(())
        }
        Commands::Serve { port } => {
            let mut config = config_info.config;
            if let Some(port) = port {
                config.server_port = port;
            }
            init_tracing(config.log_format);
            tracing::info!(
                profile = config_info.profile.as_str(),
                overrides = ?config_info.overrides,
                "Configuration loaded"
            );
            serve(config).await
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let stripe = StripeClient::from_config(&config).context("failed to build Stripe client")?;

    let app_state = AppState::new(Arc::new(stripe), config.stripe_publishable_key.clone())
        .with_allowed_origins(config.allowed_origins());
    let app = create_app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::try_bind(&addr)
        .with_context(|| format!("failed to bind {}", addr))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

//! CLI entrypoint for datagroom-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use datagroom_application::ToolDispatcher;
use datagroom_infrastructure::{
    AppConfig, ConfigLoader, HttpDatasetGateway, JsonSchemaToolConverter, LoggingConfig,
};
use datagroom_presentation::Cli;
use datagroom_presentation::mcp::{McpServer, http, stdio};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut file_config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        println!();
        println!("Effective configuration:");
        println!("{}", ConfigLoader::render_effective(&file_config)?);
        return Ok(());
    }

    // Command-line flags win over every configuration source
    if let Some(port) = cli.port {
        file_config.server.port = port;
    }
    if let Some(host) = &cli.host {
        file_config.server.host = host.clone();
    }
    if let Some(dir) = &cli.log_dir {
        file_config.logging.directory = Some(dir.clone());
    }

    let config = AppConfig::try_from(file_config).context("Invalid configuration")?;

    let _log_guard = init_logging(&cli, &config.logging)?;

    info!("Starting datagroom-mcp against {}", config.gateway.base_url);
    if config.gateway.token.is_none() {
        warn!("DATAGROOM_PAT_TOKEN not configured; tool calls will fail until it is set");
    }

    // === Dependency Injection ===
    let gateway = Arc::new(HttpDatasetGateway::from_config(&config.gateway)?);
    let dispatcher = ToolDispatcher::new(gateway, config.gateway.endpoints.clone());
    let server = Arc::new(McpServer::new(
        dispatcher,
        Box::new(JsonSchemaToolConverter),
    ));

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    if cli.stdio {
        info!("Serving MCP over stdio");
        stdio::run_stdio(server.as_ref(), shutdown).await?;
    } else {
        let address = config.server.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {}", address))?;
        http::serve(listener, server, &config.server.mcp_path, shutdown).await?;
    }

    info!("datagroom-mcp stopped");
    Ok(())
}

/// Log to stderr (stdout carries the stdio transport) and, when a
/// directory is configured, to a daily-rolling file.
///
/// `RUST_LOG` overrides the level chosen by `-v`.
fn init_logging(cli: &Cli, logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let (file_layer, guard) = match &logging.directory {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("datagroom-mcp")
                .filename_suffix("log")
                .build(dir)
                .with_context(|| format!("Failed to open log directory {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

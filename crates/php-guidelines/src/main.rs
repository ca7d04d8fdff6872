mod catalog;
mod classifier;
mod config;
mod dispatcher;
mod error;
mod model;
mod server;
mod template;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use dispatcher::GuidanceDispatcher;
use server::PhpGuidelinesServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting php-guidelines MCP server");

    let config = Config::from_env()?;
    info!(
        catalog = config.catalog_path.as_deref().unwrap_or("embedded"),
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    let catalog = catalog::load_catalog(config.catalog_path().as_deref())?;
    let dispatcher = Arc::new(GuidanceDispatcher::new(catalog));
    for stats in dispatcher.categories() {
        info!(
            category = %stats.category,
            items = stats.item_count,
            examples = stats.example_count,
            "category ready"
        );
    }

    let server = PhpGuidelinesServer::new(dispatcher);

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}

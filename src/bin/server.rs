//! pdftext server — HTTP API for PDF text extraction.
//!
//! Usage:
//!   PDFTEXT_BIND=0.0.0.0:8000 pdftext-server
//!
//! Or with args:
//!   pdftext-server --bind 0.0.0.0:8000 --no-page-count

use clap::Parser;
use pdftext_lib::{config::ServerConfig, http_server, logging};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Logging first: the PDF libraries are quieted here, before any upload is parsed
    if let Err(e) = logging::init() {
        eprintln!("[Server] {}", e);
        std::process::exit(1);
    }

    tracing::info!(
        bind = %config.bind,
        page_count = !config.no_page_count,
        strict_status = config.strict_status,
        max_upload_bytes = ?config.max_upload_bytes,
        cors_permissive = config.cors_permissive,
        "Starting pdftext server"
    );

    let app = http_server::router(&config);

    // Bind and serve
    let listener = match tokio::net::TcpListener::bind(&config.bind).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", config.bind, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", config.bind);
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

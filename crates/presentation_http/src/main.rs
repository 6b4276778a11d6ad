//! Voice relay HTTP server

use std::{sync::Arc, time::Duration};

use infrastructure::{
    AppConfig, DEFAULT_LOG_FILTER, build_relay_service, build_voice_reply_service, init_logging,
};
use presentation_http::{AppState, create_app};
use tokio::{net::TcpListener, signal};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    init_logging(config.server.log_format, DEFAULT_LOG_FILTER)?;

    info!("Voice relay v{} starting...", env!("CARGO_PKG_VERSION"));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        inference = ?config.inference.provider,
        model = config.inference.resolved_model(),
        routing = ?config.routing_policy(),
        "Configuration loaded"
    );

    let relay = Arc::new(
        build_relay_service(&config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize relay: {e}"))?,
    );
    let voice_reply = build_voice_reply_service(&config, Arc::clone(&relay))
        .map_err(|e| anyhow::anyhow!("Failed to initialize WhatsApp replies: {e}"))?;

    let mut state = AppState::new(relay, config.clone());
    if let Some(service) = voice_reply {
        state = state.with_voice_reply(service);
    } else {
        info!("WhatsApp webhook disabled");
    }

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let app = create_app(state, &config.server);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!(
        timeout_secs = timeout.as_secs(),
        "Waiting for in-flight requests to complete"
    );
}

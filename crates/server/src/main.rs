//! Lead agent server entry point

use std::net::SocketAddr;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use lead_agent_config::{load_settings, Settings};
use lead_agent_server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing is not initialized yet.
            eprintln!("Warning: failed to load settings: {e}. Using defaults.");
            Settings::default()
        }
    };

    init_tracing(&settings);

    tracing::info!("Starting lead agent v{}", env!("CARGO_PKG_VERSION"));
    if settings.llm.api_key.is_none() {
        tracing::warn!("no API key configured, generative replies disabled");
    }

    let state = AppState::new(settings.clone());

    // Background sweep of idle sessions, decoupled from request volume.
    let reaper_shutdown = state.sessions.start_reaper();
    tracing::info!(
        max_idle_secs = settings.session.max_idle_secs,
        cleanup_interval_secs = settings.session.cleanup_interval_secs,
        "session reaper started"
    );

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = reaper_shutdown.send(true);
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

/// Initialize tracing from settings, honoring RUST_LOG when set
fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "lead_agent={level},tower_http={level}",
            level = settings.observability.log_level
        )
        .into()
    });

    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

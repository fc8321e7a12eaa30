use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studentportal_backend::{
    config::Config,
    portal::{HttpPortalConnector, PortalConnector},
    routes,
    state::AppState,
};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(2).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studentportal_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Missing or invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        portal_base_url = %config.portal_base_url,
        portal_user = %config.portal_user,
        portal_pass = %mask_secret(&config.portal_pass),
        jwt_secret = %mask_secret(&config.jwt_secret),
        token_expiration_days = config.token_expiration_days,
        "Loaded configuration from environment/.env"
    );

    // Startup portal session for the service credential
    let connector = HttpPortalConnector::new(config.portal_base_url.clone())?;
    if let Err(err) = connector.connect(&config.portal_credential()) {
        tracing::error!(error = %err, "Failed to initialize portal session");
        std::process::exit(1);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = routes::app(AppState::new(config, Arc::new(connector)));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
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
    tracing::info!("Shutdown signal received");
}

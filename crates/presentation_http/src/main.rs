//! KidGuard HTTP Server
//!
//! Main entry point for the moderation relay.

use std::{sync::Arc, time::Duration};

use application::{AuditService, ModerationService};
use infrastructure::{AppConfig, FirestoreAuditStore, GeminiGenerationAdapter};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kidguard_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("KidGuard v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    // The generation credential is mandatory; refuse to serve without it.
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.generation.model,
        "Configuration loaded"
    );

    // Initialize generation adapter
    let generation_adapter = GeminiGenerationAdapter::new(config.generation.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize generation client: {e}"))?;
    let generation: Arc<dyn application::ports::GenerationPort> = Arc::new(generation_adapter);

    // Initialize audit store; absence degrades to disabled logging.
    let audit_store: Option<Arc<dyn application::ports::AuditStorePort>> =
        match config.firestore_if_configured() {
            Some(firestore_config) => match FirestoreAuditStore::new(firestore_config.clone()) {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    warn!("Failed to initialize Firestore, audit logging disabled: {e}");
                    None
                }
            },
            None => {
                warn!("Firestore not configured, audit logging disabled");
                None
            }
        };

    // Initialize services
    let moderation_service = ModerationService::new(generation);
    let audit_service = AuditService::new(audit_store);

    let state = AppState::new(Arc::new(moderation_service), Arc::new(audit_service));

    // Build router
    let app = routes::create_router(state);

    // Configure middleware (order matters: first added = outermost)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("KidGuard server listening on http://{}", addr);

    // Graceful shutdown configuration
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
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

    info!("Waiting up to {:?} for connections to close...", timeout);
    // The actual connection draining is handled by axum's graceful_shutdown
}

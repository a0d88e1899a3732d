use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use focal_api::config::ServerConfig;
use focal_api::middleware::api_key::RateLimiter;
use focal_api::router::build_router;
use focal_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "focal_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = focal_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    focal_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    focal_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus ---
    let event_bus = Arc::new(focal_events::EventBus::default());

    // Spawn event persistence (writes all events to the database).
    let persistence_handle = tokio::spawn(focal_events::EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));

    // Spawn webhook dispatcher (signed delivery to registered endpoints).
    let webhook_dispatcher = focal_events::WebhookDispatcher::new(pool.clone());
    let webhook_handle = tokio::spawn(webhook_dispatcher.run(event_bus.subscribe()));

    // Spawn email notifier if SMTP is configured.
    let email_handle = match focal_events::EmailConfig::from_env() {
        Some(email_config) => {
            let notifier = focal_events::EmailNotifier::new(pool.clone(), email_config);
            Some(tokio::spawn(notifier.run(event_bus.subscribe())))
        }
        None => {
            tracing::info!("SMTP_HOST not set, email notifications disabled");
            None
        }
    };

    tracing::info!("Event services started (persistence, webhooks, email)");

    // --- External clients ---
    let hdr = match focal_hdr::HdrWorkerConfig::from_env() {
        Some(hdr_config) => Some(Arc::new(
            focal_hdr::HdrClient::new(hdr_config).expect("Failed to build HDR worker client"),
        )),
        None => {
            tracing::info!("HDR_WORKER_URL not set, worker dispatch disabled");
            None
        }
    };

    let places = match focal_places::PlacesProviderConfig::from_env() {
        Some(places_config) => {
            let cache = Arc::new(focal_places::ResponseCache::default());
            Some(Arc::new(
                focal_places::PlacesClient::new(places_config, cache)
                    .expect("Failed to build places client"),
            ))
        }
        None => {
            tracing::info!("Places provider not configured, location routes degraded");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        hdr,
        places,
        rate_limiter: Arc::new(RateLimiter::new()),
    };

    let app = build_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Drop the event bus sender to close the broadcast channel.
    // This signals the persistence, webhook, and email tasks to shut down.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), persistence_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), webhook_handle).await;
    if let Some(handle) = email_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Event services shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

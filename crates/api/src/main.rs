use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edifica_api::auth::password::hash_password;
use edifica_api::config::ServerConfig;
use edifica_api::media::MediaStore;
use edifica_api::notify::ContactNotifier;
use edifica_api::router::build_app_router;
use edifica_api::state::AppState;
use edifica_db::repositories::UserRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edifica_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = edifica_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    edifica_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    edifica_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Media storage ---
    tokio::fs::create_dir_all(&config.media_root)
        .await
        .expect("Failed to create media root directory");
    let media = Arc::new(MediaStore::new(config.media_root.clone()));
    tracing::info!(root = %config.media_root.display(), "Media store ready");

    // --- Admin bootstrap ---
    bootstrap_admin(&pool).await;

    // --- Contact notifier ---
    let notifier = Arc::new(ContactNotifier::start(config.email.clone()));

    // --- App state and router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
        notifier,
    };
    let app = build_app_router(state, &config);

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

    tracing::info!("Graceful shutdown complete");
}

/// Create the initial staff account from `ADMIN_USERNAME` /
/// `ADMIN_PASSWORD` if it does not exist yet. A no-op when either
/// variable is missing or the user is already present.
async fn bootstrap_admin(pool: &edifica_db::DbPool) {
    let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        return;
    };

    match UserRepo::find_by_username(pool, &username).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let hash = hash_password(&password).expect("Failed to hash admin password");
            UserRepo::create(pool, &username, &hash, true)
                .await
                .expect("Failed to create admin user");
            tracing::info!(%username, "Bootstrapped admin user");
        }
        Err(e) => panic!("Admin bootstrap lookup failed: {e}"),
    }
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

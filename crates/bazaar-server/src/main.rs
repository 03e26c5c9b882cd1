use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use bazaar_api::auth::{self, AppState, AppStateInner};
use bazaar_api::items;
use bazaar_db::Database;
use bazaar_files::Storage;
use bazaar_store::{AccountStore, PostStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bazaar=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("BAZAAR_DB_PATH").unwrap_or_else(|_| "bazaar.db".into());
    let host = std::env::var("BAZAAR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("BAZAAR_PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()?;
    let storage_dir: PathBuf = std::env::var("BAZAAR_STORAGE_DIR")
        .unwrap_or_else(|_| "./media".into())
        .into();
    let public_url = std::env::var("BAZAAR_PUBLIC_URL")
        .unwrap_or_else(|_| format!("http://{}:{}", host, port));

    // Stores, built once here and injected — no ambient globals.
    let db = Arc::new(Database::open(&PathBuf::from(&db_path))?);
    let storage = Storage::new(storage_dir, public_url).await?;
    let media_dir = storage.dir().to_path_buf();

    let state: AppState = Arc::new(AppStateInner {
        accounts: AccountStore::new(db.clone()),
        posts: PostStore::new(db),
        storage,
    });

    // Routes
    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    let item_routes = Router::new()
        .route("/items", get(items::list_items))
        .route("/items", post(items::create_item))
        .route("/items/categories", get(items::list_categories))
        .route("/items/categories/{category}", get(items::category_fields))
        .route("/items/upload", post(items::upload_image))
        .with_state(state);

    let app = Router::new()
        .merge(auth_routes)
        .merge(item_routes)
        .route("/health", get(bazaar_api::health))
        .nest_service("/media", ServeDir::new(media_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Bazaar server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}

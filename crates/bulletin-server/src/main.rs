use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use bulletin_api::auth::{AppState, AppStateInner};
use bulletin_auth::session::SessionDirectory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bulletin=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("BULLETIN_DB_PATH").unwrap_or_else(|_| "bulletin.db".into());
    let host = std::env::var("BULLETIN_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("BULLETIN_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = bulletin_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state: sessions live in-process and are gone on restart
    let state: AppState = Arc::new(AppStateInner {
        db,
        sessions: SessionDirectory::new(),
    });

    let app = bulletin_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Bulletin server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

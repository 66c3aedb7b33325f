use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use slotbook::config::AppConfig;
use slotbook::db;
use slotbook::handlers;
use slotbook::services::identity::ProxyHeaderIdentity;
use slotbook::services::notify::LogSink;
use slotbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let identity = ProxyHeaderIdentity::new(config.admin_token.clone());

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        identity: Box::new(identity),
        notifier: Box::new(LogSink),
        config,
    });

    let app = handlers::router(state.clone());

    let addr = format!("0.0.0.0:{}", state.config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

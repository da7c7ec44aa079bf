use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tuition_registry::{config::Config, db, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let store = db::connect(&config.mongodb_uri, &config.database).await?;
    info!(database = %config.database, "MongoDB connected");

    let state = AppState::new(Arc::new(store), config.clone());
    let app = routes::router(state)?;

    let addr = format!("{}:{}", config.host, config.port);
    info!("tuition registry API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

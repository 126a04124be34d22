use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_recommender::{
    config::Config,
    routes::{create_router, AppState},
    services::{corpus, Recommender},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let settings = config.engine_settings();

    // The corpus is required; any load failure stops the process
    let dataset_path = config.dataset_path.clone();
    let recommender = tokio::task::spawn_blocking(move || {
        corpus::load(&dataset_path).map(|corpus| Recommender::new(corpus, settings))
    })
    .await
    .context("engine build task failed")?
    .with_context(|| format!("failed to load dataset {}", config.dataset_path))?;

    let app = create_router(AppState::new(recommender, config.genre_limit));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

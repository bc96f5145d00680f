use tracing_subscriber::EnvFilter;

use pm_compass::{
    api::{create_router, AppState},
    config::Config,
    services::{
        registry::{load_catalog, FileContentSource},
        scoring::ScoringMatrix,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pm_compass=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Load the registry once; it stays immutable for the life of the process
    let source = FileContentSource::new(&config.registry_path, &config.episodes_path);
    let catalog = load_catalog(&source).await?;

    let state = AppState::new(
        catalog,
        ScoringMatrix::standard(),
        config.recommendation_options(),
    );
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

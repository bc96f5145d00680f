use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{ContentRegistry, EpisodeMetadata},
    services::catalog::Catalog,
};

/// Source of the verified-content registry and episode metadata.
///
/// The registry is compiled and validated offline; implementations only
/// fetch and deserialize it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Load the compiled registry document
    async fn load_registry(&self) -> AppResult<ContentRegistry>;

    /// Load the flat list of episode display metadata
    async fn load_episodes(&self) -> AppResult<Vec<EpisodeMetadata>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Reads both documents from JSON files on disk
#[derive(Debug, Clone)]
pub struct FileContentSource {
    registry_path: PathBuf,
    episodes_path: PathBuf,
}

impl FileContentSource {
    pub fn new(registry_path: impl Into<PathBuf>, episodes_path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            episodes_path: episodes_path.into(),
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let bytes = tokio::fs::read(path).await.inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read content file");
    })?;
    let document = serde_json::from_slice(&bytes).inspect_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Malformed content file");
    })?;
    Ok(document)
}

#[async_trait::async_trait]
impl ContentSource for FileContentSource {
    async fn load_registry(&self) -> AppResult<ContentRegistry> {
        read_json(&self.registry_path).await
    }

    async fn load_episodes(&self) -> AppResult<Vec<EpisodeMetadata>> {
        read_json(&self.episodes_path).await
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Loads both documents from `source` and joins them into a catalog
pub async fn load_catalog(source: &dyn ContentSource) -> AppResult<Catalog> {
    let registry = source.load_registry().await?;
    let episodes = source.load_episodes().await?;

    tracing::info!(
        source = source.name(),
        registry_episodes = registry.episodes.len(),
        metadata_episodes = episodes.len(),
        "Content loaded"
    );

    let catalog = Catalog::from_parts(registry, episodes);
    if catalog.is_empty() {
        return Err(AppError::Registry(format!(
            "no episodes from source '{}' have both enrichment and metadata",
            source.name()
        )));
    }

    Ok(catalog)
}

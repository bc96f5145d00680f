use std::sync::Arc;

use crate::services::{
    catalog::Catalog, recommendations::RecommendationOptions, scoring::ScoringMatrix,
};

/// Shared application state
///
/// Everything here is read-only after startup, so handlers share it through
/// `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub matrix: Arc<ScoringMatrix>,
    pub options: RecommendationOptions,
}

impl AppState {
    pub fn new(catalog: Catalog, matrix: ScoringMatrix, options: RecommendationOptions) -> Self {
        Self {
            catalog: Arc::new(catalog),
            matrix: Arc::new(matrix),
            options,
        }
    }

    /// State over `catalog` with the standard question bank and default limits
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::new(
            catalog,
            ScoringMatrix::standard(),
            RecommendationOptions::default(),
        )
    }
}

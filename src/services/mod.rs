pub mod catalog;
pub mod recommendations;
pub mod registry;
pub mod scoring;

pub use catalog::{Catalog, CatalogEntry};
pub use recommendations::{generate_recommendations, RecommendationOptions};
pub use registry::{load_catalog, ContentSource, FileContentSource};
pub use scoring::{build_profile, ScoringMatrix};

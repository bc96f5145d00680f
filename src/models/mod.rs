pub mod content;
pub mod profile;
pub mod quiz;
pub mod recommendation;
pub mod zone;

pub use content::{
    ContentRegistry, ContrarianCandidate, EpisodeEnrichment, EpisodeMetadata, Quote, QuoteSource,
};
pub use profile::UserProfile;
pub use quiz::{QuizAnswers, QuizOption, QuizQuestion, ZoneContribution};
pub use recommendation::{ContrarianPick, EpisodeAlignment, Recommendations};
pub use zone::{zone_taxonomy, ZoneId, ZoneInfo, ZoneMap, DEFAULT_ZONE};

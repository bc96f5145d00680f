use serde::{Deserialize, Serialize};

use super::{ZoneId, ZoneMap};

/// Where in the episode transcript a quote was taken from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSource {
    pub slug: String,
    #[serde(alias = "line_start")]
    pub line_start: u32,
    #[serde(alias = "line_end")]
    pub line_end: u32,
}

/// A verified quote from the offline-curated registry. Never edited at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub speaker: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub source: QuoteSource,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub zones: Vec<ZoneId>,
}

/// A quote the registry authors flagged as challenging certain zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrarianCandidate {
    #[serde(alias = "quote_id")]
    pub quote_id: String,
    pub why: String,
    #[serde(default, alias = "related_zones")]
    pub related_zones: Vec<ZoneId>,
}

/// Per-episode enrichment record from the registry
///
/// Both historical spellings of the influence and contrarian fields are
/// accepted here, so nothing downstream needs to care which one a file used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeEnrichment {
    pub slug: String,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub takeaways: Vec<String>,
    #[serde(default, alias = "zone_influence")]
    pub zone_influence: ZoneMap<f64>,
    #[serde(default, alias = "contrarian_candidates")]
    pub contrarian_candidates: Vec<ContrarianCandidate>,
}

impl EpisodeEnrichment {
    pub fn quote(&self, quote_id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == quote_id)
    }

    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.iter().any(|t| t.eq_ignore_ascii_case(theme))
    }
}

/// The compiled verified-content document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRegistry {
    #[serde(default)]
    pub episodes: Vec<EpisodeEnrichment>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default, alias = "last_updated")]
    pub last_updated: String,
}

/// Display metadata for an episode, keyed by slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeMetadata {
    pub slug: String,
    pub guest: String,
    pub title: String,
    #[serde(default, alias = "guest_type", skip_serializing_if = "Option::is_none")]
    pub guest_type: Option<String>,
}

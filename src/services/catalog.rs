use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{ContentRegistry, EpisodeEnrichment, EpisodeMetadata, Quote, ZoneId};

/// Episodes with more influence than this in a zone are listed under it
const LISTING_THRESHOLD: f64 = 0.15;

/// An episode present in both the registry and the metadata list
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub metadata: EpisodeMetadata,
    pub enrichment: EpisodeEnrichment,
}

impl CatalogEntry {
    pub fn slug(&self) -> &str {
        &self.metadata.slug
    }
}

/// Theme with the number of episodes tagged with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeCount {
    pub theme: String,
    pub episodes: usize,
}

/// Read-only, joined view of the registry and episode metadata.
///
/// Built once at startup and shared by every request.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_slug: HashMap<String, usize>,
    quotes: Vec<Quote>,
    last_updated: String,
}

impl Catalog {
    /// Joins registry enrichments to metadata by slug.
    ///
    /// Episodes missing from either side are dropped; the first occurrence of
    /// a duplicated slug wins. Order follows the registry.
    pub fn from_parts(registry: ContentRegistry, metadata: Vec<EpisodeMetadata>) -> Self {
        let mut meta_by_slug: HashMap<String, EpisodeMetadata> = HashMap::new();
        for meta in metadata {
            if meta_by_slug.contains_key(&meta.slug) {
                tracing::warn!(slug = %meta.slug, "Duplicate episode metadata, keeping first");
                continue;
            }
            meta_by_slug.insert(meta.slug.clone(), meta);
        }

        let mut entries = Vec::new();
        let mut by_slug = HashMap::new();
        let mut missing_metadata = 0usize;

        for enrichment in registry.episodes {
            if by_slug.contains_key(&enrichment.slug) {
                tracing::warn!(
                    slug = %enrichment.slug,
                    "Duplicate registry episode, keeping first"
                );
                continue;
            }
            let Some(metadata) = meta_by_slug.remove(&enrichment.slug) else {
                tracing::warn!(
                    slug = %enrichment.slug,
                    "Registry episode has no metadata, skipping"
                );
                missing_metadata += 1;
                continue;
            };
            by_slug.insert(enrichment.slug.clone(), entries.len());
            entries.push(CatalogEntry {
                metadata,
                enrichment,
            });
        }

        if !meta_by_slug.is_empty() {
            tracing::info!(
                count = meta_by_slug.len(),
                "Episodes without registry enrichment excluded from catalog"
            );
        }

        let quotes = merge_quotes(registry.quotes, &entries);

        tracing::info!(
            episodes = entries.len(),
            quotes = quotes.len(),
            missing_metadata,
            last_updated = %registry.last_updated,
            "Catalog built"
        );

        Self {
            entries,
            by_slug,
            quotes,
            last_updated: registry.last_updated,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last_updated(&self) -> &str {
        &self.last_updated
    }

    pub fn episode(&self, slug: &str) -> Option<&CatalogEntry> {
        self.by_slug.get(slug).map(|&i| &self.entries[i])
    }

    /// Episodes leaning into `zone`, strongest influence first
    pub fn episodes_in_zone(&self, zone: ZoneId) -> Vec<&CatalogEntry> {
        let mut matches: Vec<&CatalogEntry> = self
            .entries
            .iter()
            .filter(|e| e.enrichment.zone_influence[zone] > LISTING_THRESHOLD)
            .collect();
        matches.sort_by(|a, b| {
            b.enrichment.zone_influence[zone]
                .total_cmp(&a.enrichment.zone_influence[zone])
                .then_with(|| a.slug().cmp(b.slug()))
        });
        matches
    }

    pub fn episodes_with_theme(&self, theme: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.enrichment.has_theme(theme))
            .collect()
    }

    /// Episodes passing both optional filters. A zone filter also sets the order.
    pub fn browse(&self, zone: Option<ZoneId>, theme: Option<&str>) -> Vec<&CatalogEntry> {
        match (zone, theme) {
            (Some(zone), Some(theme)) => {
                let mut matches = self.episodes_in_zone(zone);
                matches.retain(|e| e.enrichment.has_theme(theme));
                matches
            }
            (Some(zone), None) => self.episodes_in_zone(zone),
            (None, Some(theme)) => self.episodes_with_theme(theme),
            (None, None) => self.entries.iter().collect(),
        }
    }

    /// Every theme with its episode count, most used first
    pub fn theme_counts(&self) -> Vec<ThemeCount> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for entry in &self.entries {
            let unique: HashSet<String> = entry
                .enrichment
                .themes
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            for theme in unique {
                *counts.entry(theme).or_default() += 1;
            }
        }

        // BTreeMap order is by name, and the stable sort keeps it within a count
        let mut themes: Vec<ThemeCount> = counts
            .into_iter()
            .map(|(theme, episodes)| ThemeCount { theme, episodes })
            .collect();
        themes.sort_by_key(|t| Reverse(t.episodes));
        themes
    }

    /// Case-insensitive substring search over quote text, speaker and themes
    pub fn search_quotes(&self, query: &str, limit: usize) -> Vec<&Quote> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.quotes
            .iter()
            .filter(|q| {
                q.text.to_lowercase().contains(&needle)
                    || q.speaker.to_lowercase().contains(&needle)
                    || q.themes.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .take(limit)
            .collect()
    }
}

/// Registry-level quotes first, then episode quotes not already listed
fn merge_quotes(registry_quotes: Vec<Quote>, entries: &[CatalogEntry]) -> Vec<Quote> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut quotes = Vec::new();

    let episode_quotes = entries
        .iter()
        .flat_map(|e| e.enrichment.quotes.iter().cloned());
    for quote in registry_quotes.into_iter().chain(episode_quotes) {
        if seen.insert(quote.id.clone()) {
            quotes.push(quote);
        }
    }

    quotes
}

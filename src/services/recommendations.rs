use std::cmp::Reverse;
use std::collections::HashSet;

use crate::{
    models::{
        ContrarianPick, EpisodeAlignment, QuizAnswers, Quote, Recommendations, UserProfile, ZoneId,
        ZoneMap,
    },
    services::{
        catalog::{Catalog, CatalogEntry},
        scoring::{build_profile, ScoringMatrix},
    },
};

/// Quotes attached to each primary recommendation
pub const DEFAULT_MATCHING_QUOTES: usize = 2;
/// Engine cap for one primary selection pass
pub const DEFAULT_PRIMARY_LIMIT: usize = 5;
/// Largest primary list a caller may ask for
pub const MAX_PRIMARY_LIMIT: usize = 12;
pub const DEFAULT_CONTRARIAN_LIMIT: usize = 3;

/// Calibrates raw alignment so strong single-zone matches land around 70-95
const ALIGNMENT_SCALE: f64 = 120.0;

const PRIMARY_DEPTH_STRONG: f64 = 0.25;
const PRIMARY_DEPTH_MODERATE: f64 = 0.15;
const SECONDARY_DEPTH: f64 = 0.15;
const BREADTH_USER_MIN: u32 = 10;
const BREADTH_EPISODE_MIN: f64 = 0.1;
const BREADTH_ZONES: usize = 3;

/// Shared zones need this much episode influence and user percentage
const SHARED_INFLUENCE_MIN: f64 = 0.15;
const SHARED_USER_MIN: u32 = 20;

const QUOTE_MIN_CHARS: usize = 50;
const SNIPPET_MAX_CHARS: usize = 80;
const GENERIC_REASON: &str = "Aligns with your overall product philosophy";

/// Both episodes above this influence in a zone makes them similar there
const SIMILARITY_INFLUENCE: f64 = 0.2;
const SIMILARITY_STEP: f64 = 0.1;
const MAX_SIMILARITY_PENALTY: f64 = 0.3;
/// After this many picks, a candidate must reach 70% of the last pick's score
const DIVERSITY_MIN_ACCEPTED: usize = 3;
const DIVERSITY_SCORE_RATIO: f64 = 0.7;

/// Limits for one recommendation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationOptions {
    pub primary_limit: usize,
    pub contrarian_limit: usize,
}

impl Default for RecommendationOptions {
    fn default() -> Self {
        Self {
            primary_limit: DEFAULT_PRIMARY_LIMIT,
            contrarian_limit: DEFAULT_CONTRARIAN_LIMIT,
        }
    }
}

impl RecommendationOptions {
    /// Same options with the primary limit clamped to 1..=12
    pub fn with_primary_limit(self, limit: usize) -> Self {
        Self {
            primary_limit: limit.clamp(1, MAX_PRIMARY_LIMIT),
            ..self
        }
    }
}

/// How well one quote speaks to a profile
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRelevance {
    pub score: f64,
    pub matched_zones: Vec<ZoneId>,
}

/// Scores a quote by its zone tags, weighting the user's primary zone 3x and
/// secondary 2x. Tags on zones the user never scored contribute nothing.
pub fn score_quote(quote: &Quote, profile: &UserProfile) -> QuoteRelevance {
    let mut score = 0.0;
    let mut matched_zones = Vec::new();

    for &zone in &quote.zones {
        if profile.percentage(zone) == 0 {
            continue;
        }
        let weight = if zone == profile.primary_zone {
            3.0
        } else if zone == profile.secondary_zone {
            2.0
        } else {
            1.0
        };
        score += weight * profile.strength(zone);
        matched_zones.push(zone);
    }

    QuoteRelevance {
        score,
        matched_zones,
    }
}

/// Up to `max` quotes, most relevant first.
///
/// When no quote scores at all, the first `max` quotes are returned as-is so
/// an episode with quotes always has something to show.
pub fn find_best_matching_quotes<'a>(
    profile: &UserProfile,
    quotes: &'a [Quote],
    max: usize,
) -> Vec<&'a Quote> {
    let mut scored: Vec<(f64, &Quote)> = quotes
        .iter()
        .map(|quote| (score_quote(quote, profile).score, quote))
        .filter(|(score, _)| *score > 0.0)
        .collect();

    if scored.is_empty() {
        return quotes.iter().take(max).collect();
    }

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(max)
        .map(|(_, quote)| quote)
        .collect()
}

/// Alignment between a profile and an episode's zone influence, 0 to 100.
///
/// Influence vectors are used as authored, without renormalizing.
pub fn calculate_alignment_score(profile: &UserProfile, influence: &ZoneMap<f64>) -> u8 {
    let base: f64 = ZoneId::ALL
        .iter()
        .map(|&zone| profile.strength(zone) * influence[zone])
        .sum();

    let mut bonus = 0.0;

    let primary_influence = influence[profile.primary_zone];
    if primary_influence > PRIMARY_DEPTH_STRONG {
        bonus += 0.30;
    } else if primary_influence > PRIMARY_DEPTH_MODERATE {
        bonus += 0.15;
    }
    if influence[profile.secondary_zone] > SECONDARY_DEPTH {
        bonus += 0.10;
    }

    let overlapping = ZoneId::ALL
        .iter()
        .filter(|&&zone| {
            profile.percentage(zone) > BREADTH_USER_MIN && influence[zone] > BREADTH_EPISODE_MIN
        })
        .count();
    if overlapping >= BREADTH_ZONES {
        bonus += 0.05;
    }

    ((base + bonus) * ALIGNMENT_SCALE).round().min(100.0) as u8
}

/// Zones strong for both the user and the episode, user's strongest first
pub fn shared_zones(profile: &UserProfile, influence: &ZoneMap<f64>) -> Vec<ZoneId> {
    let mut zones: Vec<ZoneId> = ZoneId::ALL
        .into_iter()
        .filter(|&zone| {
            influence[zone] > SHARED_INFLUENCE_MIN && profile.percentage(zone) > SHARED_USER_MIN
        })
        .collect();
    zones.sort_by_key(|zone| Reverse(profile.percentage(*zone)));
    zones
}

fn first_name(guest: &str) -> &str {
    guest.split_whitespace().next().unwrap_or(guest)
}

/// First sentence-like clause of `text`, capped at 80 characters
fn quote_snippet(text: &str) -> String {
    let clause = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or_else(|| text.trim());

    if clause.chars().count() > SNIPPET_MAX_CHARS {
        let truncated: String = clause.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{}...", truncated.trim_end())
    } else {
        clause.to_string()
    }
}

/// One-line explanation of why an episode was recommended
pub fn generate_match_reason(
    profile: &UserProfile,
    guest: &str,
    influence: &ZoneMap<f64>,
    best_quote: Option<&Quote>,
) -> String {
    let name = first_name(guest);
    let shared = shared_zones(profile, influence);

    if let Some(quote) = best_quote.filter(|q| q.text.chars().count() > QUOTE_MIN_CHARS) {
        let snippet = quote_snippet(&quote.text);
        return match shared.first() {
            Some(zone) => format!("{} on {}: \"{}\"", name, zone.display_name(), snippet),
            None => format!("{}: \"{}\"", name, snippet),
        };
    }

    match shared.as_slice() {
        [] => GENERIC_REASON.to_string(),
        [zone] => format!("{} shares your emphasis on {}", name, zone.display_name()),
        [first, second, ..] => format!(
            "{} shares your focus on {} and {}",
            name,
            first.display_name(),
            second.display_name()
        ),
    }
}

/// An episode scored once against a profile, before selection
#[derive(Debug, Clone)]
pub struct ScoredEpisode<'a> {
    pub entry: &'a CatalogEntry,
    pub score: u8,
    pub matching_quotes: Vec<&'a Quote>,
    pub match_reason: String,
}

impl ScoredEpisode<'_> {
    pub fn slug(&self) -> &str {
        self.entry.slug()
    }

    fn influence(&self) -> &ZoneMap<f64> {
        &self.entry.enrichment.zone_influence
    }

    fn to_alignment(&self, alignment_score: u8) -> EpisodeAlignment {
        EpisodeAlignment {
            slug: self.entry.metadata.slug.clone(),
            guest: self.entry.metadata.guest.clone(),
            title: self.entry.metadata.title.clone(),
            alignment_score,
            matching_quotes: self.matching_quotes.iter().map(|&q| q.clone()).collect(),
            match_reason: self.match_reason.clone(),
            episode_zones: *self.influence(),
            contrarian: None,
            guest_type: self.entry.metadata.guest_type.clone(),
        }
    }
}

/// Scores every catalog episode that has a non-zero influence vector
pub fn score_episodes<'a>(profile: &UserProfile, catalog: &'a Catalog) -> Vec<ScoredEpisode<'a>> {
    catalog
        .entries()
        .iter()
        .filter(|entry| !entry.enrichment.zone_influence.is_empty())
        .map(|entry| {
            let influence = &entry.enrichment.zone_influence;
            let matching_quotes = find_best_matching_quotes(
                profile,
                &entry.enrichment.quotes,
                DEFAULT_MATCHING_QUOTES,
            );
            let match_reason = generate_match_reason(
                profile,
                &entry.metadata.guest,
                influence,
                matching_quotes.first().copied(),
            );
            ScoredEpisode {
                entry,
                score: calculate_alignment_score(profile, influence),
                matching_quotes,
                match_reason,
            }
        })
        .collect()
}

/// Penalty against the most similar already-accepted episode, at most 0.3
fn similarity_penalty(candidate: &ZoneMap<f64>, accepted: &[(&ScoredEpisode<'_>, u8)]) -> f64 {
    accepted
        .iter()
        .map(|(picked, _)| {
            let overlapping = ZoneId::ALL
                .iter()
                .filter(|&&zone| {
                    candidate[zone] > SIMILARITY_INFLUENCE
                        && picked.influence()[zone] > SIMILARITY_INFLUENCE
                })
                .count();
            (overlapping as f64 * SIMILARITY_STEP).min(MAX_SIMILARITY_PENALTY)
        })
        .fold(0.0, f64::max)
}

/// Diversity-aware top-K over scored episodes.
///
/// Candidates are walked by raw score; each is discounted by its similarity to
/// the closest pick so far, and once three are picked a candidate falling
/// below 70% of the previous pick is skipped. Output is sorted by the
/// discounted score.
pub fn select_primary(candidates: &[ScoredEpisode<'_>], limit: usize) -> Vec<EpisodeAlignment> {
    let mut ordered: Vec<&ScoredEpisode<'_>> = candidates.iter().collect();
    ordered.sort_by_key(|&episode| (Reverse(episode.score), episode.slug()));

    let mut accepted: Vec<(&ScoredEpisode<'_>, u8)> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for candidate in ordered {
        if accepted.len() >= limit {
            break;
        }
        if seen.contains(candidate.slug()) {
            continue;
        }

        let penalty = similarity_penalty(candidate.influence(), &accepted);
        let adjusted = (f64::from(candidate.score) * (1.0 - penalty)).round() as u8;

        if let Some(&(_, last_score)) = accepted.last() {
            if accepted.len() >= DIVERSITY_MIN_ACCEPTED
                && f64::from(adjusted) < DIVERSITY_SCORE_RATIO * f64::from(last_score)
            {
                tracing::trace!(
                    slug = candidate.slug(),
                    adjusted,
                    last_score,
                    "Skipping near-duplicate"
                );
                continue;
            }
        }

        seen.insert(candidate.slug());
        accepted.push((candidate, adjusted));
    }

    accepted.sort_by_key(|&(_, adjusted)| Reverse(adjusted));
    accepted
        .into_iter()
        .map(|(episode, adjusted)| episode.to_alignment(adjusted))
        .collect()
}

/// Weight of a contrarian candidate's related zones against the profile.
/// Each profile role counts once even when roles share a zone.
fn contrarian_candidate_score(related_zones: &[ZoneId], profile: &UserProfile) -> u32 {
    let mut score = 0;
    if related_zones.contains(&profile.primary_zone) {
        score += 3;
    }
    if profile.secondary_zone != profile.primary_zone
        && related_zones.contains(&profile.secondary_zone)
    {
        score += 2;
    }
    if profile.blind_spot_zone != profile.primary_zone
        && related_zones.contains(&profile.blind_spot_zone)
    {
        score += 1;
    }
    score
}

fn blind_spot_bonus(influence: &ZoneMap<f64>, blind_spot: ZoneId) -> u32 {
    let weight = influence[blind_spot];
    if weight > 0.2 {
        3
    } else if weight > 0.1 {
        1
    } else {
        0
    }
}

/// Episodes that challenge the user's dominant and neglected zones.
///
/// Episodes in `used_slugs` or without a resolvable contrarian candidate are
/// never picked.
pub fn select_contrarian(
    profile: &UserProfile,
    candidates: &[ScoredEpisode<'_>],
    used_slugs: &HashSet<&str>,
    limit: usize,
) -> Vec<EpisodeAlignment> {
    let mut picks: Vec<(u32, &ScoredEpisode<'_>, &Quote, &str)> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for episode in candidates {
        if used_slugs.contains(episode.slug()) || seen.contains(episode.slug()) {
            continue;
        }

        let enrichment = &episode.entry.enrichment;
        let mut best: Option<(u32, &Quote, &str)> = None;
        for candidate in &enrichment.contrarian_candidates {
            let Some(quote) = enrichment.quote(&candidate.quote_id) else {
                tracing::debug!(
                    slug = episode.slug(),
                    quote_id = %candidate.quote_id,
                    "Contrarian candidate references unknown quote"
                );
                continue;
            };
            let score = contrarian_candidate_score(&candidate.related_zones, profile);
            let improves = match best {
                Some((best_score, _, _)) => score > best_score,
                None => true,
            };
            if improves {
                best = Some((score, quote, candidate.why.as_str()));
            }
        }

        let Some((score, quote, why)) = best else {
            continue;
        };
        let total = score + blind_spot_bonus(episode.influence(), profile.blind_spot_zone);
        seen.insert(episode.slug());
        picks.push((total, episode, quote, why));
    }

    // stable, so equal scores keep catalog order
    picks.sort_by_key(|pick| Reverse(pick.0));
    picks
        .into_iter()
        .take(limit)
        .map(|(_, episode, quote, why)| {
            let mut alignment = episode.to_alignment(episode.score);
            alignment.match_reason = format!("Challenges your thinking: \"{}\"", why);
            alignment.matching_quotes = vec![quote.clone()];
            alignment.contrarian = Some(ContrarianPick {
                quote: quote.clone(),
                why: why.to_string(),
            });
            alignment
        })
        .collect()
}

/// Builds the profile for `answers` and recommends primary and contrarian
/// episodes from `catalog`. No slug appears twice across both lists.
pub fn generate_recommendations(
    answers: &QuizAnswers,
    catalog: &Catalog,
    matrix: &ScoringMatrix,
    options: RecommendationOptions,
) -> Recommendations {
    let user_profile = build_profile(answers, matrix);
    let scored = score_episodes(&user_profile, catalog);

    let primary = select_primary(&scored, options.primary_limit);
    let used: HashSet<&str> = primary.iter().map(|p| p.slug.as_str()).collect();
    let contrarian = select_contrarian(&user_profile, &scored, &used, options.contrarian_limit);

    tracing::debug!(
        primary_zone = %user_profile.primary_zone,
        blind_spot = %user_profile.blind_spot_zone,
        candidates = scored.len(),
        primary = primary.len(),
        contrarian = contrarian.len(),
        "Recommendations generated"
    );

    Recommendations {
        user_profile,
        primary,
        contrarian,
    }
}

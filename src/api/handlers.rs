use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{
        zone_taxonomy, ContrarianCandidate, QuizAnswers, QuizQuestion, Quote, Recommendations,
        UserProfile, ZoneId, ZoneInfo, ZoneMap,
    },
    services::{
        catalog::{CatalogEntry, ThemeCount},
        recommendations::generate_recommendations,
        scoring::{build_profile, ScoringMatrix},
    },
};

use super::AppState;

/// Fewest answers that still yield a usable profile (the short seven-question quiz)
pub const MIN_ANSWERS: usize = 7;
const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_SEARCH_LIMIT: usize = 100;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub answers: QuizAnswers,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub answers: QuizAnswers,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeQuery {
    pub zone: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub slug: String,
    pub guest: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_type: Option<String>,
    pub themes: Vec<String>,
    pub zone_influence: ZoneMap<f64>,
}

impl From<&CatalogEntry> for EpisodeSummary {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            slug: entry.metadata.slug.clone(),
            guest: entry.metadata.guest.clone(),
            title: entry.metadata.title.clone(),
            guest_type: entry.metadata.guest_type.clone(),
            themes: entry.enrichment.themes.clone(),
            zone_influence: entry.enrichment.zone_influence,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDetail {
    #[serde(flatten)]
    pub summary: EpisodeSummary,
    pub takeaways: Vec<String>,
    pub quotes: Vec<Quote>,
    pub contrarian_candidates: Vec<ContrarianCandidate>,
}

impl From<&CatalogEntry> for EpisodeDetail {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            summary: EpisodeSummary::from(entry),
            takeaways: entry.enrichment.takeaways.clone(),
            quotes: entry.enrichment.quotes.clone(),
            contrarian_candidates: entry.enrichment.contrarian_candidates.clone(),
        }
    }
}

/// Rejects answer sets the quiz UI could not have produced
fn validate_answers(answers: &QuizAnswers, matrix: &ScoringMatrix) -> AppResult<()> {
    let max_answers = matrix.questions().len();
    if answers.len() < MIN_ANSWERS || answers.len() > max_answers {
        return Err(AppError::InvalidInput(format!(
            "Expected between {} and {} answers, got {}",
            MIN_ANSWERS,
            max_answers,
            answers.len()
        )));
    }

    for (question_id, option_id) in answers.iter() {
        let Some(question) = matrix.question(question_id) else {
            let message = format!("Unknown question: {}", question_id);
            return Err(AppError::InvalidInput(message));
        };
        if question.option(option_id).is_none() {
            return Err(AppError::InvalidInput(format!(
                "Unknown option '{}' for question {}",
                option_id, question_id
            )));
        }
    }

    Ok(())
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "episodes": state.catalog.len(),
        "lastUpdated": state.catalog.last_updated(),
    }))
}

/// Zone taxonomy
pub async fn get_zones() -> Json<Vec<ZoneInfo>> {
    Json(zone_taxonomy())
}

/// Question bank, without scoring weights
pub async fn get_quiz(State(state): State<AppState>) -> Json<QuizResponse> {
    Json(QuizResponse {
        questions: state.matrix.questions().to_vec(),
    })
}

/// Build a profile from quiz answers
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> AppResult<Json<UserProfile>> {
    validate_answers(&request.answers, &state.matrix)?;
    Ok(Json(build_profile(&request.answers, &state.matrix)))
}

/// Primary and contrarian episode recommendations for quiz answers
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Recommendations>> {
    validate_answers(&request.answers, &state.matrix)?;

    let options = match request.limit {
        Some(limit) => state.options.with_primary_limit(limit),
        None => state.options,
    };

    let recommendations =
        generate_recommendations(&request.answers, &state.catalog, &state.matrix, options);

    tracing::info!(
        answers = request.answers.len(),
        primary_zone = %recommendations.user_profile.primary_zone,
        primary = recommendations.primary.len(),
        contrarian = recommendations.contrarian.len(),
        "Recommendations served"
    );

    Ok(Json(recommendations))
}

/// Browse episodes, optionally filtered by zone and theme
pub async fn list_episodes(
    State(state): State<AppState>,
    Query(query): Query<EpisodeQuery>,
) -> AppResult<Json<Vec<EpisodeSummary>>> {
    let zone = query
        .zone
        .as_deref()
        .map(str::parse::<ZoneId>)
        .transpose()
        .map_err(AppError::InvalidInput)?;

    let episodes: Vec<EpisodeSummary> = state
        .catalog
        .browse(zone, query.theme.as_deref())
        .into_iter()
        .map(EpisodeSummary::from)
        .collect();

    Ok(Json(episodes))
}

/// Single episode with quotes and takeaways
pub async fn get_episode(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<EpisodeDetail>> {
    state
        .catalog
        .episode(&slug)
        .map(|entry| Json(EpisodeDetail::from(entry)))
        .ok_or_else(|| AppError::NotFound(format!("Episode '{}'", slug)))
}

/// Themes with episode counts
pub async fn get_themes(State(state): State<AppState>) -> Json<Vec<ThemeCount>> {
    Json(state.catalog.theme_counts())
}

/// Search quotes by text, speaker or theme
pub async fn search_quotes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Quote>>> {
    let needle = query.q.as_deref().map(str::trim).unwrap_or_default();
    if needle.is_empty() {
        return Err(AppError::InvalidInput(
            "Query parameter 'q' is required".to_string(),
        ));
    }

    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let quotes = state
        .catalog
        .search_quotes(needle, limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(quotes))
}

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id::{request_span, MakeUuidRequestId};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Quiz & profile
        .route("/zones", get(handlers::get_zones))
        .route("/quiz", get(handlers::get_quiz))
        .route("/profile", post(handlers::create_profile))
        .route("/recommendations", post(handlers::recommend))
        // Browsing & search
        .route("/episodes", get(handlers::list_episodes))
        .route("/episodes/:slug", get(handlers::get_episode))
        .route("/themes", get(handlers::get_themes))
        .route("/quotes/search", get(handlers::search_quotes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeUuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

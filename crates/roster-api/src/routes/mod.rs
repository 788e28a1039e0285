//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{celebrities, health, mbti, search, votes};
use crate::state::AppState;

/// API routes (health probes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(vote_routes())
        .merge(search_routes())
        .merge(mbti_routes())
        .merge(celebrity_routes())
}

fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/votes", post(votes::cast_vote).get(votes::list_votes))
        // Fixed segments before the `:vote_id` capture
        .route("/votes/my-votes", get(votes::list_my_votes))
        .route("/votes/popular-celebrities", get(votes::popular_celebrities))
        .route(
            "/votes/statistics/celebrity/:celebrity_id",
            get(votes::celebrity_statistics),
        )
        .route("/votes/statistics/my-stats", get(votes::my_statistics))
        .route("/votes/statistics/user/:user_id", get(votes::user_statistics))
        .route("/votes/user/:user_id", get(votes::list_user_votes))
        .route("/votes/celebrity/:celebrity_id", get(votes::list_celebrity_votes))
        .route("/votes/:vote_id", get(votes::get_vote).delete(votes::delete_vote))
}

fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search))
        .route("/search/suggestions", get(search::suggestions))
        .route("/search/analytics", get(search::analytics))
        .route("/search/popular-searches", get(search::popular_searches))
}

fn mbti_routes() -> Router<AppState> {
    Router::new()
        .route("/mbti/types", get(mbti::list_types))
        .route("/mbti/types/:code", get(mbti::get_type))
        .route("/mbti/validate/:code", get(mbti::validate_type))
}

fn celebrity_routes() -> Router<AppState> {
    Router::new().route("/celebrities/:celebrity_id", get(celebrities::get_celebrity))
}

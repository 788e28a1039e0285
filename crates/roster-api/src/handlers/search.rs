//! Search handlers

use axum::{extract::State, Json};
use roster_service::dto::{
    PopularSearchesResponse, SearchAnalyticsResponse, SearchParams, SearchResponse,
    SuggestionParams, SuggestionsResponse,
};
use roster_service::SearchService;

use crate::extractors::{Pagination, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// Ranked celebrity search
///
/// GET /search?q=&search_type=&mbti_type=&tag_filter=&popularity_filter=&skip=&limit=
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
    pagination: Pagination,
) -> ApiResult<Json<SearchResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service
        .search(params, pagination.skip, pagination.limit)
        .await?;
    Ok(Json(response))
}

/// GET /search/suggestions?q=&limit=
pub async fn suggestions(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SuggestionParams>,
    pagination: Pagination,
) -> ApiResult<Json<SuggestionsResponse>> {
    let service = SearchService::new(state.service_context());
    Ok(Json(service.suggestions(params, pagination.limit).await?))
}

/// GET /search/analytics
pub async fn analytics(State(state): State<AppState>) -> ApiResult<Json<SearchAnalyticsResponse>> {
    let service = SearchService::new(state.service_context());
    Ok(Json(service.analytics().await?))
}

/// GET /search/popular-searches?limit=
pub async fn popular_searches(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PopularSearchesResponse>> {
    let service = SearchService::new(state.service_context());
    Ok(Json(service.popular_searches(pagination.limit).await?))
}

//! Vote handlers
//!
//! Casting, deleting and listing votes, plus vote statistics.

use axum::{extract::State, Json};
use roster_service::dto::{
    CastVoteRequest, CelebrityVoteStatsResponse, PaginatedResponse, PopularCelebrityResponse,
    UserVoteStatsResponse, VoteListParams, VoteResponse,
};
use roster_service::{StatsService, VoteService};

use crate::extractors::{AuthUser, Pagination, QueryParams, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Cast a vote
///
/// POST /votes
pub async fn cast_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CastVoteRequest>,
) -> ApiResult<Created<Json<VoteResponse>>> {
    let service = VoteService::new(state.service_context());
    let vote = service.cast_vote(auth.user_id, request).await?;
    Ok(Created(Json(vote)))
}

/// Delete one of the caller's votes
///
/// DELETE /votes/{vote_id}
pub async fn delete_vote(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(vote_id): SnowflakePath,
) -> ApiResult<NoContent> {
    let service = VoteService::new(state.service_context());
    service.delete_vote(vote_id, auth.user_id).await?;
    Ok(NoContent)
}

/// GET /votes/{vote_id}
pub async fn get_vote(
    State(state): State<AppState>,
    SnowflakePath(vote_id): SnowflakePath,
) -> ApiResult<Json<VoteResponse>> {
    let service = VoteService::new(state.service_context());
    Ok(Json(service.get_vote(vote_id).await?))
}

/// List votes, optionally filtered by celebrity, user and type
///
/// GET /votes
pub async fn list_votes(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<VoteListParams>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<VoteResponse>>> {
    let service = VoteService::new(state.service_context());
    let page = service
        .list_votes(params, pagination.skip, pagination.limit)
        .await?;
    Ok(Json(page))
}

/// GET /votes/my-votes
pub async fn list_my_votes(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<VoteResponse>>> {
    let service = VoteService::new(state.service_context());
    let page = service
        .list_user_votes(auth.user_id, pagination.skip, pagination.limit)
        .await?;
    Ok(Json(page))
}

/// GET /votes/user/{user_id}
pub async fn list_user_votes(
    State(state): State<AppState>,
    SnowflakePath(user_id): SnowflakePath,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<VoteResponse>>> {
    let service = VoteService::new(state.service_context());
    let page = service
        .list_user_votes(user_id, pagination.skip, pagination.limit)
        .await?;
    Ok(Json(page))
}

/// GET /votes/celebrity/{celebrity_id}
pub async fn list_celebrity_votes(
    State(state): State<AppState>,
    SnowflakePath(celebrity_id): SnowflakePath,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<VoteResponse>>> {
    let service = VoteService::new(state.service_context());
    let page = service
        .list_celebrity_votes(celebrity_id, pagination.skip, pagination.limit)
        .await?;
    Ok(Json(page))
}

/// GET /votes/statistics/celebrity/{celebrity_id}
pub async fn celebrity_statistics(
    State(state): State<AppState>,
    SnowflakePath(celebrity_id): SnowflakePath,
) -> ApiResult<Json<CelebrityVoteStatsResponse>> {
    let service = StatsService::new(state.service_context());
    Ok(Json(service.celebrity_statistics(celebrity_id).await?))
}

/// GET /votes/statistics/my-stats
pub async fn my_statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserVoteStatsResponse>> {
    let service = StatsService::new(state.service_context());
    Ok(Json(service.user_statistics(auth.user_id).await?))
}

/// GET /votes/statistics/user/{user_id}
pub async fn user_statistics(
    State(state): State<AppState>,
    SnowflakePath(user_id): SnowflakePath,
) -> ApiResult<Json<UserVoteStatsResponse>> {
    let service = StatsService::new(state.service_context());
    Ok(Json(service.user_statistics(user_id).await?))
}

/// Most voted celebrities
///
/// GET /votes/popular-celebrities?limit=
pub async fn popular_celebrities(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PopularCelebrityResponse>>> {
    let service = StatsService::new(state.service_context());
    Ok(Json(service.popular_celebrities(pagination.limit).await?))
}

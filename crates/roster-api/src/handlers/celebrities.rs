//! Celebrity handlers

use axum::{extract::State, Json};
use roster_service::dto::CelebrityDetailResponse;
use roster_service::CelebrityService;

use crate::extractors::SnowflakePath;
use crate::response::ApiResult;
use crate::state::AppState;

/// Celebrity with its tags
///
/// GET /celebrities/{celebrity_id}
pub async fn get_celebrity(
    State(state): State<AppState>,
    SnowflakePath(celebrity_id): SnowflakePath,
) -> ApiResult<Json<CelebrityDetailResponse>> {
    let service = CelebrityService::new(state.service_context());
    Ok(Json(service.get_celebrity(celebrity_id).await?))
}

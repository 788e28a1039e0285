//! MBTI catalogue handlers

use axum::{extract::Path, Json};
use roster_service::dto::{MbtiTypeResponse, MbtiTypesResponse, MbtiValidationResponse};
use roster_service::MbtiService;

use crate::response::ApiResult;

/// GET /mbti/types
pub async fn list_types() -> Json<MbtiTypesResponse> {
    Json(MbtiService::new().list_types())
}

/// GET /mbti/types/{code}
pub async fn get_type(Path(code): Path<String>) -> ApiResult<Json<MbtiTypeResponse>> {
    Ok(Json(MbtiService::new().get_type(&code)?))
}

/// Whether a code names one of the 16 types
///
/// GET /mbti/validate/{code}
pub async fn validate_type(Path(code): Path<String>) -> Json<MbtiValidationResponse> {
    Json(MbtiService::new().validate_type(&code))
}

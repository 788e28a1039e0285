//! Pagination extractor
//!
//! Extracts offset pagination parameters from query strings. Each endpoint
//! applies its own default and maximum limit.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub skip: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Offset pagination; `limit` stays unset when the client omits it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: Option<i64>,
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let skip = params.skip.unwrap_or(0);
        if skip < 0 {
            return Err(ApiError::invalid_query("skip must be greater than or equal to 0"));
        }
        if params.limit.is_some_and(|l| l < 1) {
            return Err(ApiError::invalid_query("limit must be at least 1"));
        }

        Ok(Pagination {
            skip,
            limit: params.limit,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        let pagination = Pagination::try_from(PaginationParams::default()).unwrap();
        assert_eq!(pagination, Pagination { skip: 0, limit: None });
    }

    #[test]
    fn test_pagination_rejects_negative_values() {
        let params = PaginationParams {
            skip: Some(-1),
            limit: None,
        };
        assert!(Pagination::try_from(params).is_err());

        let params = PaginationParams {
            skip: None,
            limit: Some(0),
        };
        assert!(Pagination::try_from(params).is_err());
    }

    #[test]
    fn test_pagination_from_params() {
        let params = PaginationParams {
            skip: Some(20),
            limit: Some(25),
        };

        let pagination = Pagination::try_from(params).unwrap();
        assert_eq!(pagination.skip, 20);
        assert_eq!(pagination.limit, Some(25));
    }
}

//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query-string parameter sets
//! implement `Deserialize` only and are checked by the services.

use roster_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

use crate::services::error::{ServiceError, ServiceResult};

// ============================================================================
// Vote Requests
// ============================================================================

/// Cast vote request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CastVoteRequest {
    pub celebrity_id: Snowflake,

    /// One of the 16 codes, any case
    #[validate(length(min = 4, max = 16, message = "mbti_type must be one of the 16 type codes"))]
    pub mbti_type: String,

    /// Blank reasons are stored as absent
    pub reason: Option<String>,
}

/// Filters for listing votes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteListParams {
    pub celebrity_id: Option<Snowflake>,
    pub user_id: Option<Snowflake>,
    pub mbti_type: Option<String>,
}

// ============================================================================
// Search Requests
// ============================================================================

/// Search query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: String,
    /// all | name | description | tag | mbti (default all)
    pub search_type: Option<String>,
    pub mbti_type: Option<String>,
    pub tag_filter: Option<String>,
    /// popular | recent | all (default all)
    pub popularity_filter: Option<String>,
}

/// Autocomplete query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
}

// ============================================================================
// Paging
// ============================================================================

/// Offset paging window, checked against per-endpoint bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Resolve raw `skip`/`limit` values.
    ///
    /// A missing limit takes `default`; a negative skip or a limit outside
    /// `1..=max` is a validation error.
    pub fn resolve(skip: i64, limit: Option<i64>, default: i64, max: i64) -> ServiceResult<Self> {
        if skip < 0 {
            return Err(ServiceError::validation("skip must be greater than or equal to 0"));
        }
        let limit = limit.unwrap_or(default);
        if !(1..=max).contains(&limit) {
            return Err(ServiceError::validation(format!(
                "limit must be between 1 and {max}"
            )));
        }
        Ok(Self { skip, limit })
    }

    /// Resolve a bare limit with no offset
    pub fn limit_only(limit: Option<i64>, default: i64, max: i64) -> ServiceResult<Self> {
        Self::resolve(0, limit, default, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_vote_request_validation() {
        let request: CastVoteRequest = serde_json::from_str(
            r#"{"celebrity_id": "123", "mbti_type": "intj", "reason": "calm"}"#,
        )
        .unwrap();
        assert_eq!(request.celebrity_id, Snowflake::new(123));
        assert!(request.validate().is_ok());

        let request: CastVoteRequest =
            serde_json::from_str(r#"{"celebrity_id": 123, "mbti_type": "X"}"#).unwrap();
        assert!(request.validate().is_err());
        assert!(request.reason.is_none());
    }

    #[test]
    fn test_page_request_defaults_and_bounds() {
        let page = PageRequest::resolve(0, None, 50, 100).unwrap();
        assert_eq!(page, PageRequest { skip: 0, limit: 50 });

        assert!(PageRequest::resolve(-1, None, 50, 100).is_err());
        assert!(PageRequest::resolve(0, Some(0), 50, 100).is_err());
        assert!(PageRequest::resolve(0, Some(101), 50, 100).is_err());
        assert_eq!(PageRequest::limit_only(Some(20), 10, 20).unwrap().limit, 20);
    }
}

//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Celebrity not found: {0}")]
    CelebrityNotFound(Snowflake),

    #[error("Vote not found: {0}")]
    VoteNotFound(Snowflake),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid MBTI type: {0}")]
    InvalidMbtiType(String),

    #[error("Reason too long: max {max} characters")]
    ReasonTooLong { max: usize },

    #[error("Search query cannot be empty")]
    EmptySearchQuery,

    #[error("Invalid search type: {0}")]
    InvalidSearchType(String),

    #[error("Invalid popularity filter: {0}")]
    InvalidPopularityFilter(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Can only delete your own votes")]
    NotVoteOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("You have already voted for this celebrity")]
    DuplicateVote,

    #[error("Tag already exists: {0}")]
    DuplicateTag(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Daily vote limit reached ({limit} votes per day)")]
    DailyVoteLimitReached { limit: i32 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::CelebrityNotFound(_) => "UNKNOWN_CELEBRITY",
            Self::VoteNotFound(_) => "UNKNOWN_VOTE",
            Self::TagNotFound(_) => "UNKNOWN_TAG",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidMbtiType(_) => "INVALID_MBTI_TYPE",
            Self::ReasonTooLong { .. } => "REASON_TOO_LONG",
            Self::EmptySearchQuery => "EMPTY_SEARCH_QUERY",
            Self::InvalidSearchType(_) => "INVALID_SEARCH_TYPE",
            Self::InvalidPopularityFilter(_) => "INVALID_POPULARITY_FILTER",

            // Authorization
            Self::NotVoteOwner => "NOT_VOTE_OWNER",

            // Conflict
            Self::DuplicateVote => "DUPLICATE_VOTE",
            Self::DuplicateTag(_) => "DUPLICATE_TAG",

            // Business Rules
            Self::DailyVoteLimitReached { .. } => "DAILY_VOTE_LIMIT_REACHED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CelebrityNotFound(_) | Self::VoteNotFound(_) | Self::TagNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidMbtiType(_)
                | Self::ReasonTooLong { .. }
                | Self::EmptySearchQuery
                | Self::InvalidSearchType(_)
                | Self::InvalidPopularityFilter(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotVoteOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateVote | Self::DuplicateTag(_))
    }

    /// Check if this is a quota error
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::DailyVoteLimitReached { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::CelebrityNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_CELEBRITY");

        let err = DomainError::DailyVoteLimitReached { limit: 10 };
        assert_eq!(err.code(), "DAILY_VOTE_LIMIT_REACHED");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::VoteNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::DuplicateVote.is_conflict());
        assert!(DomainError::NotVoteOwner.is_authorization());
        assert!(DomainError::EmptySearchQuery.is_validation());
        assert!(DomainError::DailyVoteLimitReached { limit: 10 }.is_quota_exceeded());
        assert!(!DomainError::DailyVoteLimitReached { limit: 10 }.is_validation());
        assert!(!DomainError::DuplicateVote.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::VoteNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Vote not found: 123");

        let err = DomainError::DailyVoteLimitReached { limit: 10 };
        assert_eq!(err.to_string(), "Daily vote limit reached (10 votes per day)");
    }
}

//! Errors raised outside the domain: token checks, startup wiring, and
//! domain errors carried through to the HTTP layer.

use roster_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Pool creation or migration failure at startup
    #[error("Database error: {0}")]
    Database(String),

    /// Bad listen address or a server that failed to bind
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidToken | Self::TokenExpired => 401,
            Self::Domain(e) => domain_status(e),
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Domain(e) => e.code(),
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// HTTP status for a domain error.
///
/// A reached daily quota is a client error (400), not a rate limit.
#[must_use]
pub fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_authorization() {
        403
    } else if e.is_validation() || e.is_quota_exceeded() {
        400
    } else if e.is_conflict() {
        409
    } else {
        500
    }
}

pub type AppResult<T> = Result<T, AppError>;

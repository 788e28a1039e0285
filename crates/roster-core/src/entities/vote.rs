//! Vote entity - one user's MBTI verdict on one celebrity

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DomainError;
use crate::value_objects::{MbtiType, Snowflake};

/// Longest accepted vote reason, in characters
pub const MAX_REASON_CHARS: usize = 1000;

/// Stored vote. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub celebrity_id: Snowflake,
    pub mbti_type: MbtiType,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// The UTC calendar day the vote counts against
    #[inline]
    pub fn vote_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    #[inline]
    pub fn has_reason(&self) -> bool {
        self.reason.is_some()
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

/// A vote about to be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub celebrity_id: Snowflake,
    pub mbti_type: MbtiType,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewVote {
    /// Build a vote stamped with the current time.
    ///
    /// A blank reason is stored as absent; an over-long one is rejected.
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        celebrity_id: Snowflake,
        mbti_type: MbtiType,
        reason: Option<String>,
    ) -> Result<Self, DomainError> {
        let reason = normalize_reason(reason)?;
        Ok(Self {
            id,
            user_id,
            celebrity_id,
            mbti_type,
            reason,
            created_at: Utc::now(),
        })
    }

    #[inline]
    pub fn vote_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    #[inline]
    pub fn has_reason(&self) -> bool {
        self.reason.is_some()
    }

    pub fn into_vote(self) -> Vote {
        Vote {
            id: self.id,
            user_id: self.user_id,
            celebrity_id: self.celebrity_id,
            mbti_type: self.mbti_type,
            reason: self.reason,
            created_at: self.created_at,
        }
    }
}

fn normalize_reason(reason: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(reason) = reason else {
        return Ok(None);
    };
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_REASON_CHARS {
        return Err(DomainError::ReasonTooLong {
            max: MAX_REASON_CHARS,
        });
    }
    Ok(Some(trimmed.to_string()))
}

//! Vote database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub id: i64,
    pub user_id: i64,
    pub celebrity_id: i64,
    pub mbti_type: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregated vote count per type (from query)
#[derive(Debug, Clone, FromRow)]
pub struct MbtiCountModel {
    pub mbti_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct CelebrityVoteTotalModel {
    pub celebrity_id: i64,
    pub total: i64,
}

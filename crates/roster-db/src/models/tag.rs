//! Tag database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tags table
#[derive(Debug, Clone, FromRow)]
pub struct TagModel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Tag row joined with the celebrity it is attached to
#[derive(Debug, Clone, FromRow)]
pub struct CelebrityTagModel {
    pub celebrity_id: i64,
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TagUsageModel {
    pub name: String,
    pub count: i64,
}

//! Celebrity database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for celebrities table
#[derive(Debug, Clone, FromRow)]
pub struct CelebrityModel {
    pub id: i64,
    pub name: String,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A celebrity row with the relevance and vote total computed by a search
#[derive(Debug, Clone, FromRow)]
pub struct ScoredCelebrityModel {
    #[sqlx(flatten)]
    pub celebrity: CelebrityModel,
    pub relevance_score: i64,
    pub total_votes: i64,
}

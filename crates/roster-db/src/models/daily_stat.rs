//! Daily vote counter database model

use chrono::NaiveDate;
use sqlx::FromRow;

/// Database model for daily_user_stats table
#[derive(Debug, Clone, FromRow)]
pub struct DailyStatModel {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub votes_count: i32,
    pub votes_no_reason_count: i32,
}

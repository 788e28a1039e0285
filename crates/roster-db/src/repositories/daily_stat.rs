//! PostgreSQL implementation of DailyStatRepository (read side)
//!
//! Counters are written only by the vote transactions in `vote.rs`.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::DailyStat;
use roster_core::traits::{DailyStatRepository, RepoResult};
use roster_core::value_objects::Snowflake;

use crate::models::DailyStatModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgDailyStatRepository {
    pool: PgPool,
}

impl PgDailyStatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DailyStatRepository for PgDailyStatRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: Snowflake, date: NaiveDate) -> RepoResult<Option<DailyStat>> {
        let result = sqlx::query_as::<_, DailyStatModel>(
            r#"
            SELECT id, user_id, date, votes_count, votes_no_reason_count
            FROM daily_user_stats
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(DailyStat::from))
    }

    #[instrument(skip(self))]
    async fn recent(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<DailyStat>> {
        let results = sqlx::query_as::<_, DailyStatModel>(
            r#"
            SELECT id, user_id, date, votes_count, votes_no_reason_count
            FROM daily_user_stats
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DailyStat::from).collect())
    }
}

//! PostgreSQL implementation of VoteRepository
//!
//! `record_vote` and `remove_vote` touch `votes` and `daily_user_stats` in one
//! transaction. The user's counter row for the day is upserted and locked by
//! a single `INSERT ... ON CONFLICT DO UPDATE ... RETURNING` before any check
//! runs, so concurrent votes and removals by the same user are serialized; the `(user_id, celebrity_id)` unique index
//! catches anything that slips past the duplicate check.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use roster_core::entities::{NewVote, Vote};
use roster_core::error::DomainError;
use roster_core::traits::{MbtiCount, RepoResult, VoteFilter, VoteRepository};
use roster_core::value_objects::Snowflake;

use crate::models::{CelebrityVoteTotalModel, DailyStatModel, MbtiCountModel, VoteModel};

use super::error::{map_db_error, map_unique_violation};

/// WHERE clause shared by filtered queries; binds $1..$4 in [`FilterBinds`] order
const FILTER_CLAUSE: &str = r#"
    WHERE ($1::BIGINT IS NULL OR user_id = $1)
      AND ($2::BIGINT IS NULL OR celebrity_id = $2)
      AND ($3::VARCHAR IS NULL OR mbti_type = $3)
      AND ($4::BOOLEAN IS NULL OR (reason IS NOT NULL) = $4)
"#;

struct FilterBinds {
    user_id: Option<i64>,
    celebrity_id: Option<i64>,
    mbti_type: Option<&'static str>,
    has_reason: Option<bool>,
}

impl From<&VoteFilter> for FilterBinds {
    fn from(filter: &VoteFilter) -> Self {
        Self {
            user_id: filter.user_id.map(Snowflake::into_inner),
            celebrity_id: filter.celebrity_id.map(Snowflake::into_inner),
            mbti_type: filter.mbti_type.map(|t| t.as_str()),
            has_reason: filter.has_reason,
        }
    }
}

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT id, user_id, celebrity_id, mbti_type, reason, created_at
            FROM votes
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Vote::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &VoteFilter, skip: i64, limit: i64) -> RepoResult<Vec<Vote>> {
        let binds = FilterBinds::from(filter);
        let sql = format!(
            "SELECT id, user_id, celebrity_id, mbti_type, reason, created_at FROM votes {FILTER_CLAUSE} \
             ORDER BY created_at DESC, id DESC OFFSET $5 LIMIT $6"
        );

        let results = sqlx::query_as::<_, VoteModel>(&sql)
            .bind(binds.user_id)
            .bind(binds.celebrity_id)
            .bind(binds.mbti_type)
            .bind(binds.has_reason)
            .bind(skip.max(0))
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Vote::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &VoteFilter) -> RepoResult<i64> {
        let binds = FilterBinds::from(filter);
        let sql = format!("SELECT COUNT(*) FROM votes {FILTER_CLAUSE}");

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(binds.user_id)
            .bind(binds.celebrity_id)
            .bind(binds.mbti_type)
            .bind(binds.has_reason)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn mbti_counts(&self, filter: &VoteFilter) -> RepoResult<Vec<MbtiCount>> {
        let binds = FilterBinds::from(filter);
        let sql = format!(
            "SELECT mbti_type, COUNT(*) AS count FROM votes {FILTER_CLAUSE} \
             GROUP BY mbti_type ORDER BY count DESC, mbti_type"
        );

        let results = sqlx::query_as::<_, MbtiCountModel>(&sql)
            .bind(binds.user_id)
            .bind(binds.celebrity_id)
            .bind(binds.mbti_type)
            .bind(binds.has_reason)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(MbtiCount::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn most_voted_celebrities(&self, limit: i64) -> RepoResult<Vec<(Snowflake, i64)>> {
        let results = sqlx::query_as::<_, CelebrityVoteTotalModel>(
            r#"
            SELECT celebrity_id, COUNT(*) AS total
            FROM votes
            GROUP BY celebrity_id
            ORDER BY total DESC, celebrity_id DESC
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|r| (Snowflake::new(r.celebrity_id), r.total))
            .collect())
    }

    #[instrument(skip(self, vote), fields(user_id = %vote.user_id, celebrity_id = %vote.celebrity_id))]
    async fn record_vote(&self, vote: &NewVote, daily_limit: i32) -> RepoResult<Vote> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let celebrity_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM celebrities WHERE id = $1)")
                .bind(vote.celebrity_id.into_inner())
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;
        if !celebrity_exists {
            return Err(DomainError::CelebrityNotFound(vote.celebrity_id));
        }

        // Create-or-lock the day's counter in one statement. A counter row
        // deleted concurrently by `remove_vote` is simply recreated here. A
        // new row takes the id of the vote that opens it.
        let stat = sqlx::query_as::<_, DailyStatModel>(
            r#"
            INSERT INTO daily_user_stats (id, user_id, date, votes_count, votes_no_reason_count)
            VALUES ($1, $2, $3, 0, 0)
            ON CONFLICT (user_id, date)
            DO UPDATE SET votes_count = daily_user_stats.votes_count
            RETURNING id, user_id, date, votes_count, votes_no_reason_count
            "#,
        )
        .bind(vote.id.into_inner())
        .bind(vote.user_id.into_inner())
        .bind(vote.vote_date())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let already_voted = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM votes WHERE user_id = $1 AND celebrity_id = $2)",
        )
        .bind(vote.user_id.into_inner())
        .bind(vote.celebrity_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;
        if already_voted {
            return Err(DomainError::DuplicateVote);
        }

        if stat.votes_count >= daily_limit {
            return Err(DomainError::DailyVoteLimitReached { limit: daily_limit });
        }

        let inserted = sqlx::query_as::<_, VoteModel>(
            r#"
            INSERT INTO votes (id, user_id, celebrity_id, mbti_type, reason, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, celebrity_id, mbti_type, reason, created_at
            "#,
        )
        .bind(vote.id.into_inner())
        .bind(vote.user_id.into_inner())
        .bind(vote.celebrity_id.into_inner())
        .bind(vote.mbti_type.as_str())
        .bind(&vote.reason)
        .bind(vote.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateVote))?;

        sqlx::query(
            r#"
            UPDATE daily_user_stats
            SET votes_count = votes_count + 1,
                votes_no_reason_count = votes_no_reason_count + $2
            WHERE id = $1
            "#,
        )
        .bind(stat.id)
        .bind(i32::from(!vote.has_reason()))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(
            vote_id = %vote.id,
            mbti_type = %vote.mbti_type,
            votes_today = stat.votes_count + 1,
            "Vote recorded"
        );
        Vote::try_from(inserted)
    }

    #[instrument(skip(self))]
    async fn remove_vote(&self, vote_id: Snowflake, requester: Snowflake) -> RepoResult<Vote> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let vote = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT id, user_id, celebrity_id, mbti_type, reason, created_at
            FROM votes
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(vote_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::VoteNotFound(vote_id))
        .and_then(Vote::try_from)?;

        if !vote.is_owned_by(requester) {
            return Err(DomainError::NotVoteOwner);
        }

        sqlx::query("DELETE FROM votes WHERE id = $1")
            .bind(vote_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(
            r#"
            UPDATE daily_user_stats
            SET votes_count = GREATEST(votes_count - 1, 0),
                votes_no_reason_count = GREATEST(votes_no_reason_count - $3, 0)
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(vote.user_id.into_inner())
        .bind(vote.vote_date())
        .bind(i32::from(!vote.has_reason()))
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("DELETE FROM daily_user_stats WHERE user_id = $1 AND date = $2 AND votes_count <= 0")
            .bind(vote.user_id.into_inner())
            .bind(vote.vote_date())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        info!(vote_id = %vote.id, user_id = %vote.user_id, "Vote removed");
        Ok(vote)
    }
}

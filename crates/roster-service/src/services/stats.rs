//! Vote statistics service
//!
//! Per-celebrity and per-user MBTI distributions, quota usage and the most
//! voted celebrities.

use chrono::Utc;
use roster_core::{DomainError, Snowflake, VoteFilter};
use tracing::instrument;

use crate::dto::{
    mbti_distribution, CelebrityResponse, CelebrityVoteStatsResponse, DailyStatResponse,
    PageRequest, PopularCelebrityResponse, UserVoteStatsResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Daily rows reported in user statistics
pub const RECENT_DAYS: i64 = 7;
pub const DEFAULT_POPULAR_LIMIT: i64 = 10;
pub const MAX_POPULAR_LIMIT: i64 = 50;

/// Vote statistics service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn celebrity_statistics(
        &self,
        celebrity_id: Snowflake,
    ) -> ServiceResult<CelebrityVoteStatsResponse> {
        let celebrity = self
            .ctx
            .celebrity_repo()
            .find_by_id(celebrity_id)
            .await?
            .ok_or(DomainError::CelebrityNotFound(celebrity_id))?;

        let filter = VoteFilter::by_celebrity(celebrity_id);
        let votes = self.ctx.vote_repo();
        let total_votes = votes.count(&filter).await?;
        let votes_with_reason = votes.count(&filter.with_reason(true)).await?;
        let counts = votes.mbti_counts(&filter).await?;
        let top = counts.first().copied();

        Ok(CelebrityVoteStatsResponse {
            celebrity_id: celebrity.id.to_string(),
            celebrity_name: celebrity.name,
            total_votes,
            votes_with_reason,
            votes_without_reason: total_votes - votes_with_reason,
            mbti_distribution: mbti_distribution(&counts, total_votes),
            top_mbti_type: top.map(|c| c.mbti_type),
            top_mbti_count: top.map_or(0, |c| c.count),
        })
    }

    /// Statistics of one user; today's figures come from the daily counter
    #[instrument(skip(self))]
    pub async fn user_statistics(&self, user_id: Snowflake) -> ServiceResult<UserVoteStatsResponse> {
        let filter = VoteFilter::by_user(user_id);
        let votes = self.ctx.vote_repo();
        let total_votes = votes.count(&filter).await?;
        let counts = votes.mbti_counts(&filter).await?;
        let favorite = counts.first().copied();

        let limit = self.ctx.daily_vote_limit();
        let today = Utc::now().date_naive();
        let today_stat = self.ctx.daily_stat_repo().find(user_id, today).await?;
        let today_votes = today_stat.as_ref().map_or(0, |s| s.votes_count);
        let votes_remaining_today = today_stat.as_ref().map_or(limit.max(0), |s| s.remaining(limit));

        let recent = self
            .ctx
            .daily_stat_repo()
            .recent(user_id, RECENT_DAYS)
            .await?;

        Ok(UserVoteStatsResponse {
            user_id: user_id.to_string(),
            total_votes,
            today_votes,
            votes_remaining_today,
            daily_vote_limit: limit,
            mbti_distribution: mbti_distribution(&counts, total_votes),
            favorite_mbti_type: favorite.map(|c| c.mbti_type),
            favorite_mbti_count: favorite.map_or(0, |c| c.count),
            recent_daily_stats: recent.iter().map(DailyStatResponse::from).collect(),
        })
    }

    /// Celebrities with the most votes, each with its leading type
    #[instrument(skip(self))]
    pub async fn popular_celebrities(
        &self,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<PopularCelebrityResponse>> {
        let page = PageRequest::limit_only(limit, DEFAULT_POPULAR_LIMIT, MAX_POPULAR_LIMIT)?;
        let totals = self
            .ctx
            .vote_repo()
            .most_voted_celebrities(page.limit)
            .await?;

        let mut popular = Vec::with_capacity(totals.len());
        for (celebrity_id, vote_count) in totals {
            // Deleted between the two reads
            let Some(celebrity) = self.ctx.celebrity_repo().find_by_id(celebrity_id).await? else {
                continue;
            };
            let top_mbti = self
                .ctx
                .vote_repo()
                .mbti_counts(&VoteFilter::by_celebrity(celebrity_id))
                .await?
                .first()
                .map(|c| c.mbti_type);

            popular.push(PopularCelebrityResponse {
                celebrity: CelebrityResponse::from(celebrity),
                vote_count,
                top_mbti,
            });
        }
        Ok(popular)
    }
}

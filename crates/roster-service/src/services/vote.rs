//! Vote service
//!
//! Casting and deleting votes under the daily quota, and vote queries.

use roster_core::entities::NewVote;
use roster_core::{DomainError, MbtiType, Snowflake, VoteFilter};
use tracing::{info, instrument};

use crate::dto::{CastVoteRequest, PageRequest, PaginatedResponse, VoteListParams, VoteResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Default page size of vote listings
pub const DEFAULT_VOTE_PAGE: i64 = 100;
/// Largest page size of vote listings
pub const MAX_VOTE_PAGE: i64 = 1000;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Cast a vote for `user_id`.
    ///
    /// Fails with `CelebrityNotFound`, `DuplicateVote` or
    /// `DailyVoteLimitReached`, checked in that order inside one transaction.
    #[instrument(skip(self, request), fields(celebrity_id = %request.celebrity_id))]
    pub async fn cast_vote(
        &self,
        user_id: Snowflake,
        request: CastVoteRequest,
    ) -> ServiceResult<VoteResponse> {
        let mbti_type = parse_mbti(&request.mbti_type)?;
        let vote = NewVote::new(
            self.ctx.generate_id(),
            user_id,
            request.celebrity_id,
            mbti_type,
            request.reason,
        )?;

        let stored = self
            .ctx
            .vote_repo()
            .record_vote(&vote, self.ctx.daily_vote_limit())
            .await?;

        info!(vote_id = %stored.id, user_id = %user_id, "Vote cast");
        Ok(VoteResponse::from(stored))
    }

    /// Delete a vote owned by `requester`
    #[instrument(skip(self))]
    pub async fn delete_vote(&self, vote_id: Snowflake, requester: Snowflake) -> ServiceResult<()> {
        let removed = self.ctx.vote_repo().remove_vote(vote_id, requester).await?;
        info!(vote_id = %removed.id, celebrity_id = %removed.celebrity_id, "Vote deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_vote(&self, vote_id: Snowflake) -> ServiceResult<VoteResponse> {
        self.ctx
            .vote_repo()
            .find_by_id(vote_id)
            .await?
            .map(VoteResponse::from)
            .ok_or_else(|| DomainError::VoteNotFound(vote_id).into())
    }

    /// List votes matching the filters, newest first
    #[instrument(skip(self))]
    pub async fn list_votes(
        &self,
        params: VoteListParams,
        skip: i64,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<VoteResponse>> {
        let filter = VoteFilter {
            user_id: params.user_id,
            celebrity_id: params.celebrity_id,
            mbti_type: params.mbti_type.as_deref().map(parse_mbti).transpose()?,
            has_reason: None,
        };
        self.list(filter, skip, limit).await
    }

    #[instrument(skip(self))]
    pub async fn list_user_votes(
        &self,
        user_id: Snowflake,
        skip: i64,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<VoteResponse>> {
        self.list(VoteFilter::by_user(user_id), skip, limit).await
    }

    /// Votes on one celebrity; `CelebrityNotFound` when it does not exist
    #[instrument(skip(self))]
    pub async fn list_celebrity_votes(
        &self,
        celebrity_id: Snowflake,
        skip: i64,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<VoteResponse>> {
        if !self.ctx.celebrity_repo().exists(celebrity_id).await? {
            return Err(DomainError::CelebrityNotFound(celebrity_id).into());
        }
        self.list(VoteFilter::by_celebrity(celebrity_id), skip, limit)
            .await
    }

    async fn list(
        &self,
        filter: VoteFilter,
        skip: i64,
        limit: Option<i64>,
    ) -> ServiceResult<PaginatedResponse<VoteResponse>> {
        let page = PageRequest::resolve(skip, limit, DEFAULT_VOTE_PAGE, MAX_VOTE_PAGE)?;
        let votes = self
            .ctx
            .vote_repo()
            .list(&filter, page.skip, page.limit)
            .await?;
        Ok(PaginatedResponse::new(
            votes.iter().map(VoteResponse::from).collect(),
            page.skip,
            page.limit,
        ))
    }
}

/// Parse a type code at the service boundary
pub(crate) fn parse_mbti(code: &str) -> ServiceResult<MbtiType> {
    code.parse::<MbtiType>()
        .map_err(|_| ServiceError::from(DomainError::InvalidMbtiType(code.trim().to_string())))
}

//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL, or the in-memory store).

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::{Celebrity, CelebrityWithTags, DailyStat, NewVote, Tag, Vote};
use crate::error::DomainError;
use crate::search::{RankedCelebrity, SearchQuery};
use crate::value_objects::{MbtiType, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Number of votes cast for one MBTI type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MbtiCount {
    pub mbti_type: MbtiType,
    pub count: i64,
}

/// How many celebrities carry a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagUsage {
    pub name: String,
    pub count: i64,
}

// ============================================================================
// Celebrity Repository
// ============================================================================

#[async_trait]
pub trait CelebrityRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Celebrity>>;

    /// Find celebrity by ID together with its tags
    async fn find_with_tags(&self, id: Snowflake) -> RepoResult<Option<CelebrityWithTags>>;

    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    /// Create a new celebrity
    async fn create(&self, celebrity: &Celebrity) -> RepoResult<()>;

    /// Total number of celebrities
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Tag>>;

    /// Create a tag. Fails with `DuplicateTag` if the name is taken.
    async fn create(&self, tag: &Tag) -> RepoResult<()>;

    /// Return the tag with this name, creating it from `tag` if absent
    async fn find_or_create(&self, tag: &Tag) -> RepoResult<Tag>;

    /// Attach a tag to a celebrity (no-op if already attached)
    async fn attach(&self, celebrity_id: Snowflake, tag_id: Snowflake) -> RepoResult<()>;

    /// Tags of a celebrity, by name
    async fn find_by_celebrity(&self, celebrity_id: Snowflake) -> RepoResult<Vec<Tag>>;

    async fn count(&self) -> RepoResult<i64>;

    /// Tags attached to the most celebrities
    async fn most_used(&self, limit: i64) -> RepoResult<Vec<TagUsage>>;
}

// ============================================================================
// Vote Repository
// ============================================================================

/// Criteria for vote queries; unset fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteFilter {
    pub user_id: Option<Snowflake>,
    pub celebrity_id: Option<Snowflake>,
    pub mbti_type: Option<MbtiType>,
    pub has_reason: Option<bool>,
}

impl VoteFilter {
    pub fn by_user(user_id: Snowflake) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn by_celebrity(celebrity_id: Snowflake) -> Self {
        Self {
            celebrity_id: Some(celebrity_id),
            ..Self::default()
        }
    }

    pub fn with_reason(mut self, has_reason: bool) -> Self {
        self.has_reason = Some(has_reason);
        self
    }

    pub fn matches(&self, vote: &Vote) -> bool {
        self.user_id.map_or(true, |u| vote.user_id == u)
            && self.celebrity_id.map_or(true, |c| vote.celebrity_id == c)
            && self.mbti_type.map_or(true, |t| vote.mbti_type == t)
            && self.has_reason.map_or(true, |r| vote.has_reason() == r)
    }
}

#[async_trait]
pub trait VoteRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Vote>>;

    /// Votes matching `filter`, newest first
    async fn list(&self, filter: &VoteFilter, skip: i64, limit: i64) -> RepoResult<Vec<Vote>>;

    async fn count(&self, filter: &VoteFilter) -> RepoResult<i64>;

    /// Votes per MBTI type among votes matching `filter`, most votes first
    async fn mbti_counts(&self, filter: &VoteFilter) -> RepoResult<Vec<MbtiCount>>;

    /// Celebrity ids with the most votes, with their totals
    async fn most_voted_celebrities(&self, limit: i64) -> RepoResult<Vec<(Snowflake, i64)>>;

    /// Atomically record a vote and bump the voter's daily counters.
    ///
    /// Fails with `CelebrityNotFound`, `DuplicateVote` or
    /// `DailyVoteLimitReached { limit: daily_limit }`; on failure nothing
    /// is written.
    async fn record_vote(&self, vote: &NewVote, daily_limit: i32) -> RepoResult<Vote>;

    /// Atomically delete a vote owned by `requester` and decrement the daily
    /// counters of the vote's date, dropping the row when it reaches zero.
    ///
    /// Fails with `VoteNotFound` or `NotVoteOwner`; on failure nothing is
    /// written.
    async fn remove_vote(&self, vote_id: Snowflake, requester: Snowflake) -> RepoResult<Vote>;
}

// ============================================================================
// Daily Stat Repository
// ============================================================================

#[async_trait]
pub trait DailyStatRepository: Send + Sync {
    async fn find(&self, user_id: Snowflake, date: NaiveDate) -> RepoResult<Option<DailyStat>>;

    /// Most recent days first
    async fn recent(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<DailyStat>>;
}

// ============================================================================
// Search Repository
// ============================================================================

#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// One page of matches for `query`, with tags, scored and ordered as
    /// [`crate::search::rank`] does.
    async fn search(
        &self,
        query: &SearchQuery,
        skip: i64,
        limit: i64,
    ) -> RepoResult<Vec<RankedCelebrity>>;

    /// Celebrity names containing `needle`, case-insensitively
    async fn suggest_names(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>>;

    /// English names containing `needle`, case-insensitively
    async fn suggest_english_names(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>>;

    /// Tag names containing `needle`, case-insensitively
    async fn suggest_tags(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewVote;

    #[test]
    fn test_vote_filter_matches() {
        let vote = NewVote::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            MbtiType::Entp,
            None,
        )
        .unwrap()
        .into_vote();

        assert!(VoteFilter::default().matches(&vote));
        assert!(VoteFilter::by_user(Snowflake::new(10)).matches(&vote));
        assert!(!VoteFilter::by_user(Snowflake::new(11)).matches(&vote));
        assert!(VoteFilter::by_celebrity(Snowflake::new(20))
            .with_reason(false)
            .matches(&vote));
        assert!(!VoteFilter::by_celebrity(Snowflake::new(20))
            .with_reason(true)
            .matches(&vote));

        let typed = VoteFilter {
            mbti_type: Some(MbtiType::Intj),
            ..VoteFilter::default()
        };
        assert!(!typed.matches(&vote));
    }
}

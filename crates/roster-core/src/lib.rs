//! # roster-core
//!
//! Domain layer containing entities, value objects, search ranking rules and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod search;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Celebrity, CelebrityWithTags, DailyStat, NewVote, Tag, Vote, MAX_REASON_CHARS};
pub use error::DomainError;
pub use search::{
    MatchType, PopularityFilter, RankedCelebrity, SearchCandidate, SearchFilters, SearchQuery,
    SearchType,
};
pub use traits::{
    CelebrityRepository, DailyStatRepository, MbtiCount, RepoResult, SearchRepository,
    TagRepository, TagUsage, VoteFilter, VoteRepository,
};
pub use value_objects::{
    MbtiType, MbtiTypeInfo, MbtiTypeParseError, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};

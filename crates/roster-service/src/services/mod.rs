//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and turns repository
//! results into response DTOs.

pub mod celebrity;
pub mod context;
pub mod error;
pub mod mbti;
pub mod search;
pub mod stats;
pub mod vote;

pub use celebrity::{CelebrityService, NewCelebrity};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use mbti::MbtiService;
pub use search::SearchService;
pub use stats::StatsService;
pub use vote::VoteService;

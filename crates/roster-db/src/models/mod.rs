//! Database models - SQLx-compatible structs for PostgreSQL tables

mod celebrity;
mod daily_stat;
mod tag;
mod vote;

pub use celebrity::{CelebrityModel, ScoredCelebrityModel};
pub use daily_stat::DailyStatModel;
pub use tag::{CelebrityTagModel, TagModel, TagUsageModel};
pub use vote::{CelebrityVoteTotalModel, MbtiCountModel, VoteModel};

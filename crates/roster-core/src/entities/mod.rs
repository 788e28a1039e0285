//! Domain entities - core business objects

mod celebrity;
mod daily_stat;
mod tag;
mod vote;

pub use celebrity::{Celebrity, CelebrityWithTags};
pub use daily_stat::DailyStat;
pub use tag::Tag;
pub use vote::{NewVote, Vote, MAX_REASON_CHARS};

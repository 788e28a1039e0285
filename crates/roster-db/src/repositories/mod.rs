//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in roster-core.

mod celebrity;
mod daily_stat;
mod error;
mod search;
mod tag;
mod vote;

pub use celebrity::PgCelebrityRepository;
pub use daily_stat::PgDailyStatRepository;
pub use search::PgSearchRepository;
pub use tag::PgTagRepository;
pub use vote::PgVoteRepository;

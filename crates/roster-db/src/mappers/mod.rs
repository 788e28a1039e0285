//! Entity to model mappers
//!
//! Conversions between domain entities (roster-core) and database rows.
//! Rows whose enum columns hold unknown values fail to convert.

mod celebrity;
mod daily_stat;
mod tag;
mod vote;

pub use vote::parse_mbti;

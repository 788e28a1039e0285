//! Value objects - immutable types that represent domain concepts

mod mbti;
mod snowflake;

pub use mbti::{MbtiType, MbtiTypeInfo, MbtiTypeParseError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};

//! Vote entity <-> model mappers

use roster_core::entities::Vote;
use roster_core::error::DomainError;
use roster_core::traits::MbtiCount;
use roster_core::value_objects::{MbtiType, Snowflake};

use crate::models::{MbtiCountModel, VoteModel};

/// Parse a stored MBTI code; the CHECK constraint makes failure a data error
pub fn parse_mbti(raw: &str) -> Result<MbtiType, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::DatabaseError(format!("invalid mbti_type in row: {raw}")))
}

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        Ok(Vote {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            celebrity_id: Snowflake::new(model.celebrity_id),
            mbti_type: parse_mbti(&model.mbti_type)?,
            reason: model.reason,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<MbtiCountModel> for MbtiCount {
    type Error = DomainError;

    fn try_from(model: MbtiCountModel) -> Result<Self, Self::Error> {
        Ok(MbtiCount {
            mbti_type: parse_mbti(&model.mbti_type)?,
            count: model.count,
        })
    }
}

//! DailyStat entity <-> model mapper

use roster_core::entities::DailyStat;
use roster_core::value_objects::Snowflake;

use crate::models::DailyStatModel;

impl From<DailyStatModel> for DailyStat {
    fn from(model: DailyStatModel) -> Self {
        DailyStat {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            date: model.date,
            votes_count: model.votes_count,
            votes_no_reason_count: model.votes_no_reason_count,
        }
    }
}

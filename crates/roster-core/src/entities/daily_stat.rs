//! DailyStat entity - per-user, per-day vote counters used for the quota

use chrono::NaiveDate;

use crate::value_objects::Snowflake;

/// Aggregate of one user's votes on one UTC calendar day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStat {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub date: NaiveDate,
    pub votes_count: i32,
    pub votes_no_reason_count: i32,
}

impl DailyStat {
    /// Empty counters for a day that has no votes yet
    pub fn new(id: Snowflake, user_id: Snowflake, date: NaiveDate) -> Self {
        Self {
            id,
            user_id,
            date,
            votes_count: 0,
            votes_no_reason_count: 0,
        }
    }

    /// Votes left today under `limit`, never negative
    #[inline]
    pub fn remaining(&self, limit: i32) -> i32 {
        (limit - self.votes_count).max(0)
    }

    pub fn record(&mut self, has_reason: bool) {
        self.votes_count += 1;
        if !has_reason {
            self.votes_no_reason_count += 1;
        }
    }

    /// Undo one vote. Returns true when the row should be removed.
    pub fn retract(&mut self, has_reason: bool) -> bool {
        self.votes_count = (self.votes_count - 1).max(0);
        if !has_reason {
            self.votes_no_reason_count = (self.votes_no_reason_count - 1).max(0);
        }
        self.votes_count == 0
    }
}

//! Tag entity - free-form label attached to celebrities

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            description: None,
            created_at: Utc::now(),
        }
    }
}

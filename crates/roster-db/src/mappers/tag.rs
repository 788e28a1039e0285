//! Tag entity <-> model mappers

use roster_core::entities::Tag;
use roster_core::traits::TagUsage;
use roster_core::value_objects::Snowflake;

use crate::models::{CelebrityTagModel, TagModel, TagUsageModel};

impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag {
            id: Snowflake::new(model.id),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

impl From<CelebrityTagModel> for (Snowflake, Tag) {
    fn from(model: CelebrityTagModel) -> Self {
        (
            Snowflake::new(model.celebrity_id),
            Tag {
                id: Snowflake::new(model.id),
                name: model.name,
                description: model.description,
                created_at: model.created_at,
            },
        )
    }
}

impl From<TagUsageModel> for TagUsage {
    fn from(model: TagUsageModel) -> Self {
        TagUsage {
            name: model.name,
            count: model.count,
        }
    }
}

//! Celebrity entity - a public figure users vote on

use chrono::{DateTime, Utc};

use super::Tag;
use crate::value_objects::Snowflake;

/// Celebrity entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebrity {
    pub id: Snowflake,
    pub name: String,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Celebrity {
    /// Create a new Celebrity with only a display name
    pub fn new(id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            name_en: None,
            description: None,
            image_url: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_name_en(mut self, name_en: impl Into<String>) -> Self {
        self.name_en = Some(name_en.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Override the creation time (seeding and ordering tests)
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Celebrity together with its tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelebrityWithTags {
    pub celebrity: Celebrity,
    pub tags: Vec<Tag>,
}

impl CelebrityWithTags {
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }
}

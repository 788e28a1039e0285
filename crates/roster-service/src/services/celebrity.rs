//! Celebrity service
//!
//! Read access for the API, and catalogue seeding for tooling and tests.

use roster_core::entities::{Celebrity, Tag};
use roster_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::CelebrityDetailResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// New celebrity with tag names
#[derive(Debug, Clone, Default)]
pub struct NewCelebrity {
    pub name: String,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

/// Celebrity service
pub struct CelebrityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CelebrityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_celebrity(&self, celebrity_id: Snowflake) -> ServiceResult<CelebrityDetailResponse> {
        self.ctx
            .celebrity_repo()
            .find_with_tags(celebrity_id)
            .await?
            .map(CelebrityDetailResponse::from)
            .ok_or_else(|| DomainError::CelebrityNotFound(celebrity_id).into())
    }

    /// Store a celebrity and attach its tags, creating missing tags.
    ///
    /// Tag names are trimmed; blank and repeated names are skipped.
    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn create_celebrity(&self, new: NewCelebrity) -> ServiceResult<CelebrityDetailResponse> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Celebrity name must not be empty"));
        }

        let mut celebrity = Celebrity::new(self.ctx.generate_id(), name.to_string());
        celebrity.name_en = non_blank(new.name_en);
        celebrity.description = non_blank(new.description);
        celebrity.image_url = non_blank(new.image_url);
        self.ctx.celebrity_repo().create(&celebrity).await?;

        let mut seen = Vec::new();
        for tag_name in new.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if seen.contains(&tag_name) {
                continue;
            }
            seen.push(tag_name);
            let tag = self
                .ctx
                .tag_repo()
                .find_or_create(&Tag::new(self.ctx.generate_id(), tag_name.to_string()))
                .await?;
            self.ctx.tag_repo().attach(celebrity.id, tag.id).await?;
        }

        info!(celebrity_id = %celebrity.id, tags = seen.len(), "Celebrity created");
        self.get_celebrity(celebrity.id).await
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

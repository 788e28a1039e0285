//! PostgreSQL implementation of CelebrityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::{Celebrity, CelebrityWithTags, Tag};
use roster_core::search::fold;
use roster_core::traits::{CelebrityRepository, RepoResult};
use roster_core::value_objects::Snowflake;

use crate::models::{CelebrityModel, TagModel};

use super::error::map_db_error;

/// PostgreSQL implementation of CelebrityRepository
#[derive(Clone)]
pub struct PgCelebrityRepository {
    pool: PgPool,
}

impl PgCelebrityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CelebrityRepository for PgCelebrityRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Celebrity>> {
        let result = sqlx::query_as::<_, CelebrityModel>(
            r#"
            SELECT id, name, name_en, description, image_url, created_at, updated_at
            FROM celebrities
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Celebrity::from))
    }

    #[instrument(skip(self))]
    async fn find_with_tags(&self, id: Snowflake) -> RepoResult<Option<CelebrityWithTags>> {
        let Some(celebrity) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let tags = sqlx::query_as::<_, TagModel>(
            r#"
            SELECT t.id, t.name, t.description, t.created_at
            FROM tags t
            INNER JOIN celebrity_tags ct ON ct.tag_id = t.id
            WHERE ct.celebrity_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Some(CelebrityWithTags {
            celebrity,
            tags: tags.into_iter().map(Tag::from).collect(),
        }))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM celebrities WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, celebrity), fields(celebrity_id = %celebrity.id))]
    async fn create(&self, celebrity: &Celebrity) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO celebrities (id, name, name_en, description, image_url, created_at, updated_at,
                                     name_folded, name_en_folded, description_folded)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(celebrity.id.into_inner())
        .bind(&celebrity.name)
        .bind(&celebrity.name_en)
        .bind(&celebrity.description)
        .bind(&celebrity.image_url)
        .bind(celebrity.created_at)
        .bind(celebrity.updated_at)
        .bind(fold(&celebrity.name))
        .bind(celebrity.name_en.as_deref().map(fold))
        .bind(celebrity.description.as_deref().map(fold))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM celebrities")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCelebrityRepository>();
    }
}

//! PostgreSQL implementation of TagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use roster_core::entities::Tag;
use roster_core::error::DomainError;
use roster_core::search::fold;
use roster_core::traits::{RepoResult, TagRepository, TagUsage};
use roster_core::value_objects::Snowflake;

use crate::models::{TagModel, TagUsageModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TagRepository
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Tag>> {
        let result = sqlx::query_as::<_, TagModel>(
            "SELECT id, name, description, created_at FROM tags WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Tag::from))
    }

    #[instrument(skip(self, tag), fields(tag = %tag.name))]
    async fn create(&self, tag: &Tag) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tags (id, name, description, created_at, name_folded)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(tag.id.into_inner())
        .bind(&tag.name)
        .bind(&tag.description)
        .bind(tag.created_at)
        .bind(fold(&tag.name))
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateTag(tag.name.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, tag), fields(tag = %tag.name))]
    async fn find_or_create(&self, tag: &Tag) -> RepoResult<Tag> {
        sqlx::query(
            r#"
            INSERT INTO tags (id, name, description, created_at, name_folded)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(tag.id.into_inner())
        .bind(&tag.name)
        .bind(&tag.description)
        .bind(tag.created_at)
        .bind(fold(&tag.name))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.find_by_name(&tag.name)
            .await?
            .ok_or_else(|| DomainError::TagNotFound(tag.name.clone()))
    }

    #[instrument(skip(self))]
    async fn attach(&self, celebrity_id: Snowflake, tag_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO celebrity_tags (celebrity_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT (celebrity_id, tag_id) DO NOTHING
            "#,
        )
        .bind(celebrity_id.into_inner())
        .bind(tag_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_celebrity(&self, celebrity_id: Snowflake) -> RepoResult<Vec<Tag>> {
        let results = sqlx::query_as::<_, TagModel>(
            r#"
            SELECT t.id, t.name, t.description, t.created_at
            FROM tags t
            INNER JOIN celebrity_tags ct ON ct.tag_id = t.id
            WHERE ct.celebrity_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(celebrity_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn most_used(&self, limit: i64) -> RepoResult<Vec<TagUsage>> {
        let results = sqlx::query_as::<_, TagUsageModel>(
            r#"
            SELECT t.name, COUNT(ct.celebrity_id) AS count
            FROM tags t
            INNER JOIN celebrity_tags ct ON ct.tag_id = t.id
            GROUP BY t.id, t.name
            ORDER BY count DESC, t.name
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TagUsage::from).collect())
    }
}

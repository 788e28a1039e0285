//! PostgreSQL implementation of SearchRepository
//!
//! Scoring, ordering and paging run in SQL against the `*_folded` columns,
//! mirroring `roster_core::search::rank`; only the requested page is loaded
//! along with its tags.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use roster_core::entities::{Celebrity, Tag};
use roster_core::error::DomainError;
use roster_core::search::{fold, MatchType, PopularityFilter, RankedCelebrity, SearchQuery};
use roster_core::traits::{RepoResult, SearchRepository};
use roster_core::value_objects::{MbtiType, Snowflake};

use crate::models::{CelebrityTagModel, ScoredCelebrityModel};

use super::error::map_db_error;

/// Binds: $1 needle, $2 search type, $3 mbti target, $4 mbti filter,
/// $5 tag filter, $6 popularity ordering, $7 offset, $8 limit
const SEARCH_SQL: &str = r#"
    SELECT id, name, name_en, description, image_url, created_at, updated_at,
           relevance_score, total_votes
    FROM (
        SELECT c.id, c.name, c.name_en, c.description, c.image_url, c.created_at, c.updated_at,
               CASE
                   WHEN $2::TEXT = 'mbti' THEN (
                       SELECT COUNT(*) FROM votes v
                       WHERE v.celebrity_id = c.id AND v.mbti_type = $3::VARCHAR)
                   WHEN $2::TEXT IN ('all', 'name')
                        AND (c.name_folded = $1::TEXT OR c.name_en_folded = $1::TEXT) THEN 100
                   WHEN $2::TEXT IN ('all', 'name')
                        AND (strpos(c.name_folded, $1::TEXT) > 0
                             OR strpos(c.name_en_folded, $1::TEXT) > 0) THEN 80
                   WHEN $2::TEXT IN ('all', 'description')
                        AND strpos(c.description_folded, $1::TEXT) > 0 THEN 60
                   WHEN $2::TEXT IN ('all', 'tag') AND EXISTS (
                           SELECT 1 FROM celebrity_tags ct
                           INNER JOIN tags t ON t.id = ct.tag_id
                           WHERE ct.celebrity_id = c.id
                             AND strpos(t.name_folded, $1::TEXT) > 0) THEN 40
                   ELSE 0
               END::BIGINT AS relevance_score,
               (SELECT COUNT(*) FROM votes v WHERE v.celebrity_id = c.id) AS total_votes
        FROM celebrities c
        WHERE ($4::VARCHAR IS NULL OR EXISTS (
                  SELECT 1 FROM votes v
                  WHERE v.celebrity_id = c.id AND v.mbti_type = $4::VARCHAR))
          AND ($5::TEXT IS NULL OR EXISTS (
                  SELECT 1 FROM celebrity_tags ct
                  INNER JOIN tags t ON t.id = ct.tag_id
                  WHERE ct.celebrity_id = c.id AND strpos(t.name_folded, $5::TEXT) > 0))
    ) scored
    WHERE relevance_score > 0
    ORDER BY relevance_score DESC,
             CASE WHEN $6::BOOLEAN THEN total_votes ELSE 0 END DESC,
             created_at DESC,
             id DESC
    OFFSET $7
    LIMIT $8
"#;

#[derive(Clone)]
pub struct PgSearchRepository {
    pool: PgPool,
}

impl PgSearchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn tags_for(&self, ids: &[i64]) -> RepoResult<HashMap<Snowflake, Vec<Tag>>> {
        let rows = sqlx::query_as::<_, CelebrityTagModel>(
            r#"
            SELECT ct.celebrity_id, t.id, t.name, t.description, t.created_at
            FROM celebrity_tags ct
            INNER JOIN tags t ON t.id = ct.tag_id
            WHERE ct.celebrity_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut tags: HashMap<Snowflake, Vec<Tag>> = HashMap::new();
        for row in rows {
            let (celebrity_id, tag): (Snowflake, Tag) = row.into();
            tags.entry(celebrity_id).or_default().push(tag);
        }
        Ok(tags)
    }

    async fn suggest(&self, sql: &str, needle: &str, limit: i64) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(sql)
            .bind(fold(needle))
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl SearchRepository for PgSearchRepository {
    #[instrument(skip(self, query), fields(q = %query.text(), search_type = %query.search_type()))]
    async fn search(
        &self,
        query: &SearchQuery,
        skip: i64,
        limit: i64,
    ) -> RepoResult<Vec<RankedCelebrity>> {
        let search_type = query.search_type();
        let rows = sqlx::query_as::<_, ScoredCelebrityModel>(SEARCH_SQL)
            .bind(query.needle())
            .bind(search_type.as_str())
            .bind(query.mbti().map(MbtiType::as_str))
            .bind(query.filters.mbti_type.map(MbtiType::as_str))
            .bind(query.filters.tag.as_deref())
            .bind(query.filters.popularity == PopularityFilter::Popular)
            .bind(skip.max(0))
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
        debug!(rows = rows.len(), "Search page loaded");

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.celebrity.id).collect();
        let mut tags = self.tags_for(&ids).await?;

        rows.into_iter()
            .map(|row| -> RepoResult<RankedCelebrity> {
                let match_type = MatchType::from_score(search_type, row.relevance_score)
                    .ok_or_else(|| {
                        DomainError::DatabaseError(format!(
                            "unexpected relevance score {} for {search_type} search",
                            row.relevance_score
                        ))
                    })?;
                let celebrity = Celebrity::from(row.celebrity);
                Ok(RankedCelebrity {
                    tags: tags.remove(&celebrity.id).unwrap_or_default(),
                    celebrity,
                    relevance_score: row.relevance_score,
                    match_type,
                    total_votes: row.total_votes,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn suggest_names(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>> {
        self.suggest(
            "SELECT DISTINCT name FROM celebrities \
             WHERE strpos(name_folded, $1) > 0 ORDER BY name LIMIT $2",
            needle,
            limit,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn suggest_english_names(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>> {
        self.suggest(
            "SELECT DISTINCT name_en FROM celebrities \
             WHERE name_en IS NOT NULL AND strpos(name_en_folded, $1) > 0 \
             ORDER BY name_en LIMIT $2",
            needle,
            limit,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn suggest_tags(&self, needle: &str, limit: i64) -> RepoResult<Vec<String>> {
        self.suggest(
            "SELECT name FROM tags WHERE strpos(name_folded, $1) > 0 ORDER BY name LIMIT $2",
            needle,
            limit,
        )
        .await
    }
}

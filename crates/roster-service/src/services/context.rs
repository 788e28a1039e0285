//! Service context - dependency container for services
//!
//! Holds the repositories, voting and search settings, and the ID generator
//! needed by services.

use std::sync::Arc;

use roster_common::{SearchConfig, VotingConfig};
use roster_core::traits::{
    CelebrityRepository, DailyStatRepository, SearchRepository, TagRepository, VoteRepository,
};
use roster_core::{Snowflake, SnowflakeGenerator};
use roster_db::{
    InMemoryStore, PgCelebrityRepository, PgDailyStatRepository, PgPool, PgSearchRepository,
    PgTagRepository, PgVoteRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// The database pool is optional: contexts backed by [`InMemoryStore`] have
/// none.
#[derive(Clone)]
pub struct ServiceContext {
    pool: Option<PgPool>,

    celebrity_repo: Arc<dyn CelebrityRepository>,
    tag_repo: Arc<dyn TagRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    daily_stat_repo: Arc<dyn DailyStatRepository>,
    search_repo: Arc<dyn SearchRepository>,

    voting: VotingConfig,
    search: SearchConfig,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Context over PostgreSQL repositories sharing one pool
    pub fn postgres(
        pool: PgPool,
        voting: VotingConfig,
        search: SearchConfig,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            celebrity_repo: Arc::new(PgCelebrityRepository::new(pool.clone())),
            tag_repo: Arc::new(PgTagRepository::new(pool.clone())),
            vote_repo: Arc::new(PgVoteRepository::new(pool.clone())),
            daily_stat_repo: Arc::new(PgDailyStatRepository::new(pool.clone())),
            search_repo: Arc::new(PgSearchRepository::new(pool.clone())),
            pool: Some(pool),
            voting,
            search,
            snowflake_generator,
        }
    }

    /// Context over a single in-memory store with default settings
    pub fn in_memory(store: InMemoryStore) -> Self {
        Self {
            pool: None,
            celebrity_repo: Arc::new(store.clone()),
            tag_repo: Arc::new(store.clone()),
            vote_repo: Arc::new(store.clone()),
            daily_stat_repo: Arc::new(store.clone()),
            search_repo: Arc::new(store),
            voting: VotingConfig::default(),
            search: SearchConfig::default(),
            snowflake_generator: Arc::new(SnowflakeGenerator::new(0)),
        }
    }

    #[must_use]
    pub fn with_voting(mut self, voting: VotingConfig) -> Self {
        self.voting = voting;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    // === Database Pool ===

    /// The PostgreSQL pool, absent for in-memory contexts
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Probe the database; in-memory contexts are always healthy
    pub async fn database_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            None => true,
        }
    }

    // === Repositories ===

    pub fn celebrity_repo(&self) -> &dyn CelebrityRepository {
        self.celebrity_repo.as_ref()
    }

    pub fn tag_repo(&self) -> &dyn TagRepository {
        self.tag_repo.as_ref()
    }

    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    pub fn daily_stat_repo(&self) -> &dyn DailyStatRepository {
        self.daily_stat_repo.as_ref()
    }

    pub fn search_repo(&self) -> &dyn SearchRepository {
        self.search_repo.as_ref()
    }

    // === Settings ===

    /// Votes a user may cast per UTC day
    pub fn daily_vote_limit(&self) -> i32 {
        self.voting.daily_vote_limit
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    // === IDs ===

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("daily_vote_limit", &self.voting.daily_vote_limit)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    celebrity_repo: Option<Arc<dyn CelebrityRepository>>,
    tag_repo: Option<Arc<dyn TagRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    daily_stat_repo: Option<Arc<dyn DailyStatRepository>>,
    search_repo: Option<Arc<dyn SearchRepository>>,
    voting: Option<VotingConfig>,
    search: Option<SearchConfig>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn celebrity_repo(mut self, repo: Arc<dyn CelebrityRepository>) -> Self {
        self.celebrity_repo = Some(repo);
        self
    }

    pub fn tag_repo(mut self, repo: Arc<dyn TagRepository>) -> Self {
        self.tag_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn daily_stat_repo(mut self, repo: Arc<dyn DailyStatRepository>) -> Self {
        self.daily_stat_repo = Some(repo);
        self
    }

    pub fn search_repo(mut self, repo: Arc<dyn SearchRepository>) -> Self {
        self.search_repo = Some(repo);
        self
    }

    pub fn voting(mut self, voting: VotingConfig) -> Self {
        self.voting = Some(voting);
        self
    }

    pub fn search(mut self, search: SearchConfig) -> Self {
        self.search = Some(search);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingComponent` if a repository or the
    /// generator was never set
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let required = ServiceError::MissingComponent;

        Ok(ServiceContext {
            pool: self.pool,
            celebrity_repo: self.celebrity_repo.ok_or_else(|| required("celebrity_repo"))?,
            tag_repo: self.tag_repo.ok_or_else(|| required("tag_repo"))?,
            vote_repo: self.vote_repo.ok_or_else(|| required("vote_repo"))?,
            daily_stat_repo: self.daily_stat_repo.ok_or_else(|| required("daily_stat_repo"))?,
            search_repo: self.search_repo.ok_or_else(|| required("search_repo"))?,
            voting: self.voting.unwrap_or_default(),
            search: self.search.unwrap_or_default(),
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| required("snowflake_generator"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_repositories() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("celebrity_repo is required"));
    }

    #[test]
    fn test_builder_over_in_memory_store() {
        let store = InMemoryStore::new();
        let ctx = ServiceContextBuilder::new()
            .celebrity_repo(Arc::new(store.clone()))
            .tag_repo(Arc::new(store.clone()))
            .vote_repo(Arc::new(store.clone()))
            .daily_stat_repo(Arc::new(store.clone()))
            .search_repo(Arc::new(store))
            .voting(VotingConfig { daily_vote_limit: 3 })
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(7)))
            .build()
            .unwrap();

        assert!(ctx.pool().is_none());
        assert_eq!(ctx.daily_vote_limit(), 3);
        assert_eq!(ctx.search_config().default_limit, 50);
        assert_eq!(ctx.generate_id().worker_id(), 7);
    }

    #[tokio::test]
    async fn test_in_memory_context_is_healthy() {
        let ctx = ServiceContext::in_memory(InMemoryStore::new());
        assert!(ctx.database_healthy().await);
        assert_eq!(ctx.daily_vote_limit(), 10);
    }
}

//! Search service
//!
//! Relevance-ranked celebrity search, autocomplete and search analytics.
//! The repository returns one ranked page following the rules in
//! `roster_core::search`.

use roster_core::search::{merge_suggestions, MIN_SUGGESTION_CHARS};
use roster_core::{MbtiType, SearchFilters, SearchQuery, SearchType, VoteFilter};
use tracing::{debug, instrument};

use crate::dto::{
    AppliedFilters, MbtiTypeCount, PageMeta, PageRequest, PopularSearch, PopularSearchKind,
    PopularSearchesResponse, SearchAnalyticsResponse, SearchCapabilities, SearchParams,
    SearchResponse, SearchResultResponse, SearchStatistics, SuggestionParams, SuggestionsResponse,
    TagCount,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub const DEFAULT_SUGGESTION_LIMIT: i64 = 10;
pub const MAX_SUGGESTION_LIMIT: i64 = 20;
pub const DEFAULT_POPULAR_SEARCH_LIMIT: i64 = 10;
pub const MAX_POPULAR_SEARCH_LIMIT: i64 = 50;
/// Tags listed in the analytics
const ANALYTICS_TAGS: i64 = 10;

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        params: SearchParams,
        skip: i64,
        limit: Option<i64>,
    ) -> ServiceResult<SearchResponse> {
        let config = self.ctx.search_config();
        let page = PageRequest::resolve(skip, limit, config.default_limit, config.max_limit)?;

        let search_type = match params.search_type.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<SearchType>()?,
            _ => SearchType::All,
        };
        let filters = SearchFilters::parse(
            params.mbti_type.as_deref(),
            params.tag_filter.as_deref(),
            params.popularity_filter.as_deref(),
        )?;
        let query = SearchQuery::new(&params.q, search_type)?.with_filters(filters);

        let ranked = self
            .ctx
            .search_repo()
            .search(&query, page.skip, page.limit)
            .await?;
        // A full page may be followed by an empty one
        let has_more = page.limit > 0 && i64::try_from(ranked.len()).is_ok_and(|n| n == page.limit);
        debug!(returned = ranked.len(), has_more, "Search page ranked");

        let results: Vec<SearchResultResponse> =
            ranked.into_iter().map(SearchResultResponse::from).collect();

        Ok(SearchResponse {
            query: query.text().to_string(),
            search_type: query.search_type(),
            filters: AppliedFilters {
                mbti_type: query.filters.mbti_type,
                tag_filter: query.filters.tag.clone(),
                popularity_filter: query.filters.popularity,
            },
            total_results: results.len(),
            results,
            pagination: PageMeta {
                skip: page.skip,
                limit: page.limit,
                has_more,
            },
        })
    }

    /// Autocomplete from names, English names and tags, in that order
    #[instrument(skip(self))]
    pub async fn suggestions(
        &self,
        params: SuggestionParams,
        limit: Option<i64>,
    ) -> ServiceResult<SuggestionsResponse> {
        let page = PageRequest::limit_only(limit, DEFAULT_SUGGESTION_LIMIT, MAX_SUGGESTION_LIMIT)?;
        let needle = params.q.trim();

        let suggestions = if needle.chars().count() < MIN_SUGGESTION_CHARS {
            Vec::new()
        } else {
            let repo = self.ctx.search_repo();
            let names = repo.suggest_names(needle, page.limit).await?;
            let names_en = repo.suggest_english_names(needle, page.limit).await?;
            let tags = repo.suggest_tags(needle, page.limit).await?;
            merge_suggestions(
                [names, names_en, tags],
                usize::try_from(page.limit).unwrap_or(0),
            )
        };

        Ok(SuggestionsResponse {
            query: params.q,
            total_suggestions: suggestions.len(),
            suggestions,
        })
    }

    #[instrument(skip(self))]
    pub async fn analytics(&self) -> ServiceResult<SearchAnalyticsResponse> {
        Ok(SearchAnalyticsResponse {
            statistics: self.statistics().await?,
            search_capabilities: SearchCapabilities {
                search_types: vec![
                    SearchType::All,
                    SearchType::Name,
                    SearchType::Description,
                    SearchType::Tag,
                    SearchType::Mbti,
                ],
                filters: vec!["mbti_type", "tag_filter", "popularity_filter"],
                relevance_scoring: true,
                autocomplete: true,
            },
        })
    }

    /// Top tags and MBTI types merged by count
    #[instrument(skip(self))]
    pub async fn popular_searches(&self, limit: Option<i64>) -> ServiceResult<PopularSearchesResponse> {
        let page = PageRequest::limit_only(
            limit,
            DEFAULT_POPULAR_SEARCH_LIMIT,
            MAX_POPULAR_SEARCH_LIMIT,
        )?;
        let stats = self.statistics().await?;

        let mut popular: Vec<PopularSearch> = stats
            .popular_tags
            .into_iter()
            .map(|t| PopularSearch {
                term: t.tag,
                kind: PopularSearchKind::Tag,
                count: t.count,
            })
            .chain(stats.popular_mbti_types.into_iter().map(|m| PopularSearch {
                term: m.mbti_type.as_str().to_string(),
                kind: PopularSearchKind::Mbti,
                count: m.count,
            }))
            .collect();
        // Stable: tags stay ahead of types with the same count
        popular.sort_by(|a, b| b.count.cmp(&a.count));
        popular.truncate(usize::try_from(page.limit).unwrap_or(0));

        Ok(PopularSearchesResponse {
            total_searches: popular.len(),
            popular_searches: popular,
        })
    }

    async fn statistics(&self) -> ServiceResult<SearchStatistics> {
        let popular_tags = self
            .ctx
            .tag_repo()
            .most_used(ANALYTICS_TAGS)
            .await?
            .into_iter()
            .map(|t| TagCount {
                tag: t.name,
                count: t.count,
            })
            .collect();
        let popular_mbti_types = self
            .ctx
            .vote_repo()
            .mbti_counts(&VoteFilter::default())
            .await?
            .into_iter()
            .map(|c| MbtiTypeCount {
                mbti_type: c.mbti_type,
                count: c.count,
            })
            .collect();

        Ok(SearchStatistics {
            total_celebrities: self.ctx.celebrity_repo().count().await?,
            total_tags: self.ctx.tag_repo().count().await?,
            total_votes: self.ctx.vote_repo().count(&VoteFilter::default()).await?,
            popular_tags,
            popular_mbti_types,
        })
    }
}

/// Every type code, for clients building filter pickers
pub fn searchable_mbti_types() -> Vec<&'static str> {
    MbtiType::ALL.iter().map(|t| t.as_str()).collect()
}

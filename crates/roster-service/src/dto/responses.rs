//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{MatchType, MbtiType, PopularityFilter, SearchType};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Offset pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub skip: i64,
    pub limit: i64,
    /// True when the page came back full
    pub has_more: bool,
}

/// A page of items
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, skip: i64, limit: i64) -> Self {
        let has_more = usize::try_from(limit).is_ok_and(|l| l > 0 && data.len() == l);
        Self {
            data,
            pagination: PageMeta {
                skip,
                limit,
                has_more,
            },
        }
    }
}

// ============================================================================
// Celebrity Responses
// ============================================================================

/// Celebrity fields
#[derive(Debug, Clone, Serialize)]
pub struct CelebrityResponse {
    pub id: String,
    pub name: String,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Tag fields
#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Celebrity with its tags
#[derive(Debug, Clone, Serialize)]
pub struct CelebrityDetailResponse {
    #[serde(flatten)]
    pub celebrity: CelebrityResponse,
    pub tags: Vec<TagResponse>,
}

// ============================================================================
// Vote Responses
// ============================================================================

/// Vote fields
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub id: String,
    pub user_id: String,
    pub celebrity_id: String,
    pub mbti_type: MbtiType,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One row of an MBTI distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MbtiShare {
    pub mbti_type: MbtiType,
    pub count: i64,
    /// Share of all votes in percent, rounded to 2 decimals
    pub percentage: f64,
}

/// Vote statistics of one celebrity
#[derive(Debug, Clone, Serialize)]
pub struct CelebrityVoteStatsResponse {
    pub celebrity_id: String,
    pub celebrity_name: String,
    pub total_votes: i64,
    pub votes_with_reason: i64,
    pub votes_without_reason: i64,
    pub mbti_distribution: Vec<MbtiShare>,
    pub top_mbti_type: Option<MbtiType>,
    pub top_mbti_count: i64,
}

/// One day of a user's voting
#[derive(Debug, Clone, Serialize)]
pub struct DailyStatResponse {
    pub date: NaiveDate,
    pub votes_count: i32,
    pub votes_no_reason: i32,
}

/// Vote statistics of one user
#[derive(Debug, Clone, Serialize)]
pub struct UserVoteStatsResponse {
    pub user_id: String,
    pub total_votes: i64,
    pub today_votes: i32,
    pub votes_remaining_today: i32,
    pub daily_vote_limit: i32,
    pub mbti_distribution: Vec<MbtiShare>,
    pub favorite_mbti_type: Option<MbtiType>,
    pub favorite_mbti_count: i64,
    /// Newest first
    pub recent_daily_stats: Vec<DailyStatResponse>,
}

/// A celebrity ranked by vote count
#[derive(Debug, Clone, Serialize)]
pub struct PopularCelebrityResponse {
    pub celebrity: CelebrityResponse,
    pub vote_count: i64,
    pub top_mbti: Option<MbtiType>,
}

// ============================================================================
// Search Responses
// ============================================================================

/// One ranked search hit
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultResponse {
    #[serde(flatten)]
    pub celebrity: CelebrityResponse,
    pub tags: Vec<String>,
    pub relevance_score: i64,
    pub match_type: MatchType,
    pub total_votes: i64,
}

/// Filters echoed back with search results
#[derive(Debug, Clone, Serialize)]
pub struct AppliedFilters {
    pub mbti_type: Option<MbtiType>,
    pub tag_filter: Option<String>,
    pub popularity_filter: PopularityFilter,
}

/// Search results page
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub search_type: SearchType,
    pub filters: AppliedFilters,
    /// Size of this page
    pub total_results: usize,
    pub results: Vec<SearchResultResponse>,
    pub pagination: PageMeta,
}

/// Autocomplete suggestions
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub query: String,
    pub suggestions: Vec<String>,
    pub total_suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MbtiTypeCount {
    #[serde(rename = "type")]
    pub mbti_type: MbtiType,
    pub count: i64,
}

/// Catalogue-wide counters
#[derive(Debug, Clone, Serialize)]
pub struct SearchStatistics {
    pub total_celebrities: i64,
    pub total_tags: i64,
    pub total_votes: i64,
    pub popular_tags: Vec<TagCount>,
    pub popular_mbti_types: Vec<MbtiTypeCount>,
}

/// What the search endpoint understands
#[derive(Debug, Clone, Serialize)]
pub struct SearchCapabilities {
    pub search_types: Vec<SearchType>,
    pub filters: Vec<&'static str>,
    pub relevance_scoring: bool,
    pub autocomplete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchAnalyticsResponse {
    pub statistics: SearchStatistics,
    pub search_capabilities: SearchCapabilities,
}

/// Source of a popular search term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopularSearchKind {
    Tag,
    Mbti,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularSearch {
    pub term: String,
    #[serde(rename = "type")]
    pub kind: PopularSearchKind,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopularSearchesResponse {
    pub popular_searches: Vec<PopularSearch>,
    pub total_searches: usize,
}

// ============================================================================
// MBTI Responses
// ============================================================================

/// One catalogue entry
#[derive(Debug, Clone, Serialize)]
pub struct MbtiTypeResponse {
    pub code: MbtiType,
    pub chinese_name: String,
    pub english_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MbtiTypesResponse {
    pub types: Vec<MbtiTypeResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MbtiValidationResponse {
    pub type_code: String,
    pub is_valid: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

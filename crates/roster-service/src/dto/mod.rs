//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs and paging bounds for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CastVoteRequest, PageRequest, SearchParams, SuggestionParams, VoteListParams};

pub use responses::{
    AppliedFilters, CelebrityDetailResponse, CelebrityResponse, CelebrityVoteStatsResponse,
    DailyStatResponse, HealthChecks, HealthResponse, MbtiShare, MbtiTypeCount, MbtiTypeResponse,
    MbtiTypesResponse, MbtiValidationResponse, PageMeta, PaginatedResponse,
    PopularCelebrityResponse, PopularSearch, PopularSearchKind, PopularSearchesResponse,
    ReadinessResponse, SearchAnalyticsResponse, SearchCapabilities, SearchResponse,
    SearchResultResponse, SearchStatistics, SuggestionsResponse, TagCount, TagResponse,
    UserVoteStatsResponse, VoteResponse,
};

pub use mappers::{mbti_distribution, percentage};

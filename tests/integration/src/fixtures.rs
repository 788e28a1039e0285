//! Request bodies and response shapes used by the API tests

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct CastVoteRequest {
    pub celebrity_id: String,
    pub mbti_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CastVoteRequest {
    pub fn new(celebrity_id: &str, mbti_type: &str) -> Self {
        Self {
            celebrity_id: celebrity_id.to_string(),
            mbti_type: mbti_type.to_string(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct VoteResponse {
    pub id: String,
    pub user_id: String,
    pub celebrity_id: String,
    pub mbti_type: String,
    pub reason: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub skip: i64,
    pub limit: i64,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct VotePage {
    pub data: Vec<VoteResponse>,
    pub pagination: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct MbtiShare {
    pub mbti_type: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Deserialize)]
pub struct CelebrityStats {
    pub celebrity_id: String,
    pub total_votes: i64,
    pub votes_with_reason: i64,
    pub votes_without_reason: i64,
    pub mbti_distribution: Vec<MbtiShare>,
    pub top_mbti_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DailyStat {
    pub date: String,
    pub votes_count: i32,
    pub votes_no_reason: i32,
}

#[derive(Debug, Deserialize)]
pub struct UserStats {
    pub user_id: String,
    pub total_votes: i64,
    pub today_votes: i32,
    pub votes_remaining_today: i32,
    pub daily_vote_limit: i32,
    pub recent_daily_stats: Vec<DailyStat>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub relevance_score: i64,
    pub match_type: String,
    pub total_votes: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub search_type: String,
    pub total_results: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

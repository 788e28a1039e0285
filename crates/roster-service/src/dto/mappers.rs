//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use roster_core::entities::{Celebrity, CelebrityWithTags, DailyStat, Tag, Vote};
use roster_core::{MbtiCount, MbtiTypeInfo, RankedCelebrity};

use super::responses::{
    CelebrityDetailResponse, CelebrityResponse, DailyStatResponse, MbtiShare, MbtiTypeResponse,
    SearchResultResponse, TagResponse, VoteResponse,
};

// ============================================================================
// Celebrity Mappers
// ============================================================================

impl From<&Celebrity> for CelebrityResponse {
    fn from(celebrity: &Celebrity) -> Self {
        Self {
            id: celebrity.id.to_string(),
            name: celebrity.name.clone(),
            name_en: celebrity.name_en.clone(),
            description: celebrity.description.clone(),
            image_url: celebrity.image_url.clone(),
            created_at: celebrity.created_at,
            updated_at: celebrity.updated_at,
        }
    }
}

impl From<Celebrity> for CelebrityResponse {
    fn from(celebrity: Celebrity) -> Self {
        Self::from(&celebrity)
    }
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.to_string(),
            name: tag.name.clone(),
            description: tag.description.clone(),
        }
    }
}

impl From<CelebrityWithTags> for CelebrityDetailResponse {
    fn from(value: CelebrityWithTags) -> Self {
        Self {
            tags: value.tags.iter().map(TagResponse::from).collect(),
            celebrity: CelebrityResponse::from(value.celebrity),
        }
    }
}

impl From<RankedCelebrity> for SearchResultResponse {
    fn from(ranked: RankedCelebrity) -> Self {
        Self {
            celebrity: CelebrityResponse::from(&ranked.celebrity),
            tags: ranked.tags.into_iter().map(|t| t.name).collect(),
            relevance_score: ranked.relevance_score,
            match_type: ranked.match_type,
            total_votes: ranked.total_votes,
        }
    }
}

// ============================================================================
// Vote Mappers
// ============================================================================

impl From<&Vote> for VoteResponse {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id.to_string(),
            user_id: vote.user_id.to_string(),
            celebrity_id: vote.celebrity_id.to_string(),
            mbti_type: vote.mbti_type,
            reason: vote.reason.clone(),
            created_at: vote.created_at,
        }
    }
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self::from(&vote)
    }
}

impl From<&DailyStat> for DailyStatResponse {
    fn from(stat: &DailyStat) -> Self {
        Self {
            date: stat.date,
            votes_count: stat.votes_count,
            votes_no_reason: stat.votes_no_reason_count,
        }
    }
}

/// Turn per-type counts (most first) into a percentage distribution
pub fn mbti_distribution(counts: &[MbtiCount], total: i64) -> Vec<MbtiShare> {
    counts
        .iter()
        .map(|c| MbtiShare {
            mbti_type: c.mbti_type,
            count: c.count,
            percentage: percentage(c.count, total),
        })
        .collect()
}

/// `part / total` in percent, rounded to 2 decimals; 0 when total is 0
pub fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 10_000.0).round() / 100.0
}

// ============================================================================
// MBTI Mappers
// ============================================================================

impl From<MbtiTypeInfo> for MbtiTypeResponse {
    fn from(info: MbtiTypeInfo) -> Self {
        Self {
            code: info.code,
            chinese_name: info.name.to_string(),
            english_name: info.english_name.to_string(),
            description: info.description.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{MbtiType, Snowflake};

    #[test]
    fn test_percentage_rounding() {
        assert!((percentage(1, 3) - 33.33).abs() < f64::EPSILON);
        assert!((percentage(2, 3) - 66.67).abs() < f64::EPSILON);
        assert!((percentage(5, 0)).abs() < f64::EPSILON);
        assert!((percentage(4, 4) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distribution_keeps_order() {
        let counts = [
            MbtiCount {
                mbti_type: MbtiType::Enfp,
                count: 3,
            },
            MbtiCount {
                mbti_type: MbtiType::Intj,
                count: 1,
            },
        ];
        let shares = mbti_distribution(&counts, 4);
        assert_eq!(shares[0].mbti_type, MbtiType::Enfp);
        assert!((shares[0].percentage - 75.0).abs() < f64::EPSILON);
        assert!((shares[1].percentage - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_celebrity_response_ids_are_strings() {
        let celebrity = Celebrity::new(Snowflake::new(42), "周杰伦".to_string()).with_name_en("Jay Chou");
        let json = serde_json::to_value(CelebrityResponse::from(&celebrity)).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["name_en"], "Jay Chou");
    }

    #[test]
    fn test_mbti_type_response() {
        let response = MbtiTypeResponse::from(MbtiType::Intj.info());
        assert_eq!(response.code, MbtiType::Intj);
        assert_eq!(response.english_name, MbtiType::Intj.info().english_name);
    }
}

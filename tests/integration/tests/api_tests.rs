//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Vote Tests
// ============================================================================

#[tokio::test]
async fn test_cast_vote() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.new_user().unwrap();
    let celebrity_id = server.seed_celebrity("投票明星", &[]).await.unwrap();

    let request = CastVoteRequest::new(&celebrity_id, "infp").with_reason("gentle");
    let response = server.post_auth("/api/v1/votes", &user.token, &request).await.unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(vote.mbti_type, "INFP");
    assert_eq!(vote.user_id, user.id.to_string());
    assert_eq!(vote.celebrity_id, celebrity_id);
    assert_eq!(vote.reason.as_deref(), Some("gentle"));

    let response = server.get(&format!("/api/v1/votes/{}", vote.id)).await.unwrap();
    let fetched: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, vote.id);
}

#[tokio::test]
async fn test_cast_vote_without_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let celebrity_id = server.seed_celebrity("匿名明星", &[]).await.unwrap();

    let request = CastVoteRequest::new(&celebrity_id, "INTJ");
    let response = server.post("/api/v1/votes", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_duplicate_vote_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.new_user().unwrap();
    let celebrity_id = server.seed_celebrity("重复明星", &[]).await.unwrap();

    let request = CastVoteRequest::new(&celebrity_id, "ENTJ");
    let response = server.post_auth("/api/v1/votes", &user.token, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let request = CastVoteRequest::new(&celebrity_id, "ISTP");
    let response = server.post_auth("/api/v1/votes", &user.token, &request).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "DUPLICATE_VOTE");
}

#[tokio::test]
async fn test_concurrent_duplicate_votes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.new_user().unwrap();
    let celebrity_id = server.seed_celebrity("并发明星", &[]).await.unwrap();
    let request = CastVoteRequest::new(&celebrity_id, "ESFP");

    let (first, second) = tokio::join!(
        server.post_auth("/api/v1/votes", &user.token, &request),
        server.post_auth("/api/v1/votes", &user.token, &request),
    );
    let mut statuses = [first.unwrap().status(), second.unwrap().status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);

    let response = server.get_auth("/api/v1/votes/my-votes", &user.token).await.unwrap();
    let page: VotePage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
async fn test_daily_vote_limit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.new_user().unwrap();

    let response = server
        .get_auth("/api/v1/votes/statistics/my-stats", &user.token)
        .await
        .unwrap();
    let stats: UserStats = assert_json(response, StatusCode::OK).await.unwrap();
    let limit = stats.daily_vote_limit;
    assert_eq!(stats.votes_remaining_today, limit);

    for _ in 0..limit {
        let celebrity_id = server.seed_celebrity("配额明星", &[]).await.unwrap();
        let request = CastVoteRequest::new(&celebrity_id, "ISTJ");
        let response = server.post_auth("/api/v1/votes", &user.token, &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let celebrity_id = server.seed_celebrity("配额明星", &[]).await.unwrap();
    let request = CastVoteRequest::new(&celebrity_id, "ISTJ");
    let response = server.post_auth("/api/v1/votes", &user.token, &request).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "DAILY_VOTE_LIMIT_REACHED");

    let response = server
        .get_auth("/api/v1/votes/statistics/my-stats", &user.token)
        .await
        .unwrap();
    let stats: UserStats = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.today_votes, limit);
    assert_eq!(stats.votes_remaining_today, 0);
    assert_eq!(stats.recent_daily_stats[0].votes_count, limit);
}

#[tokio::test]
async fn test_delete_vote() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.new_user().unwrap();
    let stranger = server.new_user().unwrap();
    let celebrity_id = server.seed_celebrity("删除明星", &[]).await.unwrap();

    let request = CastVoteRequest::new(&celebrity_id, "ENFJ");
    let response = server.post_auth("/api/v1/votes", &owner.token, &request).await.unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let vote_path = format!("/api/v1/votes/{}", vote.id);

    let response = server.delete_auth(&vote_path, &stranger.token).await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(error.error.code, "NOT_VOTE_OWNER");

    let response = server.delete_auth(&vote_path, &owner.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&vote_path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // The last vote of the day took the daily row with it
    let response = server
        .get_auth("/api/v1/votes/statistics/my-stats", &owner.token)
        .await
        .unwrap();
    let stats: UserStats = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.today_votes, 0);
    assert!(stats.recent_daily_stats.is_empty());
}

#[tokio::test]
async fn test_celebrity_votes_and_statistics() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let celebrity_id = server.seed_celebrity("统计明星", &[]).await.unwrap();

    for (mbti, reason) in [("INTJ", Some("calm")), ("INTJ", None), ("ENTP", None)] {
        let user = server.new_user().unwrap();
        let mut request = CastVoteRequest::new(&celebrity_id, mbti);
        if let Some(reason) = reason {
            request = request.with_reason(reason);
        }
        let response = server.post_auth("/api/v1/votes", &user.token, &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get(&format!("/api/v1/votes/celebrity/{celebrity_id}?limit=2"))
        .await
        .unwrap();
    let page: VotePage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert!(page.pagination.has_more);

    let response = server
        .get(&format!("/api/v1/votes/statistics/celebrity/{celebrity_id}"))
        .await
        .unwrap();
    let stats: CelebrityStats = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(stats.total_votes, 3);
    assert_eq!(stats.votes_with_reason, 1);
    assert_eq!(stats.votes_without_reason, 2);
    assert_eq!(stats.top_mbti_type.as_deref(), Some("INTJ"));
    assert_eq!(stats.mbti_distribution[0].count, 2);
}

#[tokio::test]
async fn test_list_votes_rejects_bad_paging() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/votes?skip=-1").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server.get("/api/v1/votes?limit=1001").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_search_by_tag() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tag = format!("歌手{}", server.unique_suffix());
    let celebrity_id = server.seed_celebrity("搜索明星", &[&tag]).await.unwrap();

    let response = server
        .client
        .get(format!("{}/api/v1/search", server.base_url()))
        .query(&[("q", tag.as_str()), ("search_type", "tag")])
        .send()
        .await
        .unwrap();
    let results: SearchResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(results.search_type, "tag");
    assert_eq!(results.total_results, 1);
    assert_eq!(results.results[0].id, celebrity_id);
    assert_eq!(results.results[0].match_type, "tag_match");
    assert_eq!(results.results[0].relevance_score, 40);
    assert_eq!(results.results[0].tags, vec![tag]);
}

#[tokio::test]
async fn test_search_exact_name_ranks_first() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let name = format!("排名{}", server.unique_suffix());
    let fan_id = server.seed_named_celebrity(&format!("{name}的粉丝"), &[]).await.unwrap();
    let exact_id = server.seed_named_celebrity(&name, &[]).await.unwrap();

    let response = server
        .client
        .get(format!("{}/api/v1/search", server.base_url()))
        .query(&[("q", name.as_str())])
        .send()
        .await
        .unwrap();
    let results: SearchResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(results.total_results, 2);
    assert_eq!(results.results[0].id, exact_id);
    assert_eq!(results.results[0].relevance_score, 100);
    assert_eq!(results.results[0].match_type, "exact_match");
    assert_eq!(results.results[1].id, fan_id);
    assert_eq!(results.results[1].match_type, "name_contains");
    assert!(results.results[1].relevance_score < 100);
}

#[tokio::test]
async fn test_search_requires_query() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/search?q=%20").await.unwrap();
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "EMPTY_SEARCH_QUERY");

    let response = server.get("/api/v1/search?q=x&search_type=bogus").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_search_analytics() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    server.seed_celebrity("分析明星", &[]).await.unwrap();

    let response = server.get("/api/v1/search/analytics").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["statistics"]["total_celebrities"].as_i64().unwrap() >= 1);
    assert_eq!(body["search_capabilities"]["autocomplete"], true);

    let response = server.get("/api/v1/search/popular-searches?limit=5").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body["popular_searches"].as_array().unwrap().len() <= 5);
}

// ============================================================================
// MBTI and Celebrity Tests
// ============================================================================

#[tokio::test]
async fn test_mbti_types() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/mbti/types").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["total"], 16);

    let response = server.get("/api/v1/mbti/types/ZZZZ").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_get_celebrity_with_tags() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tag = format!("演员{}", server.unique_suffix());
    let celebrity_id = server.seed_celebrity("详情明星", &[&tag]).await.unwrap();

    let response = server
        .get(&format!("/api/v1/celebrities/{celebrity_id}"))
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["id"], celebrity_id.as_str());
    assert_eq!(body["tags"][0]["name"], tag.as_str());

    let response = server.get("/api/v1/celebrities/1").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

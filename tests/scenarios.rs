//! Scenario tests through the public API against a mock REST server

mod common;

use api_join::{ApiCallStatus, UserId};
use common::{mount_filtered_json, mount_json, raw_comment, raw_post, raw_user, runner_for};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_full_scenario_builds_sorted_nested_view() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/users",
        json!([raw_user(1, "Leanne Graham"), raw_user(2, "Ervin Howell"), raw_user(3, "Clementine Bauch")]),
    )
    .await;
    mount_json(
        &server,
        "/posts",
        json!([raw_post(10, 1), raw_post(20, 2), raw_post(21, 2), raw_post(99, 42)]),
    )
    .await;
    mount_json(
        &server,
        "/comments",
        json!([raw_comment(100, 10), raw_comment(200, 20), raw_comment(201, 20), raw_comment(210, 21)]),
    )
    .await;

    let (runner, telemetry) = runner_for(&server);
    let result = runner.run_full_scenario().await;

    assert!(result.success, "unexpected failure: {:?}", result.error);
    assert_eq!(result.api_calls_count, 3);
    assert_eq!(result.processed_users_count, 3);
    assert_eq!(result.processed_posts_count, 4);
    assert_eq!(result.processed_comments_count, 4);

    let data = result.data.unwrap();
    let order: Vec<_> = data.iter().map(|entry| entry.user.id).collect();
    assert_eq!(order, vec![2, 1, 3]);

    let ervin = &data[0];
    assert_eq!(ervin.user.city, "City 2");
    assert_eq!(ervin.total_posts, 2);
    assert_eq!(ervin.total_comments, 3);
    assert_eq!(ervin.average_comments_per_post, 1.5);
    assert_eq!(ervin.posts[0].comments_count, 2);

    assert_eq!(data[2].total_posts, 0);

    let summary = telemetry.summary();
    assert_eq!(summary.api_call_count, 3);
    assert!(
        summary
            .api_calls
            .iter()
            .all(|call| call.status == ApiCallStatus::Success)
    );
}

#[tokio::test]
async fn test_full_scenario_result_serializes_to_camel_case() {
    let server = MockServer::start().await;
    mount_json(&server, "/users", json!([raw_user(1, "Leanne Graham")])).await;
    mount_json(&server, "/posts", json!([raw_post(10, 1)])).await;
    mount_json(&server, "/comments", json!([raw_comment(100, 10)])).await;

    let (runner, _telemetry) = runner_for(&server);
    let result = runner.run_full_scenario().await;
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["apiCallsCount"], 3);
    assert!(value.get("error").is_none());
    assert!(value["executionTime"].is_u64());

    let entry = &value["data"][0];
    assert_eq!(entry["totalPosts"], 1);
    assert_eq!(entry["averageCommentsPerPost"], 1.0);
    assert_eq!(entry["posts"][0]["titlePreview"], "post 10 title");
    assert_eq!(entry["posts"][0]["comments"][0]["bodyPreview"], "comment 100 body");
    assert!(entry["posts"][0].get("userId").is_none());
}

#[tokio::test]
async fn test_full_scenario_timeout_becomes_failed_result() {
    let server = MockServer::start().await;
    mount_json(&server, "/users", json!([])).await;
    mount_json(&server, "/posts", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut config = api_join::Config::default();
    config.api.base_url = server.uri();
    config.api.timeout = Duration::from_millis(50);
    let runner = api_join::ScenarioRunner::new(&config).unwrap();

    let result = runner.run_full_scenario().await;

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("Request timeout after 50ms")
    );
    assert_eq!(result.api_calls_count, 0);
    assert_eq!(result.processed_users_count, 0);
}

#[tokio::test]
async fn test_focused_scenario_with_zero_posts() {
    let server = MockServer::start().await;
    mount_json(&server, "/users/3", raw_user(3, "Clementine Bauch")).await;
    mount_filtered_json(&server, "/posts", "userId", 3, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let (runner, _telemetry) = runner_for(&server);
    let result = runner.run_focused_scenario(UserId::new(3).unwrap()).await;

    assert!(result.success);
    assert_eq!(result.api_calls_count, 2);
    assert_eq!(result.processed_users_count, 1);
    assert_eq!(result.processed_posts_count, 0);
    assert_eq!(result.processed_comments_count, 0);

    let data = result.data.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].average_comments_per_post, 0.0);
}

#[tokio::test]
async fn test_focused_scenario_missing_user_fails_before_comment_phase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;
    mount_filtered_json(&server, "/posts", "userId", 404, json!([raw_post(1, 404)])).await;

    let (runner, telemetry) = runner_for(&server);
    let result = runner.run_focused_scenario(UserId::new(404).unwrap()).await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("HTTP Error: 404 Not Found"));
    assert_eq!(result.api_calls_count, 0);

    let summary = telemetry.summary();
    assert_eq!(summary.error_count, 1);
    assert!(
        summary
            .api_calls
            .iter()
            .all(|call| !call.url.contains("/comments"))
    );
}

#[tokio::test]
async fn test_focused_scenario_comment_failure_reports_first_phase_calls() {
    let server = MockServer::start().await;
    mount_json(&server, "/users/5", raw_user(5, "Chelsey Dietrich")).await;
    mount_filtered_json(
        &server,
        "/posts",
        "userId",
        5,
        json!([raw_post(41, 5), raw_post(42, 5)]),
    )
    .await;
    mount_filtered_json(&server, "/comments", "postId", 41, json!([raw_comment(1, 41)])).await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(wiremock::matchers::query_param("postId", "42"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (runner, _telemetry) = runner_for(&server);
    let result = runner.run_focused_scenario(UserId::new(5).unwrap()).await;

    assert!(!result.success);
    assert!(result.data.is_none());
    assert_eq!(result.error.as_deref(), Some("HTTP Error: 502 Bad Gateway"));
    assert_eq!(result.api_calls_count, 2);
    assert_eq!(result.processed_comments_count, 0);
}

#[test]
fn test_invalid_user_ids_are_rejected_at_the_boundary() {
    for raw in ["-1", "0", "abc", "", "2.5"] {
        let err = raw.parse::<UserId>().unwrap_err();
        assert!(
            matches!(err, api_join::Error::Validation { .. }),
            "'{raw}' gave {err:?}"
        );
    }
    assert!(UserId::new(-1).is_err());
}

use super::*;
use crate::telemetry::ApiCallStatus;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn raw_user(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("User {id}"),
        "username": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "address": { "street": "Main", "city": format!("City {id}"), "zipcode": "00000" },
        "phone": "555",
        "website": "example.com",
        "company": { "name": format!("Company {id}"), "catchPhrase": "x", "bs": "y" }
    })
}

fn raw_post(id: i64, user_id: i64, title: &str) -> Value {
    json!({ "userId": user_id, "id": id, "title": title, "body": "body" })
}

fn raw_comment(id: i64, post_id: i64) -> Value {
    json!({
        "postId": post_id,
        "id": id,
        "name": format!("comment {id}"),
        "email": "c@example.com",
        "body": "b".repeat(120)
    })
}

fn client_for(server: &MockServer) -> (ApiClient, Arc<Telemetry>) {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    let telemetry = Arc::new(Telemetry::default());
    let client = ApiClient::new(&config, telemetry.clone()).unwrap();
    (client, telemetry)
}

#[tokio::test]
async fn test_fetch_users_maps_raw_records() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([raw_user(1), raw_user(2)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _telemetry) = client_for(&mock_server);
    let response = client.fetch_users().await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].city, "City 1");
    assert_eq!(response.data[1].company, "Company 2");
}

#[tokio::test]
async fn test_fetch_user_by_id_requests_single_resource() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_user(5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _telemetry) = client_for(&mock_server);
    let user = client
        .fetch_user_by_id(UserId::new(5).unwrap())
        .await
        .unwrap()
        .data;

    assert_eq!(user.id, 5);
    assert_eq!(user.username, "user5");
}

#[tokio::test]
async fn test_fetch_posts_by_user_id_filters_with_query_string() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("userId", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([raw_post(1, 3, &"t".repeat(70))])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _telemetry) = client_for(&mock_server);
    let posts = client
        .fetch_posts_by_user_id(UserId::new(3).unwrap())
        .await
        .unwrap()
        .data;

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].user_id, 3);
    assert_eq!(posts[0].title_preview.chars().count(), 53);
}

#[tokio::test]
async fn test_fetch_post_and_comment_by_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_post(7, 1, "title")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments/70"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw_comment(70, 7)))
        .mount(&mock_server)
        .await;

    let (client, telemetry) = client_for(&mock_server);
    let post = client.fetch_post_by_id(7).await.unwrap().data;
    let comment = client.fetch_comment_by_id(70).await.unwrap().data;

    assert_eq!(post.id, 7);
    assert_eq!(post.title_preview, "title");
    assert_eq!(comment.post_id, 7);
    assert!(comment.body_preview.ends_with("..."));
    assert_eq!(telemetry.summary().api_call_count, 2);
}

#[tokio::test]
async fn test_fetch_comments_by_post_id_filters_with_query_string() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("postId", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([raw_comment(100, 10), raw_comment(101, 10)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (client, _telemetry) = client_for(&mock_server);
    let comments = client.fetch_comments_by_post_id(10).await.unwrap().data;

    let ids: Vec<_> = comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![100, 101]);
}

#[tokio::test]
async fn test_fetch_error_passes_through_unchanged_and_is_recorded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let (client, telemetry) = client_for(&mock_server);
    let err = client.fetch_comments().await.unwrap_err();

    assert_eq!(err.status_code, 503);
    assert_eq!(err.message, "HTTP Error: 503 Service Unavailable");

    let summary = telemetry.summary();
    assert_eq!(summary.api_call_count, 1);
    assert_eq!(summary.error_count, 1);
    assert_eq!(summary.api_calls[0].status, ApiCallStatus::Error);
    assert_eq!(summary.api_calls[0].status_code, Some(503));
    assert_eq!(
        summary.api_calls[0].url,
        format!("{}/comments", mock_server.uri())
    );
}

#[tokio::test]
async fn test_payload_with_wrong_shape_is_a_network_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&mock_server)
        .await;

    let (client, telemetry) = client_for(&mock_server);
    let err = client.fetch_posts().await.unwrap_err();

    assert_eq!(err.status_code, 0);
    assert_eq!(err.status_text, "Network Error");
    assert_eq!(telemetry.summary().api_calls[0].status_code, None);
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_is_ignored() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.api.base_url = format!("{}/", mock_server.uri());
    let client = ApiClient::new(&config, Arc::new(Telemetry::default())).unwrap();

    assert_eq!(client.base_url(), mock_server.uri());
    assert!(client.fetch_users().await.unwrap().data.is_empty());
}

#[test]
fn test_new_rejects_invalid_config() {
    let mut config = Config::default();
    config.api.base_url = "nope".to_string();

    let result = ApiClient::new(&config, Arc::new(Telemetry::default()));
    assert!(matches!(result, Err(crate::Error::Config { .. })));
}

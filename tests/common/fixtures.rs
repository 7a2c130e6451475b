//! Raw API payloads shaped like the public JSONPlaceholder responses

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Raw user record, including the fields the client drops
pub fn raw_user(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "username": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": format!("City {id}"),
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": format!("Company {id}"),
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

/// Raw post record
pub fn raw_post(id: i64, user_id: i64) -> Value {
    json!({
        "userId": user_id,
        "id": id,
        "title": format!("post {id} title"),
        "body": format!("post {id} body")
    })
}

/// Raw comment record
pub fn raw_comment(id: i64, post_id: i64) -> Value {
    json!({
        "postId": post_id,
        "id": id,
        "name": format!("comment {id}"),
        "email": format!("c{id}@example.com"),
        "body": format!("comment {id} body")
    })
}

/// Mount a `200` JSON response for `GET {route}`
pub async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a `200` JSON response for `GET {route}?{key}={value}`
pub async fn mount_filtered_json(
    server: &MockServer,
    route: &str,
    key: &str,
    value: i64,
    body: Value,
) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param(key, value.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

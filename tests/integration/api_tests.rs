//! Live server tests
//!
//! Start the server against a scratch database with the rate limiter off
//! (`LIBRARY_RATE_LIMIT__ENABLED=false`), then run:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No location header")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_root_redirects_to_catalog() {
    let response = client()
        .get(BASE_URL)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/catalog");
}

#[tokio::test]
#[ignore]
async fn test_genre_lifecycle() {
    let client = client();
    let name = format!("Live Genre {}", std::process::id());

    let response = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to create genre");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let url = location(&response);
    assert!(url.starts_with("/catalog/genre/"));

    let page = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to fetch genre")
        .text()
        .await
        .expect("Failed to read page");
    assert!(page.contains(&name));

    // Same name in another case lands on the same record
    let response = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", name.to_uppercase())])
        .send()
        .await
        .expect("Failed to create genre");
    assert_eq!(location(&response), url);

    let response = client
        .post(format!("{}{}/delete", BASE_URL, url))
        .send()
        .await
        .expect("Failed to delete genre");
    assert_eq!(location(&response), "/catalog/genres");

    let response = client
        .get(format!("{}{}", BASE_URL, url))
        .send()
        .await
        .expect("Failed to fetch genre");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_malformed_id_is_bad_request() {
    let response = client()
        .get(format!("{}/catalog/book/not-an-id", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_security_headers() {
    let response = client()
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "SAMEORIGIN");
    assert!(response.headers().contains_key("content-security-policy"));
}

//! Basic integration tests for score-server

use reqwest::Client;
use score_server::config::Config;

mod common;

#[tokio::test]
async fn test_health_check() {
    let server = common::TestServer::start().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", server.url))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_question_comes_from_configured_pool() {
    let server = common::TestServer::start().await;
    let client = Client::new();
    let pool = Config::default().questions;

    for _ in 0..5 {
        let response = client
            .get(format!("{}/question", server.url))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        let question = body["question"].as_str().unwrap();
        assert!(pool.iter().any(|q| q == question));
    }
}

#[tokio::test]
async fn test_custom_question_list() {
    let server = common::TestServer::start_with(Config {
        port: 0,
        questions: vec!["Tell us about a failure.".into()],
        ..Config::default()
    })
    .await;
    let client = Client::new();

    let body: serde_json::Value = client
        .get(format!("{}/question", server.url))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(body["question"], "Tell us about a failure.");
}

#[tokio::test]
async fn test_unknown_route() {
    let server = common::TestServer::start().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/compute", server.url))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 405);
}

#[test]
fn test_empty_question_list_is_rejected() {
    let config = Config {
        questions: Vec::new(),
        ..Config::default()
    };
    assert!(score_server::state::AppState::new(&config).is_err());
}

#[test]
fn test_max_weight_above_five_is_rejected() {
    let config = Config {
        max_weight: 9,
        ..Config::default()
    };
    assert!(score_server::state::AppState::new(&config).is_err());

    let narrowed = Config {
        max_weight: 3,
        ..Config::default()
    };
    assert!(score_server::state::AppState::new(&narrowed).is_ok());
}

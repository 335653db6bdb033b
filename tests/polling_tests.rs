//! Integration tests for the polling loop.

use std::sync::Arc;
use std::time::Duration;

use renpho_api::{
    BaseUrl, Credentials, Email, Password, PollingLoop, RenphoConfig, SessionClient, UserId,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> Arc<SessionClient> {
    let config = RenphoConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .retry_delay(Duration::from_millis(5))
        .refresh_interval(Duration::from_millis(40))
        .build()
        .unwrap();
    Arc::new(SessionClient::new(
        config,
        Credentials::new(
            Email::new("someone@example.com").unwrap(),
            Password::new("hunter2").unwrap(),
        ),
        UserId::parse_optional("42"),
    ))
}

async fn mount_healthy_account(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v3/users/sign_in.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": "20000",
            "terminal_user_session_key": "key-1"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/measurements/list.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": "20000",
            "last_ary": [{"weight": 70.5, "time_stamp": 1_700_000_000}]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/girths/list_girth.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": "20000",
            "girths": []
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/girth_goals/list_girth_goal.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status_code": "20000",
            "girth_goals": []
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_stop_without_start_is_noop() {
    let server = MockServer::start().await;
    let polling = PollingLoop::new(create_client(&server));

    polling.stop().await;
    polling.stop().await;

    assert!(!polling.is_running());
    assert_eq!(polling.cycles(), 0);
}

#[tokio::test]
async fn test_loop_refreshes_until_stopped() {
    let server = MockServer::start().await;
    mount_healthy_account(&server).await;

    let client = create_client(&server);
    let polling = PollingLoop::new(Arc::clone(&client));
    polling.start_default();
    assert!(polling.is_running());

    tokio::time::sleep(Duration::from_millis(300)).await;
    polling.stop().await;

    assert!(!polling.is_running());
    assert!(polling.cycles() >= 2);
    assert_eq!(polling.failed_cycles(), 0);
    assert!(polling.last_report().is_some());
    assert_eq!(client.latest_measurement().and_then(|m| m.weight), Some(70.5));

    // Stopping releases the session
    assert!(!client.is_authenticated());

    let cycles = polling.cycles();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(polling.cycles(), cycles);
}

#[tokio::test]
async fn test_loop_survives_failing_cycles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/users/sign_in.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let polling = PollingLoop::new(create_client(&server));
    polling.start(Duration::from_millis(20));

    tokio::time::sleep(Duration::from_millis(250)).await;

    assert!(polling.is_running());
    assert!(polling.failed_cycles() >= 2);
    assert_eq!(polling.failed_cycles(), polling.cycles());
    assert!(polling.last_report().is_none());

    polling.stop().await;
    assert!(!polling.is_running());
}

#[tokio::test]
async fn test_second_start_keeps_running_worker() {
    let server = MockServer::start().await;
    mount_healthy_account(&server).await;

    let polling = PollingLoop::new(create_client(&server));
    polling.start(Duration::from_secs(60));
    polling.start(Duration::from_millis(1));

    tokio::time::sleep(Duration::from_millis(150)).await;

    // The one-minute interval is still in effect
    assert_eq!(polling.cycles(), 1);
    polling.stop().await;
}

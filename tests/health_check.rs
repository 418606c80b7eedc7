mod common;

use boilerplate::health::{DependencyCheck, HttpProbe, PgProbe};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// test me: cargo t --test health_check -- --nocapture --show-output
#[tokio::test]
async fn health_report_lists_every_check_when_healthy() {
    let app = common::spawn_app(true);
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/health", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"status":"Healthy","checks":[{"name":"live","status":"Healthy"},{"name":"ready","status":"Healthy"},{"name":"database","status":"Healthy"}]}"#
    );
}

#[tokio::test]
async fn health_report_is_503_when_not_ready_and_database_down() {
    let app = common::spawn_app(false);
    app.readiness.set_ready(false);
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/health", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 503);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "Unhealthy");
    assert_eq!(
        body["checks"],
        serde_json::json!([
            {"name": "live", "status": "Healthy"},
            {"name": "ready", "status": "Unhealthy"},
            {"name": "database", "status": "Unhealthy"}
        ])
    );
}

#[tokio::test]
async fn database_endpoint_follows_reachability() {
    let client = reqwest::Client::new();

    let down = common::spawn_app(false);
    let response = client
        .get(&format!("{}/health/database", &down.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 503);
    assert_eq!(response.text().await.unwrap(), "Unhealthy");

    let up = common::spawn_app(true);
    let response = client
        .get(&format!("{}/health/database", &up.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "Healthy");
}

#[tokio::test]
async fn unreachable_postgres_is_reported_not_raised() {
    let readiness = boilerplate::health::ReadinessState::default();
    let mut registry = boilerplate::health::HealthRegistry::new();
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(300))
        .connect_lazy_with(PgConnectOptions::new().host("127.0.0.1").port(1));
    registry
        .register(
            "database",
            DependencyCheck::new("database", PgProbe::new(pool), Duration::from_secs(2)),
        )
        .unwrap();
    let app = common::spawn_app_with_registry(registry, readiness);

    let response = reqwest::Client::new()
        .get(&format!("{}/health", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 503);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["checks"][0]["status"], "Unhealthy");
}

#[tokio::test]
async fn configured_http_dependency_gets_its_own_endpoint() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&upstream)
        .await;

    let readiness = boilerplate::health::ReadinessState::default();
    let mut registry = common::default_registry(&readiness, true);
    registry
        .register(
            "billing",
            DependencyCheck::new(
                "billing",
                HttpProbe::new(reqwest::Client::new(), format!("{}/health", upstream.uri())),
                Duration::from_secs(1),
            ),
        )
        .unwrap();
    let app = common::spawn_app_with_registry(registry, readiness);
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/health/billing", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .get(&format!("{}/health/unknown", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn readiness_drops_before_server_stops() {
    let app = common::spawn_app(true);
    let client = reqwest::Client::new();
    let (trigger, signal) = tokio::sync::oneshot::channel::<()>();

    let drain = tokio::spawn(boilerplate::shutdown::drain_on_signal(
        async move {
            let _ = signal.await;
        },
        app.handle.clone(),
        app.readiness.clone(),
        Duration::from_millis(500),
    ));

    let response = client
        .get(&format!("{}/health/ready", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 200);

    trigger.send(()).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = client
        .get(&format!("{}/health/ready", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 503);

    let response = client
        .get(&format!("{}/health/live", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 200);

    // idle keep-alive connections would hold up the graceful stop
    drop(client);
    drain.await.unwrap();
    assert!(!app.readiness.is_ready());
}

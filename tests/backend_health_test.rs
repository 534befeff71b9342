use reqwest::Client;
use serde_json::Value;

mod common;
use common::utils::spawn_app_without_db;

#[tokio::test]
async fn backend_health_reports_up() {
    // Arrange
    let test_app = spawn_app_without_db().await;
    let client = Client::new();

    // Act
    let response = client
        .get(&format!("{}/backend_health", &test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "UP");
}

#[tokio::test]
async fn unknown_endpoint_returns_json_404() {
    // Arrange
    let test_app = spawn_app_without_db().await;
    let client = Client::new();

    // Act
    let response = client
        .get(&format!("{}/api/does-not-exist", &test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(404, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Endpoint not found");
}

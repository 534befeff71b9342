use reqwest::Client;
use serde_json::{json, Value};

mod common;
use common::utils::{spawn_app, spawn_app_without_db};

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn register_user_working() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let username = format!("player{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let email = format!("{}@Example.com", username);

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", &test_app.address))
        .json(&json!({
            "username": username,
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 201);
    assert!(body["data"]["user_id"].is_string());

    let saved: (String, String, String, String) =
        sqlx::query_as("SELECT username, email, role, password_hash FROM users WHERE username = $1")
            .bind(&username)
            .fetch_one(&test_app.db_pool)
            .await
            .expect("Failed to fetch saved user.");
    assert_eq!(saved.0, username);
    assert_eq!(saved.1, email.to_lowercase());
    assert_eq!(saved.2, "user");
    assert_ne!(saved.3, "password123");
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn duplicate_username_or_email_returns_409() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let url = format!("{}/api/auth/register", &test_app.address);
    let first = json!({
        "username": "duplicated",
        "email": "first@example.com",
        "password": "password123"
    });
    let same_username = json!({
        "username": "duplicated",
        "email": "second@example.com",
        "password": "password123"
    });
    let same_email = json!({
        "username": "somebodyelse",
        "email": "FIRST@example.com",
        "password": "password123"
    });

    // Act
    let created = client.post(&url).json(&first).send().await.unwrap();
    let username_clash = client.post(&url).json(&same_username).send().await.unwrap();
    let email_clash = client.post(&url).json(&same_email).send().await.unwrap();

    // Assert
    assert_eq!(201, created.status().as_u16());
    assert_eq!(409, username_clash.status().as_u16());
    assert_eq!(409, email_clash.status().as_u16());
    let body: Value = email_clash.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn invalid_registration_payloads_return_400() {
    // Arrange
    let test_app = spawn_app_without_db().await;
    let client = Client::new();
    let test_cases = vec![
        (
            json!({ "username": "ab", "email": "ok@example.com", "password": "password123" }),
            "username too short",
        ),
        (
            json!({ "username": "has space", "email": "ok@example.com", "password": "password123" }),
            "username with whitespace",
        ),
        (
            json!({ "username": "validname", "email": "not-an-email", "password": "password123" }),
            "invalid email",
        ),
        (
            json!({ "username": "validname", "email": "ok@example.com", "password": "123" }),
            "password too short",
        ),
        (json!({ "username": "validname" }), "missing fields"),
    ];

    for (payload, description) in test_cases {
        // Act
        let response = client
            .post(&format!("{}/api/auth/register", &test_app.address))
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request.");

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 when the payload was {}.",
            description
        );
    }
}

#[tokio::test]
async fn five_character_password_is_rejected_with_message() {
    // Arrange
    let test_app = spawn_app_without_db().await;
    let client = Client::new();

    // Act
    let response = client
        .post(&format!("{}/api/auth/register", &test_app.address))
        .json(&json!({ "username": "validname", "email": "ok@example.com", "password": "12345" }))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Password must be at least 6 characters");
}

use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use uuid::Uuid;

use arena_backend::auth::jwt::generate_token;
use arena_backend::config::jwt::JwtSettings;
use arena_backend::config::settings::{get_config, get_jwt_settings, DatabaseSettings, Settings};
use arena_backend::models::user::{User, UserRole};
use arena_backend::run;
use arena_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub jwt_settings: JwtSettings,
    pub upload_dir: String,
}

pub struct UserRegLoginResponse {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub email: String,
}

fn test_config() -> Settings {
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.application.upload_dir = std::env::temp_dir()
        .join(format!("arena-uploads-{}", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    configuration
}

async fn launch(configuration: Settings, connection_pool: PgPool) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let jwt_settings = get_jwt_settings(&configuration);
    let upload_dir = configuration.application.upload_dir.clone();
    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings.clone(),
        configuration.application,
    )
    .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        jwt_settings,
        upload_dir,
    }
}

/// Full application against a fresh, migrated database.
pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let configuration = test_config();
    let connection_pool = configure_db(&configuration.database).await;
    launch(configuration, connection_pool).await
}

/// Application whose pool never connects. Good for anything rejected
/// before a query runs: auth guards, id parsing, body validation, uploads.
pub async fn spawn_app_without_db() -> TestApp {
    Lazy::force(&TRACING);

    let configuration = test_config();
    let connection_pool = PgPoolOptions::new()
        .connect_lazy(configuration.database.connection_string().expose_secret())
        .expect("Failed to create lazy Postgres pool");
    launch(configuration, connection_pool).await
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(config.connection_string_without_db().expose_secret())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Signs a token for a user that only exists in the token itself.
pub fn token_for_role(jwt_settings: &JwtSettings, role: UserRole) -> String {
    let username = format!("tokenuser{}", &Uuid::new_v4().simple().to_string()[..8]);
    let user = User {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", username),
        username,
        password_hash: String::new(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    generate_token(&user, jwt_settings).expect("Failed to sign token")
}

pub async fn create_test_user_and_login(app_address: &str) -> UserRegLoginResponse {
    let client = Client::new();
    let username = format!("user{}", &Uuid::new_v4().simple().to_string()[..12]);
    let password = "password123";
    let email = format!("{}@example.com", username);

    let register_response = client
        .post(&format!("{}/api/auth/register", app_address))
        .json(&json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to register user.");
    assert_eq!(201, register_response.status().as_u16());

    let (token, user_id) = login(app_address, &email, password).await;

    UserRegLoginResponse {
        token,
        user_id,
        username,
        email,
    }
}

/// Logs in and returns `(token, user_id)`.
pub async fn login(app_address: &str, email: &str, password: &str) -> (String, String) {
    let login_response = Client::new()
        .post(&format!("{}/api/auth/login", app_address))
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute login request.");
    assert_eq!(200, login_response.status().as_u16());

    let body: Value = login_response.json().await.expect("Failed to parse login response");
    let token = body["data"]["token"].as_str().expect("No token in response").to_string();
    let user_id = body["data"]["user_id"].as_str().expect("No user_id in response").to_string();
    (token, user_id)
}

pub async fn make_authenticated_request(
    client: &Client,
    method: reqwest::Method,
    url: &str,
    token: &str,
    body: Option<Value>,
) -> reqwest::Response {
    let mut request = client
        .request(method, url)
        .header("Authorization", format!("Bearer {}", token));

    if let Some(json_body) = body {
        request = request.json(&json_body);
    }

    request.send().await.expect("Failed to execute request")
}

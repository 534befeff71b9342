use reqwest::{Client, Method};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::utils::{
    create_test_user_and_login, login, make_authenticated_request, UserRegLoginResponse,
};

/// Registers a user, promotes them to admin directly in the database and
/// logs in again so the token carries the admin role.
pub async fn create_admin_user_and_login(app_address: &str, pool: &PgPool) -> UserRegLoginResponse {
    let user = create_test_user_and_login(app_address).await;

    sqlx::query("UPDATE users SET role = 'admin' WHERE username = $1")
        .bind(&user.username)
        .execute(pool)
        .await
        .expect("Failed to promote user to admin");

    let (token, user_id) = login(app_address, &user.email, "password123").await;
    UserRegLoginResponse { token, user_id, ..user }
}

fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

async fn create(app_address: &str, token: &str, resource: &str, body: Value) -> Value {
    let response = make_authenticated_request(
        &Client::new(),
        Method::POST,
        &format!("{}/api/admin/{}", app_address, resource),
        token,
        Some(body),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "creating {} failed", resource);

    let body: Value = response.json().await.expect("Failed to parse create response");
    body["data"].clone()
}

pub async fn create_test_player(app_address: &str, token: &str) -> Value {
    let suffix = unique_suffix();
    create(
        app_address,
        token,
        "players",
        json!({
            "name": format!("Player {}", suffix),
            "ml_nickname": format!("nick{}", suffix),
            "ml_id": format!("ml{}", suffix),
            "status": "active"
        }),
    )
    .await
}

/// Creates a team of `size` fresh players; the first one is captain.
pub async fn create_test_team(app_address: &str, token: &str, size: usize) -> Value {
    let mut members = Vec::new();
    for _ in 0..size {
        let player = create_test_player(app_address, token).await;
        members.push(player["id"].as_str().unwrap().to_string());
    }

    create(
        app_address,
        token,
        "teams",
        json!({
            "team_name": format!("Team {}", unique_suffix()),
            "captain_id": members[0],
            "members": members
        }),
    )
    .await
}

pub async fn create_test_tournament(app_address: &str, token: &str, team_ids: &[&str]) -> Value {
    create(
        app_address,
        token,
        "tournaments",
        json!({
            "name": format!("Cup {}", unique_suffix()),
            "description": "Test tournament",
            "start_date": "2026-11-01T00:00:00Z",
            "end_date": "2026-11-15T00:00:00Z",
            "prize_pool": "Rp 100.000.000",
            "status": "upcoming",
            "teams_participating": team_ids
        }),
    )
    .await
}

pub async fn create_test_match(
    app_address: &str,
    token: &str,
    tournament_id: &str,
    team_a_id: &str,
    team_b_id: &str,
) -> Value {
    create(
        app_address,
        token,
        "matches",
        json!({
            "tournament_id": tournament_id,
            "team_a_id": team_a_id,
            "team_b_id": team_b_id,
            "match_date": "2026-11-02T12:00:00Z",
            "match_time": "19:00",
            "location": "Jakarta",
            "round": "Group Stage",
            "status": "scheduled"
        }),
    )
    .await
}

/// Two teams, a tournament featuring both and one match between them.
pub struct Fixture {
    pub team_a: Value,
    pub team_b: Value,
    pub tournament: Value,
    pub game: Value,
}

pub async fn create_test_fixture(app_address: &str, token: &str) -> Fixture {
    let team_a = create_test_team(app_address, token, 2).await;
    let team_b = create_test_team(app_address, token, 2).await;
    let a_id = team_a["id"].as_str().unwrap().to_string();
    let b_id = team_b["id"].as_str().unwrap().to_string();

    let tournament = create_test_tournament(app_address, token, &[&a_id, &b_id]).await;
    let tournament_id = tournament["id"].as_str().unwrap().to_string();
    let game = create_test_match(app_address, token, &tournament_id, &a_id, &b_id).await;

    Fixture { team_a, team_b, tournament, game }
}

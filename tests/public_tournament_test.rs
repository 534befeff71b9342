use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::admin_helpers::{create_admin_user_and_login, create_test_fixture};
use common::utils::{make_authenticated_request, spawn_app};

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn public_listing_needs_no_token() {
    // Arrange
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app.address, &test_app.db_pool).await;
    let fixture = create_test_fixture(&test_app.address, &admin.token).await;

    // Act
    let response = Client::new()
        .get(&format!("{}/api/tournaments", &test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], fixture.tournament["id"]);
    assert!(listed[0].get("created_by").is_none());
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn tournament_details_embed_teams_and_matches() {
    // Arrange
    let test_app = spawn_app().await;
    let admin = create_admin_user_and_login(&test_app.address, &test_app.db_pool).await;
    let fixture = create_test_fixture(&test_app.address, &admin.token).await;

    // Act
    let response = Client::new()
        .get(&format!(
            "{}/api/tournaments/{}",
            &test_app.address,
            fixture.tournament["id"].as_str().unwrap()
        ))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["teams"].as_array().unwrap().len(), 2);
    let game = &data["matches"][0];
    assert_eq!(game["id"], fixture.game["id"]);
    assert_eq!(game["team_a"]["team_name"], fixture.team_a["team_name"]);
    assert_eq!(game["team_b"]["team_name"], fixture.team_b["team_name"]);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn tournament_tickets_are_listed_publicly() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin = create_admin_user_and_login(&test_app.address, &test_app.db_pool).await;
    let fixture = create_test_fixture(&test_app.address, &admin.token).await;
    let tournament_id = fixture.tournament["id"].as_str().unwrap();
    make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/api/admin/tickets", &test_app.address),
        &admin.token,
        Some(json!({
            "tournament_id": tournament_id,
            "price": 150000,
            "quantity_available": 100,
            "description": "Regular"
        })),
    )
    .await;

    // Act
    let tickets = client
        .get(&format!("{}/api/tournaments/{}/tickets", &test_app.address, tournament_id))
        .send()
        .await
        .expect("Failed to execute request.");
    let missing = client
        .get(&format!("{}/api/tournaments/{}/tickets", &test_app.address, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(200, tickets.status().as_u16());
    let body: Value = tickets.json().await.unwrap();
    assert_eq!(body["data"][0]["price"], 150000);
    assert_eq!(body["data"][0]["description"], "Regular");
    assert_eq!(404, missing.status().as_u16());
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn unknown_tournament_returns_404() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = Client::new()
        .get(&format!("{}/api/tournaments/{}", &test_app.address, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(404, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

use reqwest::{Client, Method};
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::admin_helpers::{create_admin_user_and_login, create_test_player, create_test_team};
use common::utils::{make_authenticated_request, spawn_app};

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn team_details_resolve_captain_and_members() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin = create_admin_user_and_login(&test_app.address, &test_app.db_pool).await;
    let team = create_test_team(&test_app.address, &admin.token, 3).await;
    let team_id = team["id"].as_str().unwrap();

    // Act
    let response = make_authenticated_request(
        &client,
        Method::GET,
        &format!("{}/api/admin/teams/{}", &test_app.address, team_id),
        &admin.token,
        None,
    )
    .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let data = &body["data"];
    assert_eq!(data["members"], team["members"]);
    assert_eq!(data["captain"]["id"], team["captain_id"]);
    let details = data["member_details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    // Member details follow roster order
    for (detail, member_id) in details.iter().zip(team["members"].as_array().unwrap()) {
        assert_eq!(&detail["id"], member_id);
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn captain_must_be_a_member() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin = create_admin_user_and_login(&test_app.address, &test_app.db_pool).await;
    let captain = create_test_player(&test_app.address, &admin.token).await;
    let member = create_test_player(&test_app.address, &admin.token).await;

    // Act
    let response = make_authenticated_request(
        &client,
        Method::POST,
        &format!("{}/api/admin/teams", &test_app.address),
        &admin.token,
        Some(json!({
            "team_name": "Outsiders",
            "captain_id": captain["id"],
            "members": [member["id"]]
        })),
    )
    .await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Captain must be one of the team members");
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn unknown_players_and_taken_names_are_rejected() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin = create_admin_user_and_login(&test_app.address, &test_app.db_pool).await;
    let existing = create_test_team(&test_app.address, &admin.token, 1).await;
    let player = create_test_player(&test_app.address, &admin.token).await;
    let ghost = Uuid::new_v4().to_string();
    let url = format!("{}/api/admin/teams", &test_app.address);

    // Act
    let ghost_member = make_authenticated_request(
        &client,
        Method::POST,
        &url,
        &admin.token,
        Some(json!({
            "team_name": "Ghosts",
            "captain_id": player["id"],
            "members": [player["id"], ghost]
        })),
    )
    .await;
    let taken_name = make_authenticated_request(
        &client,
        Method::POST,
        &url,
        &admin.token,
        Some(json!({
            "team_name": existing["team_name"],
            "captain_id": player["id"],
            "members": [player["id"]]
        })),
    )
    .await;

    // Assert
    assert_eq!(400, ghost_member.status().as_u16());
    let body: Value = ghost_member.json().await.unwrap();
    assert_eq!(body["message"], format!("Member player not found: {}", ghost));
    assert_eq!(409, taken_name.status().as_u16());
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn update_replaces_roster_and_delete_removes_team() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let admin = create_admin_user_and_login(&test_app.address, &test_app.db_pool).await;
    let team = create_test_team(&test_app.address, &admin.token, 2).await;
    let newcomer = create_test_player(&test_app.address, &admin.token).await;
    let team_url = format!("{}/api/admin/teams/{}", &test_app.address, team["id"].as_str().unwrap());

    // Act
    let updated = make_authenticated_request(
        &client,
        Method::PUT,
        &team_url,
        &admin.token,
        Some(json!({
            "captain_id": newcomer["id"],
            "members": [newcomer["id"], team["members"][0]]
        })),
    )
    .await;

    // Assert
    assert_eq!(200, updated.status().as_u16());
    let body: Value = updated.json().await.unwrap();
    assert_eq!(body["data"]["captain_id"], newcomer["id"]);
    assert_eq!(body["data"]["members"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["team_name"], team["team_name"]);

    // Act
    let deleted = make_authenticated_request(&client, Method::DELETE, &team_url, &admin.token, None).await;
    let fetched = make_authenticated_request(&client, Method::GET, &team_url, &admin.token, None).await;

    // Assert
    assert_eq!(200, deleted.status().as_u16());
    assert_eq!(404, fetched.status().as_u16());
}

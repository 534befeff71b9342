use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::players;
use crate::error::{parse_id, ApiError};
use crate::models::common::ApiResponse;
use crate::models::player::{CreatePlayerRequest, NewPlayer, UpdatePlayerRequest};

async fn ensure_unique(pool: &PgPool, player: &NewPlayer, except: Option<Uuid>) -> Result<(), ApiError> {
    match players::find_conflict(pool, &player.ml_nickname, &player.ml_id, except).await? {
        Some("ml_nickname") => Err(ApiError::Conflict(format!(
            "ML nickname {} is already taken",
            player.ml_nickname
        ))),
        Some(_) => Err(ApiError::Conflict(format!("ML ID {} is already registered", player.ml_id))),
        None => Ok(()),
    }
}

// GET /admin/players
#[tracing::instrument(name = "Admin list players", skip(pool))]
pub async fn get_players(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let players = players::list_players(&pool).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Players retrieved", players)))
}

// POST /admin/players
#[tracing::instrument(name = "Admin create player", skip(request, pool), fields(ml_nickname = %request.ml_nickname))]
pub async fn create_player(
    request: web::Json<CreatePlayerRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let player = request.validate().map_err(ApiError::Validation)?;
    ensure_unique(&pool, &player, None).await?;

    let created = players::insert_player(&pool, &player).await?;
    tracing::info!("Player {} created", created.id);
    Ok(HttpResponse::Created().json(ApiResponse::created("Player created successfully", created)))
}

// GET /admin/players/{id}
#[tracing::instrument(name = "Admin get player", skip(pool))]
pub async fn get_player_by_id(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let player_id = parse_id(&path, "player")?;
    let player = players::find_by_id(&pool, player_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Player not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Player retrieved", player)))
}

// PUT /admin/players/{id}
#[tracing::instrument(name = "Admin update player", skip(request, pool))]
pub async fn update_player(
    path: web::Path<String>,
    request: web::Json<UpdatePlayerRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let player_id = parse_id(&path, "player")?;
    if request.is_empty() {
        return Err(ApiError::BadRequest("No fields provided to update".to_string()));
    }

    let current = players::find_by_id(&pool, player_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Player not found".to_string()))?;
    let merged = request.apply_to(&current).map_err(ApiError::Validation)?;
    ensure_unique(&pool, &merged, Some(player_id)).await?;

    let updated = players::update_player(&pool, player_id, &merged)
        .await?
        .ok_or_else(|| ApiError::NotFound("Player not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Player updated successfully", updated)))
}

// DELETE /admin/players/{id}
#[tracing::instrument(name = "Admin delete player", skip(pool))]
pub async fn delete_player(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let player_id = parse_id(&path, "player")?;
    if !players::delete_player(&pool, player_id).await? {
        return Err(ApiError::NotFound("Player not found".to_string()));
    }
    tracing::info!("Player {} deleted", player_id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("Player deleted successfully")))
}

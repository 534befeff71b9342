use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::jwt::Claims;
use crate::db::{teams, tournaments};
use crate::error::{parse_id, ApiError};
use crate::handlers::tournament_handler::load_details;
use crate::models::common::ApiResponse;
use crate::models::tournament::{CreateTournamentRequest, NewTournament, UpdateTournamentRequest};

async fn check_teams_exist(pool: &PgPool, tournament: &NewTournament) -> Result<(), ApiError> {
    let missing = teams::missing_ids(pool, &tournament.teams_participating).await?;
    if let Some(first) = missing.first() {
        return Err(ApiError::BadRequest(format!("Team not found: {}", first)));
    }
    Ok(())
}

// GET /admin/tournaments
#[tracing::instrument(name = "Admin list tournaments", skip(pool))]
pub async fn get_tournaments(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let tournaments = tournaments::list_with_teams(&pool).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tournaments retrieved", tournaments)))
}

// POST /admin/tournaments
#[tracing::instrument(
    name = "Admin create tournament",
    skip(request, claims, pool),
    fields(name = %request.name, admin = %claims.username)
)]
pub async fn create_tournament(
    request: web::Json<CreateTournamentRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let tournament = request.validate().map_err(ApiError::Validation)?;
    check_teams_exist(&pool, &tournament).await?;

    let created = tournaments::insert_tournament(&pool, &tournament, claims.user_id()).await?;
    tracing::info!("Tournament {} created", created.id);
    Ok(HttpResponse::Created().json(ApiResponse::created("Tournament created successfully", created)))
}

// GET /admin/tournaments/{id}
#[tracing::instrument(name = "Admin get tournament", skip(pool))]
pub async fn get_tournament_by_id(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = parse_id(&path, "tournament")?;
    let details = load_details(&pool, tournament_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tournament retrieved", details)))
}

// PUT /admin/tournaments/{id}
#[tracing::instrument(name = "Admin update tournament", skip(request, pool))]
pub async fn update_tournament(
    path: web::Path<String>,
    request: web::Json<UpdateTournamentRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = parse_id(&path, "tournament")?;
    if request.is_empty() {
        return Err(ApiError::BadRequest("No fields provided to update".to_string()));
    }

    let current = tournaments::find_by_id(&pool, tournament_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tournament not found".to_string()))?;
    let merged = request.apply_to(&current).map_err(ApiError::Validation)?;
    check_teams_exist(&pool, &merged).await?;

    let updated = tournaments::update_tournament(&pool, tournament_id, &merged)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tournament not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tournament updated successfully", updated)))
}

// DELETE /admin/tournaments/{id}
#[tracing::instrument(name = "Admin delete tournament", skip(pool))]
pub async fn delete_tournament(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = parse_id(&path, "tournament")?;
    if !tournaments::delete_tournament(&pool, tournament_id).await? {
        return Err(ApiError::NotFound("Tournament not found".to_string()));
    }
    tracing::info!("Tournament {} deleted", tournament_id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("Tournament deleted successfully")))
}

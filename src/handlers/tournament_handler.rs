use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::{matches, tickets, tournaments};
use crate::error::{parse_id, ApiError};
use crate::models::common::ApiResponse;
use crate::models::tournament::{TournamentDetails, TournamentWithTeams};

#[tracing::instrument(name = "List public tournaments", skip(pool))]
pub async fn list_tournaments(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let tournaments = tournaments::list_public(&pool).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tournaments retrieved", tournaments)))
}

/// Tournament with its teams and every match, both sides resolved.
pub async fn load_details(
    pool: &PgPool,
    tournament_id: uuid::Uuid,
) -> Result<TournamentDetails, ApiError> {
    let TournamentWithTeams { tournament, teams } = tournaments::find_with_teams(pool, tournament_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tournament not found".to_string()))?;
    let matches = matches::list_with_teams(pool, Some(tournament_id)).await?;

    Ok(TournamentDetails { tournament, teams, matches })
}

#[tracing::instrument(name = "Get public tournament", skip(pool))]
pub async fn get_tournament(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = parse_id(&path, "tournament")?;
    let details = load_details(&pool, tournament_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tournament retrieved", details)))
}

#[tracing::instrument(name = "List tickets of a tournament", skip(pool))]
pub async fn get_tournament_tickets(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = parse_id(&path, "tournament")?;
    if !tournaments::exists(&pool, tournament_id).await? {
        return Err(ApiError::NotFound("Tournament not found".to_string()));
    }

    let tickets = tickets::list_tickets(&pool, Some(tournament_id)).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Tickets retrieved", tickets)))
}

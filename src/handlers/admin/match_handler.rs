use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::{matches, teams, tournaments};
use crate::error::{parse_field_id, parse_id, ApiError};
use crate::models::common::ApiResponse;
use crate::models::matches::{CreateMatchRequest, MatchQuery, NewMatch, UpdateMatchRequest};

/// The tournament and both teams of a match must exist.
async fn check_references(pool: &PgPool, game: &NewMatch) -> Result<(), ApiError> {
    if !tournaments::exists(pool, game.tournament_id).await? {
        return Err(ApiError::BadRequest("Tournament not found".to_string()));
    }
    let missing = teams::missing_ids(pool, &[game.team_a_id, game.team_b_id]).await?;
    if missing.contains(&game.team_a_id) {
        return Err(ApiError::BadRequest("Team A not found".to_string()));
    }
    if missing.contains(&game.team_b_id) {
        return Err(ApiError::BadRequest("Team B not found".to_string()));
    }
    Ok(())
}

// GET /admin/matches?tournament_id=
#[tracing::instrument(name = "Admin list matches", skip(query, pool))]
pub async fn get_matches(
    query: web::Query<MatchQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let tournament_id = match query.tournament_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_field_id(raw, "tournament_id")?),
        _ => None,
    };
    let matches = matches::list_with_teams(&pool, tournament_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Matches retrieved", matches)))
}

// POST /admin/matches
#[tracing::instrument(name = "Admin create match", skip(request, pool), fields(round = %request.round))]
pub async fn create_match(
    request: web::Json<CreateMatchRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let game = request.validate().map_err(ApiError::Validation)?;
    check_references(&pool, &game).await?;

    let created = matches::insert_match(&pool, &game).await?;
    tracing::info!("Match {} created", created.id);
    Ok(HttpResponse::Created().json(ApiResponse::created("Match created successfully", created)))
}

// GET /admin/matches/{id}
#[tracing::instrument(name = "Admin get match", skip(pool))]
pub async fn get_match_by_id(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let match_id = parse_id(&path, "match")?;
    let game = matches::find_with_teams(&pool, match_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Match retrieved", game)))
}

// PUT /admin/matches/{id}
#[tracing::instrument(name = "Admin update match", skip(request, pool))]
pub async fn update_match(
    path: web::Path<String>,
    request: web::Json<UpdateMatchRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let match_id = parse_id(&path, "match")?;
    if request.is_empty() {
        return Err(ApiError::BadRequest("No fields provided to update".to_string()));
    }

    let current = matches::find_by_id(&pool, match_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?;
    let merged = request.apply_to(&current).map_err(ApiError::Validation)?;
    check_references(&pool, &merged).await?;

    let updated = matches::update_match(&pool, match_id, &merged)
        .await?
        .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Match updated successfully", updated)))
}

// DELETE /admin/matches/{id}
#[tracing::instrument(name = "Admin delete match", skip(pool))]
pub async fn delete_match(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let match_id = parse_id(&path, "match")?;
    if !matches::delete_match(&pool, match_id).await? {
        return Err(ApiError::NotFound("Match not found".to_string()));
    }
    tracing::info!("Match {} deleted", match_id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("Match deleted successfully")))
}

use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{players, teams};
use crate::error::{parse_id, ApiError};
use crate::models::common::ApiResponse;
use crate::models::team::{CreateTeamRequest, NewTeam, UpdateTeamRequest};

/// Captain and members exist and the name is free.
async fn check_references(pool: &PgPool, team: &NewTeam, except: Option<Uuid>) -> Result<(), ApiError> {
    let missing = players::missing_ids(pool, &team.referenced_players()).await?;
    if let Some(first) = missing.first() {
        let message = if *first == team.captain_id {
            "Captain player not found".to_string()
        } else {
            format!("Member player not found: {}", first)
        };
        return Err(ApiError::BadRequest(message));
    }

    if teams::team_name_taken(pool, &team.team_name, except).await? {
        return Err(ApiError::Conflict(format!("Team name {} is already taken", team.team_name)));
    }
    Ok(())
}

// GET /admin/teams
#[tracing::instrument(name = "Admin list teams", skip(pool))]
pub async fn get_teams(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let teams = teams::list_teams_with_details(&pool).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Teams retrieved", teams)))
}

// POST /admin/teams
#[tracing::instrument(name = "Admin create team", skip(request, pool), fields(team_name = %request.team_name))]
pub async fn create_team(
    request: web::Json<CreateTeamRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let team = request.validate().map_err(ApiError::Validation)?;
    check_references(&pool, &team, None).await?;

    let created = teams::insert_team(&pool, &team).await?;
    tracing::info!("Team {} created with {} members", created.id, created.members.len());
    Ok(HttpResponse::Created().json(ApiResponse::created("Team created successfully", created)))
}

// GET /admin/teams/{id}
#[tracing::instrument(name = "Admin get team", skip(pool))]
pub async fn get_team_by_id(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let team_id = parse_id(&path, "team")?;
    let team = teams::find_with_details(&pool, team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Team retrieved", team)))
}

// PUT /admin/teams/{id}
#[tracing::instrument(name = "Admin update team", skip(request, pool))]
pub async fn update_team(
    path: web::Path<String>,
    request: web::Json<UpdateTeamRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let team_id = parse_id(&path, "team")?;
    if request.is_empty() {
        return Err(ApiError::BadRequest("No fields provided to update".to_string()));
    }

    let current = teams::find_by_id(&pool, team_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;
    let merged = request.apply_to(&current).map_err(ApiError::Validation)?;
    check_references(&pool, &merged, Some(team_id)).await?;

    let updated = teams::update_team(&pool, team_id, &merged)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Team updated successfully", updated)))
}

// DELETE /admin/teams/{id}
#[tracing::instrument(name = "Admin delete team", skip(pool))]
pub async fn delete_team(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let team_id = parse_id(&path, "team")?;
    if !teams::delete_team(&pool, team_id).await? {
        return Err(ApiError::NotFound("Team not found".to_string()));
    }
    tracing::info!("Team {} deleted", team_id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("Team deleted successfully")))
}

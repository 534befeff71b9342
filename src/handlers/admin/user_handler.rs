use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::auth::jwt::Claims;
use crate::db::users;
use crate::error::{parse_id, ApiError};
use crate::models::common::ApiResponse;
use crate::models::user::UpdateUserRequest;

// GET /admin/users
#[tracing::instrument(name = "Admin list users", skip(pool))]
pub async fn get_users(pool: web::Data<PgPool>) -> Result<HttpResponse, ApiError> {
    let users = users::list_users(&pool).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Users retrieved", users)))
}

// GET /admin/users/{id}
#[tracing::instrument(name = "Admin get user", skip(pool))]
pub async fn get_user_by_id(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path, "user")?;
    let user = users::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("User retrieved", user)))
}

// PUT /admin/users/{id}
#[tracing::instrument(name = "Admin update user", skip(request, claims, pool), fields(admin = %claims.username))]
pub async fn update_user(
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path, "user")?;
    request.validate()?;
    let changes = request.into_inner().into_changes().map_err(ApiError::Validation)?;

    if users::find_by_id(&pool, user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    if let Some(username) = &changes.username {
        if users::username_taken(&pool, username, Some(user_id)).await? {
            return Err(ApiError::Conflict(format!("Username {} is already taken", username)));
        }
    }
    if let Some(email) = &changes.email {
        if users::email_taken(&pool, email, Some(user_id)).await? {
            return Err(ApiError::Conflict(format!("Email {} is already registered", email)));
        }
    }

    let updated = users::update_user(&pool, user_id, &changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    tracing::info!("User {} updated by {}", user_id, claims.username);
    Ok(HttpResponse::Ok().json(ApiResponse::ok("User updated successfully", updated)))
}

// DELETE /admin/users/{id}
#[tracing::instrument(name = "Admin delete user", skip(pool))]
pub async fn delete_user(
    path: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path, "user")?;
    if !users::delete_user(&pool, user_id).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    tracing::info!("User {} deleted", user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::message("User deleted successfully")))
}

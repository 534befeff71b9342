use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::auth::jwt::{generate_token, Claims};
use crate::auth::password::verify_password;
use crate::config::jwt::JwtSettings;
use crate::db::users;
use crate::error::ApiError;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::common::ApiResponse;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        email = %login_form.email
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    let email = login_form.email.trim().to_lowercase();
    if email.is_empty() || login_form.password.expose_secret().is_empty() {
        return Err(ApiError::Validation("Email and password are required".to_string()));
    }

    let Some(user) = users::find_by_email(&pool, &email).await? else {
        tracing::info!("User not found or invalid credentials");
        return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
    };

    if !verify_password(login_form.password.expose_secret(), &user.password_hash) {
        tracing::info!("Invalid password");
        return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
    }

    let token = generate_token(&user, &jwt_settings)
        .map_err(|e| ApiError::Internal(format!("Error generating JWT token: {:?}", e)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        format!("Logged in as {}", user.role),
        LoginResponse {
            token,
            role: user.role,
            user_id: user.id,
            username: user.username,
            email: user.email,
        },
    )))
}

#[tracing::instrument(name = "Get own profile", skip(claims, pool), fields(username = %claims.username))]
pub async fn get_profile(
    claims: web::ReqData<Claims>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

    let user = users::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Profile retrieved", user)))
}

use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::db::users;
use crate::error::ApiError;
use crate::models::common::ApiResponse;
use crate::models::user::{RegistrationRequest, RegistrationResponse, UserRole};

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        username = %user_form.username,
        email = %user_form.email
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    user_form.validate()?;

    let username = user_form.username.trim();
    let email = user_form.email.trim().to_lowercase();

    if users::username_taken(&pool, username, None).await? {
        return Err(ApiError::Conflict(format!("Username {} is already registered", username)));
    }
    if users::email_taken(&pool, &email, None).await? {
        return Err(ApiError::Conflict(format!("Email {} is already registered", email)));
    }

    let password_hash = hash_password(user_form.password.expose_secret()).map_err(|e| {
        ApiError::Internal(format!("Failed to hash password: {}", e))
    })?;

    let user = users::insert_user(&pool, username, &email, &password_hash, UserRole::User).await?;
    tracing::info!("User {} registered", user.id);

    Ok(HttpResponse::Created().json(ApiResponse::created(
        "User registered successfully",
        RegistrationResponse { user_id: user.id },
    )))
}

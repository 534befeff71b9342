use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::common::text_enum;

text_enum!(
    /// Role carried in the user row and the token claims.
    UserRole {
        User => "user",
        Admin => "admin",
    }
);

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_registration_password"))]
pub struct RegistrationRequest {
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password: SecretString,
}

impl fmt::Display for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username: {}, Email: {}", self.username, self.email)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub user_id: Uuid,
}

/// Admin-side partial update. Absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Normalized values of an [`UpdateUserRequest`].
#[derive(Debug, PartialEq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl UpdateUserRequest {
    /// Expects `validate()` to have passed; trims and lowercases what it keeps.
    pub fn into_changes(self) -> Result<UserChanges, String> {
        if self.username.is_none() && self.email.is_none() && self.role.is_none() {
            return Err("At least one field (username, email, role) must be provided".to_string());
        }

        let username = match self.username {
            Some(username) => {
                let username = username.trim().to_string();
                check_username(&username)?;
                Some(username)
            }
            None => None,
        };

        let email = self.email.map(|email| email.trim().to_lowercase());

        let role = self.role.map(|r| r.parse::<UserRole>()).transpose()?;

        Ok(UserChanges { username, email, role })
    }
}

fn check_username(username: &str) -> Result<(), String> {
    let length = username.chars().count();
    if !(3..=50).contains(&length) {
        return Err("Username must be between 3 and 50 characters".to_string());
    }
    if username.chars().any(char::is_whitespace) {
        return Err("Username must not contain spaces".to_string());
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    check_username(username).map_err(|message| {
        let mut error = ValidationError::new("username");
        error.message = Some(message.into());
        error
    })
}

fn validate_registration_password(request: &RegistrationRequest) -> Result<(), ValidationError> {
    validate_password(&request.password)
}

fn validate_password(password: &SecretString) -> Result<(), ValidationError> {
    if password.expose_secret().chars().count() < 6 {
        let mut error = ValidationError::new("password");
        error.message = Some("Password must be at least 6 characters".into());
        return Err(error);
    }
    Ok(())
}

pub fn serialize_secret_string<S>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("[REDACTED]")
}

pub fn deserialize_secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s.into_boxed_str()))
}

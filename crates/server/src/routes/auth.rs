//! Signup and login endpoints over the injected user store

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::search::SearchBackend;
use crate::state::AppState;
use crate::users::UserRecord;

const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
}

/// POST /auth/signup
pub async fn signup<B>(
    State(state): State<AppState<B>>,
    Json(body): Json<Credentials>,
) -> Result<impl IntoResponse, AppError>
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    if state.users.lookup(&body.email).is_some() {
        return Err(AppError::BadRequest(
            "User already exists. Please login.".to_string(),
        ));
    }

    validate_password(&body.password).map_err(|msg| AppError::BadRequest(msg.to_string()))?;

    state.users.insert(
        body.email.clone(),
        UserRecord {
            password: body.password,
        },
    );
    if let Err(error) = state.users.persist() {
        tracing::error!(error = %error, "Failed to persist user store");
    }

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Signup successful. You can now login.".to_string(),
        }),
    ))
}

/// POST /auth/login
pub async fn login<B>(
    State(state): State<AppState<B>>,
    Json(body): Json<Credentials>,
) -> Result<Json<AuthResponse>, AppError>
where
    B: SearchBackend + Clone + Send + Sync + 'static,
{
    match state.users.lookup(&body.email) {
        Some(record) if record.password == body.password => Ok(Json(AuthResponse {
            message: "Login successful.".to_string(),
        })),
        _ => Err(AppError::Unauthorized(
            "Invalid email or password.".to_string(),
        )),
    }
}

/// Password policy: at least 6 characters, one letter, one digit, one
/// special character.
fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters long.");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("Password must contain at least one letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit.");
    }
    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err("Password must contain at least one special character.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_conforming_password() {
        assert!(validate_password("abc12!").is_ok());
    }

    #[test]
    fn rejects_short_password() {
        assert!(validate_password("a1!").is_err());
    }

    #[test]
    fn rejects_missing_character_classes() {
        assert!(validate_password("abcdef!").is_err()); // no digit
        assert!(validate_password("123456!").is_err()); // no letter
        assert!(validate_password("abc123").is_err()); // no special
    }
}

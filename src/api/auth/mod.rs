//! Authentication API endpoints
//!
//! Login checks a password and issues a fresh opaque auth token for the user.

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::User;
use crate::infrastructure::user::ErrorKind;

const INVALID_LOGIN: &str = "Invalid login or password";

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/login
///
/// Unknown logins and wrong passwords get the same 401 so the endpoint cannot be used to
/// probe which logins exist.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_facade
        .validate_password(&request.login, &request.password)
        .await
        .map_err(|e| match e.kind {
            ErrorKind::NotFound | ErrorKind::InvalidCredentials => {
                ApiError::unauthorized(INVALID_LOGIN)
            }
            _ => ApiError::from(e),
        })?;

    let token = state.token_generator.generate();
    state
        .user_facade
        .update_auth_token(user.id(), &token)
        .await?;

    info!(user_id = %user.id(), "User logged in");

    Ok(Json(LoginResponse { token, user }))
}

//! User endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{NewUser, User};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/{login}", get(get_user))
}

/// Create user request
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub login: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        let new_user = NewUser::new(request.login, request.email, request.password);

        match request.phone_number {
            Some(phone_number) => new_user.with_phone_number(phone_number),
            None => new_user,
        }
    }
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.user_facade.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{login}
pub async fn get_user(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state.user_facade.get(&login).await?;

    Ok(Json(user))
}

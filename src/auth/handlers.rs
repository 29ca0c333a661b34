use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{LoginRequest, LoginResponse};
use crate::auth::extractor::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::UserResponse;
use crate::users::validate;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/profile", get(profile))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let credentials = validate::validate_login(payload)?;
    let user = state
        .users
        .authenticate(&credentials.email, &credentials.password)
        .await?;
    let access_token = state.tokens.issue(user.id)?;

    Ok(Json(LoginResponse {
        status: "success",
        access_token,
        user: user.into(),
    }))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    // The token can outlive the account; a deleted user reads as 404.
    let user = state.users.get_user(user_id).await?;
    Ok(Json(user.into()))
}

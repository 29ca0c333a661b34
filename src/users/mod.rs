use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod service;
pub mod validate;

pub fn router() -> Router<AppState> {
    handlers::routes()
}

use crate::state::AppState;
use axum::{routing::post, Router};

pub mod dto;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod repo;
mod validation;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/refresh", post(handlers::refresh))
}

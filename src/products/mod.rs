use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{
    auth::{
        middleware::{auth, authorize},
        repo::Role,
    },
    state::AppState,
};

pub mod dto;
pub mod handlers;
pub mod query;
pub mod repo;

/// Product routes. Reads are public; writes run behind the
/// `auth -> authorize(roles)` chain, with the allowed set fixed per route.
pub fn router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", post(handlers::create_product))
        .route("/:id", delete(handlers::delete_product))
        .route_layer(middleware::from_fn(|req, next| {
            authorize(&[Role::Admin], req, next)
        }));

    let user_routes = Router::new()
        .route("/:id", put(handlers::update_product))
        .route_layer(middleware::from_fn(|req, next| {
            authorize(&[Role::User], req, next)
        }));

    let protected = admin_routes
        .merge(user_routes)
        .route_layer(middleware::from_fn_with_state(state, auth));

    Router::new()
        .route("/", get(handlers::list_products))
        .route("/:id", get(handlers::get_product))
        .merge(protected)
}

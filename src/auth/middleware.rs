use axum::{
    extract::{FromRef, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        jwt::{JwtKeys, TokenError},
        repo::Role,
    },
    error::ApiError,
    state::AppState,
};

/// Identity attached to the request by the authentication middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: Role,
}

/// Authentication stage: extract the bearer token, verify it against the
/// access secret, attach `CurrentUser`. Never touches the database — a
/// deleted user stays valid until the access token expires.
///
/// Expired and malformed tokens are logged differently but rejected with
/// the same message, so the response is not an oracle.
pub async fn auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let keys = JwtKeys::from_ref(&state);

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated("No token provided"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated("No token provided"))?;

    let claims = keys.verify_access(token).map_err(|e| {
        match e {
            TokenError::Expired => warn!("expired access token"),
            TokenError::Invalid => warn!("invalid access token"),
        }
        ApiError::InvalidToken("Invalid or expired token")
    })?;

    req.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        role: claims.role,
    });
    Ok(next.run(req).await)
}

/// Authorization stage: role gate over the identity the `auth` stage
/// attached. Pure, no I/O. The allowed set is fixed at route wiring time.
pub async fn authorize(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(ApiError::Unauthenticated("Not authenticated"))?;
    if !allowed.contains(&user.role) {
        return Err(ApiError::Forbidden);
    }
    Ok(next.run(req).await)
}

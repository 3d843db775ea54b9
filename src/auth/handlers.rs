use axum::{
    extract::{FromRef, State},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, MessageResponse, PublicUser, RegisterRequest, TokenResponse},
        jwt::{JwtKeys, TokenError},
        password::{hash_password, verify_password},
        repo::User,
        validation::{validate_login, validate_register},
    },
    error::ApiError,
    state::AppState,
};

pub(crate) const REFRESH_COOKIE: &str = "refreshToken";
const COOKIE_PATH: &str = "/api/auth";

/// Refresh tokens cross the wire only in this cookie: HttpOnly keeps it out
/// of script reach, SameSite=Strict out of cross-site requests, Secure
/// everywhere except local development.
fn refresh_cookie(token: String, ttl: std::time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path(COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::seconds(ttl.as_secs() as i64))
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, ""))
        .path(COOKIE_PATH)
        .http_only(true)
        .build()
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    validate_register(&payload)?;

    // Argon2 is deliberately slow; keep it off the async workers.
    let password = payload.password.clone();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(anyhow::Error::from)??;

    let user = User::create(&state.db, &payload.name, &payload.email, &hash, payload.role).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(user.into()))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    validate_login(&payload)?;

    // Unknown email and wrong password are indistinguishable on the wire.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let password = payload.password.clone();
    let stored_hash = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(anyhow::Error::from)??;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(user.id, user.role)?;
    let refresh_token = keys.sign_refresh(user.id)?;

    let jar = jar.add(refresh_cookie(
        refresh_token,
        keys.refresh_ttl,
        !state.config.is_development(),
    ));

    info!(user_id = %user.id, "user logged in");
    Ok((jar, Json(TokenResponse { access_token })))
}

/// Tokens are stateless, so logout only tells the client to drop the cookie;
/// an already-issued access token stays valid until it expires.
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(removal_cookie());
    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    )
}

#[instrument(skip(state, jar))]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Unauthenticated("No refresh token"))?;

    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&token).map_err(|e| {
        match e {
            TokenError::Expired => warn!("expired refresh token"),
            TokenError::Invalid => warn!("invalid refresh token"),
        }
        ApiError::InvalidToken("Invalid or expired refresh token")
    })?;

    // Role comes from the live user record, not the token, so role changes
    // and deletions take effect here. A missing user gets the same response
    // as a bad token.
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(ApiError::InvalidToken("Invalid or expired refresh token"))?;

    let access_token = keys.sign_access(user.id, user.role)?;
    info!(user_id = %user.id, "access token refreshed");
    Ok(Json(TokenResponse { access_token }))
}

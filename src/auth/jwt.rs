use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{auth::repo::Role, config::JwtConfig, state::AppState};

/// Verification failure. `Expired` and `Invalid` are logged differently but
/// must surface identically to clients.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

/// Access-token payload: identity plus role, so protected routes need no
/// database round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

/// Refresh-token payload carries only the user id. The role is re-resolved
/// from the user record at refresh time so role changes take effect on the
/// next refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// Signing and verification keys. Access and refresh tokens use independent
/// secrets: a leaked access key cannot forge refresh tokens, and vice versa.
#[derive(Clone)]
pub struct JwtKeys {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(cfg.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(cfg.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(cfg.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(cfg.refresh_secret.as_bytes()),
            access_ttl: Duration::from_secs((cfg.access_ttl_minutes as u64) * 60),
            refresh_ttl: Duration::from_secs((cfg.refresh_ttl_days as u64) * 24 * 3600),
        }
    }

    pub fn sign_access(&self, user_id: Uuid, role: Role) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.access_ttl.as_secs() as i64);
        let claims = AccessClaims {
            sub: user_id,
            role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.access_encoding)?;
        debug!(user_id = %user_id, role = ?role, "access token signed");
        Ok(token)
    }

    pub fn sign_refresh(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.refresh_ttl.as_secs() as i64);
        let claims = RefreshClaims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.refresh_encoding)?;
        debug!(user_id = %user_id, "refresh token signed");
        Ok(token)
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = decode::<AccessClaims>(token, &self.access_decoding, &Validation::default())?;
        debug!(user_id = %data.claims.sub, "access token verified");
        Ok(data.claims)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &Validation::default())?;
        debug!(user_id = %data.claims.sub, "refresh token verified");
        Ok(data.claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::from_config(&state.config.jwt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_access_token() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign_access(user_id, Role::Admin).expect("sign access");
        let claims = keys.verify_access(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn sign_and_verify_refresh_token() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign_refresh(user_id).expect("sign refresh");
        let claims = keys.verify_refresh(&token).expect("verify refresh");
        assert_eq!(claims.sub, user_id);
    }

    #[tokio::test]
    async fn access_token_fails_refresh_verification() {
        // Separate secrets: a token signed with the access key must not pass
        // refresh verification.
        let keys = make_keys();
        let token = keys.sign_access(Uuid::new_v4(), Role::User).expect("sign access");
        assert_eq!(keys.verify_refresh(&token).unwrap_err(), TokenError::Invalid);
    }

    #[tokio::test]
    async fn refresh_token_fails_access_verification() {
        let keys = make_keys();
        let token = keys.sign_refresh(Uuid::new_v4()).expect("sign refresh");
        assert_eq!(keys.verify_access(&token).unwrap_err(), TokenError::Invalid);
    }

    #[tokio::test]
    async fn tampered_token_is_invalid() {
        let keys = make_keys();
        let mut token = keys
            .sign_access(Uuid::new_v4(), Role::User)
            .expect("sign access");
        token.push('x');
        assert_eq!(keys.verify_access(&token).unwrap_err(), TokenError::Invalid);
    }

    #[tokio::test]
    async fn garbage_is_invalid_not_expired() {
        let keys = make_keys();
        assert_eq!(
            keys.verify_access("not.a.jwt").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        let claims = AccessClaims {
            sub: Uuid::new_v4(),
            role: Role::User,
            iat: (now - TimeDuration::hours(2)).unix_timestamp() as usize,
            exp: (now - TimeDuration::hours(1)).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.access_encoding).expect("encode");
        assert_eq!(keys.verify_access(&token).unwrap_err(), TokenError::Expired);
    }

    #[tokio::test]
    async fn tokens_differ_per_call() {
        // iat/exp move between calls, but even within a second the pair of
        // tokens from one login differ because access carries the role.
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let access = keys.sign_access(user_id, Role::User).expect("sign");
        let refresh = keys.sign_refresh(user_id).expect("sign");
        assert_ne!(access, refresh);
    }
}

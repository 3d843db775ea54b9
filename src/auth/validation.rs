use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Strength rule carried over from registration: at least one lowercase,
/// one uppercase, one digit and one symbol.
pub(crate) fn is_strong_password(password: &str) -> bool {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());
    has_lower && has_upper && has_digit && has_symbol
}

pub(crate) fn validate_register(req: &RegisterRequest) -> Result<(), ApiError> {
    let name_len = req.name.chars().count();
    if !(3..=100).contains(&name_len) {
        return Err(ApiError::Validation(
            "Name must be between 3 and 100 characters".into(),
        ));
    }
    if !is_valid_email(&req.email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if req.password.chars().count() < 8 {
        return Err(ApiError::Validation(
            "Password should be at least 8 characters long".into(),
        ));
    }
    if !is_strong_password(&req.password) {
        return Err(ApiError::Validation(
            "Password must contain at least one uppercase letter, one lowercase letter, \
             one number and one special character"
                .into(),
        ));
    }
    Ok(())
}

/// Login validates shape only; strength is not re-checked against stored
/// credentials.
pub(crate) fn validate_login(req: &LoginRequest) -> Result<(), ApiError> {
    if !is_valid_email(&req.email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if req.password.is_empty() {
        return Err(ApiError::Validation("Password is required".into()));
    }
    Ok(())
}

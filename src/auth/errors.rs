use thiserror::Error;

use crate::db::StoreError;

/// Business errors for register/login.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => AuthError::DuplicateEmail,
            StoreError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
        }
    }
}

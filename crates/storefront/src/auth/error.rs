//! Account error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by sign-in and registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] forgotten_essentials_core::EmailError),

    /// No password was entered.
    #[error("password is required")]
    MissingPassword,

    /// A required form field was left empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Password too short.
    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    /// The account could not be saved.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

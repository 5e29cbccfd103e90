//! Error types for remindr-core

use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Result type alias using remindr-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in remindr-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Auth service error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Remote table error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Form validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Operation requires a signed-in user
    #[error("Not signed in")]
    NotSignedIn,

    /// Signed-in user has no profile row
    #[error("Profile not found for user {0}")]
    ProfileNotFound(String),

    /// Reminder not found in the current view
    #[error("Reminder not found: {0}")]
    NotFound(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

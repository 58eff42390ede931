use thiserror::Error;

use crate::token::TokenError;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid or expired token")]
    InvalidToken(#[from] TokenError),
    #[error("you do not have access to this entry")]
    Forbidden,
    #[error("entry not found")]
    EntryNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl JournalError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Every credential and token failure answers the same way.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::Unauthenticated | Self::InvalidToken(_)
        )
    }
}

impl From<validator::ValidationErrors> for JournalError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors.field_errors();
        let message = if fields.contains_key("email") {
            "A valid email address is required"
        } else if fields.contains_key("password") {
            "Password must be at least 6 characters"
        } else {
            "Invalid input"
        };
        Self::Validation(message.to_string())
    }
}

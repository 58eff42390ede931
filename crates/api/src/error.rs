use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use moodlog_journal::JournalError;
use serde_json::json;
use tracing::error;

/// Error body shared by every route: `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<JournalError> for ApiError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Validation(message) => Self::bad_request(message),
            JournalError::InvalidCredentials => Self::unauthorized("Invalid email or password"),
            JournalError::Unauthenticated => Self::unauthorized("Authentication required"),
            JournalError::InvalidToken(_) => Self::unauthorized("Invalid or expired token"),
            JournalError::Forbidden => {
                Self::new(StatusCode::FORBIDDEN, "You do not have access to this entry")
            }
            JournalError::EntryNotFound => Self::new(StatusCode::NOT_FOUND, "Entry not found"),
            JournalError::UserNotFound => Self::new(StatusCode::NOT_FOUND, "User not found"),
            JournalError::Internal(err) => {
                error!(error = ?err, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use moodlog_journal::TokenError;

    use super::*;

    #[test]
    fn journal_errors_map_to_status_codes() {
        let cases = [
            (JournalError::validation("bad"), StatusCode::BAD_REQUEST),
            (JournalError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (JournalError::InvalidToken(TokenError::Expired), StatusCode::UNAUTHORIZED),
            (JournalError::Forbidden, StatusCode::FORBIDDEN),
            (JournalError::EntryNotFound, StatusCode::NOT_FOUND),
            (
                JournalError::Internal(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn token_failures_share_one_message() {
        let expired = ApiError::from(JournalError::InvalidToken(TokenError::Expired));
        let forged = ApiError::from(JournalError::InvalidToken(TokenError::BadSignature));
        assert_eq!(expired.message(), forged.message());
    }

    #[test]
    fn internal_details_stay_out_of_the_body() {
        let err = ApiError::from(JournalError::Internal(anyhow::anyhow!("sqlite locked")));
        assert_eq!(err.message(), "Internal server error");
    }
}

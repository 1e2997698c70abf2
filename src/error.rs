//! Defines the app level error type and its conversion into JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The message sent to the client for any error it cannot act on.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// The message sent to the client when a required field is missing.
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more of `title`, `user_id`, `category` was missing or empty, or
    /// `amount` was missing from a request to create a transaction.
    #[error("all fields are required")]
    MissingFields,

    /// The request body could not be read as the expected JSON object.
    ///
    /// Callers should pass in a description of the rejection that is safe to
    /// show to the client.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// The amount could not be converted to a fixed-point decimal with two
    /// fractional digits.
    ///
    /// This is a storage-level failure, the client gets a generic 500.
    #[error("could not convert {0} to an amount")]
    InvalidAmount(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorMessage {
    /// A short, human readable description of what went wrong.
    pub message: String,
}

impl ErrorMessage {
    fn response(status_code: StatusCode, message: impl Into<String>) -> Response {
        (
            status_code,
            Json(ErrorMessage {
                message: message.into(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::MissingFields => {
                ErrorMessage::response(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
            }
            Error::InvalidRequestBody(_) => {
                ErrorMessage::response(StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::NotFound => ErrorMessage::response(StatusCode::NOT_FOUND, "Not found"),
            // Any errors that are not handled above are not intended to be shown to the client.
            // The caller logs the error before converting it.
            _ => ErrorMessage::response(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_SERVER_ERROR_MESSAGE,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn validation_errors_are_client_errors() {
        assert_eq!(
            Error::MissingFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::InvalidRequestBody("expected a JSON object".to_owned())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_errors_are_server_errors() {
        let errors = [
            Error::SqlError(rusqlite::Error::InvalidQuery),
            Error::InvalidAmount("\"abc\"".to_owned()),
            Error::DatabaseLockError,
        ];

        for error in errors {
            let description = error.to_string();
            let status = error.into_response().status();

            assert_eq!(
                status,
                StatusCode::INTERNAL_SERVER_ERROR,
                "want 500 for {description}, got {status}"
            );
        }
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn other_sql_errors_are_kept_as_sql_errors() {
        let error: Error = rusqlite::Error::InvalidQuery.into();

        assert_eq!(error, Error::SqlError(rusqlite::Error::InvalidQuery));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

//! Defines the app level error type and conversions to rendered alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::alert::Alert;

/// The errors that may occur in the dashboard.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request to the transaction API did not complete in time.
    #[error("the request to the transaction API timed out")]
    NetworkTimeout,

    /// The transaction API could not be reached, or the connection failed
    /// part way through the exchange.
    #[error("could not reach the transaction API: {0}")]
    NetworkError(String),

    /// The transaction API answered with a body that is not the expected JSON
    /// object.
    #[error("the transaction API sent a malformed response: {0}")]
    MalformedResponse(String),

    /// The transaction API answered with an error status.
    ///
    /// `message` holds the `error` field of the response body when the API
    /// provided one.
    #[error("the transaction API reported an error (status {status}): {message:?}")]
    ServerReportedError {
        /// The HTTP status code of the response.
        status: u16,
        /// The error text provided by the API, if any.
        message: Option<String>,
    },

    /// The user submitted something that cannot be acted on, e.g. an upload
    /// form without a file.
    #[error("{0}")]
    UserInputError(String),

    /// Could not acquire the dashboard state lock.
    #[error("could not acquire the dashboard state lock")]
    StateLockError,
}

impl Error {
    /// Whether the initial load should try again after this error.
    ///
    /// Anything that looks like the backend not being ready yet is retried,
    /// a response that could not be understood is not.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Error::NetworkTimeout | Error::NetworkError(_) | Error::ServerReportedError { .. }
        )
    }

    /// The error text reported by the transaction API, or `fallback` when the
    /// API did not provide any.
    pub fn server_message_or(&self, fallback: &str) -> String {
        match self {
            Error::ServerReportedError {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_owned(),
        }
    }

    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::UserInputError(message) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple { message }.into_html(),
            )
                .into_response(),
            Error::NetworkTimeout | Error::NetworkError(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the transaction service".to_owned(),
                    details: "Check that the backend is running and try again.".to_owned(),
                }
                .into_html(),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    }
                    .into_html(),
                )
                    .into_response()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_alert_response()
    }
}

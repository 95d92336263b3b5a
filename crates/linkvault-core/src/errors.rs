//! Application error type with HTTP response conversion.
//!
//! Every fallible handler and service returns [`AppError`]. The status code
//! selects the taxonomy entry:
//!
//! | Constructor      | Status | Meaning                                          |
//! |------------------|--------|--------------------------------------------------|
//! | `bad_request`    | 400    | malformed or invalid input                       |
//! | `unauthorized`   | 401    | missing/invalid/expired/revoked token, bad login |
//! | `forbidden`      | 403    | valid identity, insufficient permission          |
//! | `not_found`      | 404    | resource does not exist                          |
//! | `conflict`       | 409    | uniqueness violation (e.g. email already in use) |
//! | `internal`       | 500    | anything unexpected, including database failures |
//!
//! Server errors never leak their cause to the client: the body is always
//! `{"error": "Internal Server Error"}` and the full chain goes to the log.

use std::fmt::{Debug, Display};

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    fn message<M>(status: StatusCode, msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::new(status, Error::msg(msg))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<M>(msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::message(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized<M>(msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::message(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn forbidden<M>(msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::message(StatusCode::FORBIDDEN, msg)
    }

    pub fn not_found<M>(msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::message(StatusCode::NOT_FOUND, msg)
    }

    pub fn conflict<M>(msg: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::message(StatusCode::CONFLICT, msg)
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        };

        (self.status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

use std::io;
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Custom error types for the wiki application
#[derive(Debug)]
pub enum WikiError {
    Io(io::Error),
    NotFound,
    InvalidTitle(String),
    MethodNotAllowed,
    TemplateError(String),
    Database(rusqlite::Error),
}

impl std::fmt::Display for WikiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WikiError::Io(e) => write!(f, "I/O error: {}", e),
            WikiError::NotFound => write!(f, "Not found"),
            WikiError::InvalidTitle(t) => write!(f, "Invalid title: {}", t),
            WikiError::MethodNotAllowed => write!(f, "Method not allowed"),
            WikiError::TemplateError(e) => write!(f, "Template error: {}", e),
            WikiError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for WikiError {}

impl From<io::Error> for WikiError {
    fn from(err: io::Error) -> Self {
        WikiError::Io(err)
    }
}

impl From<rusqlite::Error> for WikiError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => WikiError::NotFound,
            other => WikiError::Database(other),
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            // An invalid title never names a page, so it is reported the same way.
            WikiError::NotFound | WikiError::InvalidTitle(_) => {
                (StatusCode::NOT_FOUND, "404 page not found").into_response()
            }
            WikiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
            }
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
        }
    }
}

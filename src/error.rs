//! Typed errors and HTTP mapping.

use crate::message::Message;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{}", .0.contents())]
    Conflict(Message),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("password hashing: {0}")]
    Password(String),
    #[error("serialization: {0}")]
    Json(#[from] serde_json::Error),
    #[error("token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// A unique-constraint violation (SQLSTATE 23505) becomes `Conflict(message)`; anything
    /// else is returned unchanged. Covers the race between a duplicate check and the insert.
    pub fn on_unique_violation(self, message: Message) -> AppError {
        if let AppError::Db(sqlx::Error::Database(e)) = &self {
            if e.is_unique_violation() {
                return AppError::Conflict(message);
            }
        }
        self
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m.code()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Password(_) | AppError::Json(_) | AppError::Token(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_409_with_catalog_code() {
        let resp = AppError::Conflict(Message::NOVEL_INDEX_UNVALID).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let resp = AppError::Db(sqlx::Error::RowNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_displays_catalog_contents() {
        let err = AppError::Conflict(Message::USER_UNVALID);
        assert_eq!(err.to_string(), Message::USER_UNVALID.contents());
    }

    #[derive(Debug)]
    struct DuplicateKey;

    impl std::fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for DuplicateKey {}

    impl sqlx::error::DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some("23505".into())
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let err = AppError::Db(sqlx::Error::Database(Box::new(DuplicateKey)));
        let mapped = err.on_unique_violation(Message::USER_ALREADY_EXIST);
        assert!(matches!(mapped, AppError::Conflict(Message::USER_ALREADY_EXIST)));
        assert_eq!(mapped.into_response().status(), StatusCode::CONFLICT);

        let other = AppError::Db(sqlx::Error::RowNotFound).on_unique_violation(Message::USER_ALREADY_EXIST);
        assert!(matches!(other, AppError::Db(sqlx::Error::RowNotFound)));
    }
}

//! Error surface of the API.
//!
//! Callers get an appropriate status code and a sanitized message; database
//! failures keep their details in the server log only. Storage errors are
//! not retried and no distinction is made between transient and permanent
//! failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// 404: the addressed record does not exist.
    NotFound { message: String },
    /// 400: the request breaks an id rule or is otherwise malformed;
    /// rejected before any storage access.
    BadRequest { message: String },
    /// 500: the store failed; details are logged, never sent to the caller.
    Database { internal: DbErr },
    /// 500: anything else.
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        let resource = resource.into();
        let message = match id {
            Some(id) => format!("{resource} {id} not found"),
            None => format!("{resource} not found"),
        };
        Self::NotFound { message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::NotFound { message } | Self::BadRequest { message } | Self::Internal { message } => {
                message.clone()
            }
            Self::Database { .. } => "a database error occurred".to_owned(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal } => {
                tracing::error!(error = ?internal, "database error");
            }
            Self::Internal { message } => {
                tracing::error!(%message, "internal error");
            }
            _ => {
                tracing::debug!(
                    status = %self.status_code(),
                    error = %self.user_message(),
                    "request rejected"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();
        let body = ErrorBody {
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// `RecordNotFound` and `RecordNotUpdated` (a row vanishing between the
/// existence check and the write) surface as 404; every other database
/// error is a sanitized 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(message) => Self::NotFound { message },
            DbErr::RecordNotUpdated => Self::NotFound {
                message: "record not found".to_owned(),
            },
            other => Self::Database { internal: other },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_404() {
        let err = ApiError::from(DbErr::RecordNotFound("etudiant 9 not found".to_owned()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "etudiant 9 not found");
    }

    #[test]
    fn record_not_updated_maps_to_404() {
        let err = ApiError::from(DbErr::RecordNotUpdated);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_database_errors_are_sanitized() {
        let err = ApiError::from(DbErr::Custom("connection torn down".to_owned()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.user_message().contains("torn down"));
    }

    #[test]
    fn bad_request_keeps_its_message() {
        let err = ApiError::bad_request("payload id 2 does not match path id 1");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "payload id 2 does not match path id 1");
    }

    #[test]
    fn not_found_constructor_formats_the_target() {
        let err = ApiError::not_found("pays", Some("4".to_owned()));
        assert_eq!(err.user_message(), "pays 4 not found");
    }
}

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Env error: {0}")]
    EnvError(String),

    #[error("Internal server error")]
    InternalError,

    #[error("Not found")]
    NotFound(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            success: false,
            error: message.into(),
        }),
    )
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::EnvError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn to_response(&self) -> ApiError {
        let message = match self {
            // Store and crypto details stay in the logs.
            AppError::DatabaseError(_) | AppError::PasswordHash(_) | AppError::EnvError(_) => {
                "Internal server error".to_string()
            }
            AppError::JwtError(_) => "Invalid or expired token".to_string(),
            AppError::InternalError => "Unexpected server error".to_string(),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg) => msg.clone(),
        };
        error_response(self.status(), message)
    }

    /// Wraps a sqlx error, turning constraint violations into client errors.
    pub fn from_db(context: &str, err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            match db_err.code().as_deref() {
                Some("23505") => {
                    return AppError::BadRequest(format!("{context}: already exists"));
                }
                Some("23503") => {
                    return AppError::NotFound(format!("{context}: referenced record not found"));
                }
                _ => {}
            }
        }
        AppError::DatabaseError(format!("{context}: {err}"))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        AppError::BadRequest(first_validation_message(&value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        AppError::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        AppError::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(value: PathRejection) -> Self {
        match value {
            PathRejection::FailedToDeserializePathParams(err) => {
                AppError::BadRequest(err.body_text())
            }
            other => {
                tracing::error!("Path extraction misconfigured: {}", other.body_text());
                AppError::InternalError
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid value for {field}"),
            })
        })
        .unwrap_or_else(|| errors.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_details_are_not_leaked() {
        let (status, Json(body)) =
            AppError::DatabaseError("connection refused at 10.0.0.3".into()).to_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.success);
        assert_eq!(body.error, "Internal server error");
    }

    #[test]
    fn client_errors_keep_their_message() {
        let (status, Json(body)) =
            AppError::Forbidden("Not authorized to update this rating".into()).to_response();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error, "Not authorized to update this rating");

        let (status, _) = AppError::NotFound("Project not found".into()).to_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn non_database_sqlx_errors_are_internal() {
        let err = AppError::from_db("Failed to fetch project", sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}

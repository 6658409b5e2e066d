use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::{DbErr, SqlErr, TransactionError};

use degreedash_auth_types::session::SessionRejection;

/// API error variants. Each maps to one HTTP status and a stable `kind` string.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("course not found")]
    CourseNotFound,
    #[error("professor not found")]
    ProfessorNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("alumni profile not found")]
    AlumniProfileNotFound,
    #[error("professor is not assigned to this course")]
    CourseProfessorNotFound,
    #[error("cannot delete course with {0} enrolled student(s)")]
    CourseHasEnrollments(u64),
    #[error("cannot delete professor assigned to {0} course(s)")]
    ProfessorHasCourses(u64),
    #[error("{0}")]
    Duplicate(String),
    #[error("course is full")]
    CourseFull,
    #[error("course has no enrollments to remove")]
    NoEnrollments,
    #[error("not authenticated")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid oauth state")]
    InvalidOAuthState,
    #[error("oauth provider error: {0}")]
    OAuthProvider(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::ProfessorNotFound => "PROFESSOR_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AlumniProfileNotFound => "ALUMNI_PROFILE_NOT_FOUND",
            Self::CourseProfessorNotFound => "COURSE_PROFESSOR_NOT_FOUND",
            Self::CourseHasEnrollments(_) => "COURSE_HAS_ENROLLMENTS",
            Self::ProfessorHasCourses(_) => "PROFESSOR_HAS_COURSES",
            Self::Duplicate(_) => "DUPLICATE",
            Self::CourseFull => "COURSE_FULL",
            Self::NoEnrollments => "NO_ENROLLMENTS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidOAuthState => "INVALID_OAUTH_STATE",
            Self::OAuthProvider(_) => "OAUTH_PROVIDER",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Classify a failed write: unique violations become `Duplicate`, dangling
    /// references become `Validation`, anything else is `Internal`.
    pub fn from_write(err: DbErr, context: &'static str, duplicate: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Duplicate(duplicate.to_owned()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::Validation("referenced record does not exist".to_owned())
            }
            _ => Self::Internal(anyhow::Error::new(err).context(context)),
        }
    }

    /// Unwrap a transaction failure: errors raised inside the closure pass through unchanged.
    pub fn from_txn(err: TransactionError<ApiError>) -> Self {
        match err {
            TransactionError::Connection(e) => {
                Self::Internal(anyhow::Error::new(e).context("transaction"))
            }
            TransactionError::Transaction(e) => e,
        }
    }
}

impl From<SessionRejection> for ApiError {
    fn from(_: SessionRejection) -> Self {
        Self::Unauthorized
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::InvalidOAuthState => StatusCode::BAD_REQUEST,
            Self::CourseNotFound
            | Self::ProfessorNotFound
            | Self::UserNotFound
            | Self::AlumniProfileNotFound
            | Self::CourseProfessorNotFound => StatusCode::NOT_FOUND,
            Self::CourseHasEnrollments(_)
            | Self::ProfessorHasCourses(_)
            | Self::Duplicate(_)
            | Self::CourseFull
            | Self::NoEnrollments => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::OAuthProvider(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

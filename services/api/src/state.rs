use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sea_orm::DatabaseConnection;

use degreedash_auth_types::session::{SessionKey, SessionUser};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::infra::db::{
    DbCourseRepository, DbEnrollmentRepository, DbProfessorRepository, DbReviewRepository,
    DbUserRepository,
};
use crate::infra::oauth::MicrosoftOAuthClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub oauth: MicrosoftOAuthClient,
    pub session_secret: String,
    pub cookie_secure: bool,
    pub frontend_url: String,
    pub admin_emails: Arc<[String]>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &ApiConfig) -> Self {
        Self {
            db,
            oauth: MicrosoftOAuthClient::new(config),
            session_secret: config.session_secret.clone(),
            cookie_secure: config.cookie_secure,
            frontend_url: config.frontend_url.trim_end_matches('/').to_owned(),
            admin_emails: config
                .admin_emails
                .iter()
                .map(|e| e.trim().to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email.trim()))
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn professor_repo(&self) -> DbProfessorRepository {
        DbProfessorRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }
}

impl SessionKey for AppState {
    fn session_secret(&self) -> &str {
        &self.session_secret
    }
}

/// A session whose email is listed in `ADMIN_EMAILS`.
///
/// 401 without a valid session, 403 for any other user.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let session = SessionUser::from_request_parts(parts, state).await?;
        if !state.is_admin(&session.email) {
            tracing::debug!(user_id = session.user_id, "admin route refused");
            return Err(ApiError::Forbidden);
        }
        Ok(Self(session))
    }
}

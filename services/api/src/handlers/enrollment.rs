use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use degreedash_auth_types::session::SessionUser;
use degreedash_domain::course::EnrollmentStatus;

use crate::domain::types::EnrolledCourse;
use crate::error::ApiError;
use crate::handlers::course::CourseResponse;
use crate::state::AppState;
use crate::usecase::enrollment::{DropCourseUseCase, EnrollUseCase, ListEnrollmentsUseCase};

/// Enroll/drop result. A refused request is still a 200 with `success: false`.
#[derive(Serialize)]
pub struct OutcomeResponse {
    pub success: bool,
    pub message: &'static str,
}

// ── GET /users/@me/enrollments ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct EnrolledCourseResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    #[serde(serialize_with = "degreedash_core::serde::to_rfc3339_ms")]
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub grade: Option<String>,
}

impl From<EnrolledCourse> for EnrolledCourseResponse {
    fn from(e: EnrolledCourse) -> Self {
        Self {
            course: e.course.into(),
            enrolled_at: e.enrolled_at,
            status: e.status,
            grade: e.grade,
        }
    }
}

pub async fn list_my_enrollments(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrolledCourseResponse>>, ApiError> {
    let usecase = ListEnrollmentsUseCase {
        repo: state.enrollment_repo(),
    };
    let courses = usecase.execute(session.user_id).await?;
    Ok(Json(
        courses
            .into_iter()
            .map(EnrolledCourseResponse::from)
            .collect(),
    ))
}

// ── POST /users/@me/enrollments ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EnrollRequest {
    pub course_id: i32,
}

pub async fn enroll(
    session: SessionUser,
    State(state): State<AppState>,
    Json(body): Json<EnrollRequest>,
) -> Result<Json<OutcomeResponse>, ApiError> {
    let usecase = EnrollUseCase {
        repo: state.enrollment_repo(),
    };
    let outcome = usecase.execute(session.user_id, body.course_id).await?;
    Ok(Json(OutcomeResponse {
        success: outcome.success(),
        message: outcome.message(),
    }))
}

// ── DELETE /users/@me/enrollments/{course_id} ────────────────────────────────

pub async fn drop_course(
    session: SessionUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<Json<OutcomeResponse>, ApiError> {
    let usecase = DropCourseUseCase {
        repo: state.enrollment_repo(),
    };
    let outcome = usecase.execute(session.user_id, course_id).await?;
    Ok(Json(OutcomeResponse {
        success: outcome.success(),
        message: outcome.message(),
    }))
}

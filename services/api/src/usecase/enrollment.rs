use crate::domain::repository::EnrollmentRepository;
use crate::domain::types::{DropOutcome, EnrollOutcome, EnrolledCourse};
use crate::error::ApiError;

// ── Enroll ───────────────────────────────────────────────────────────────────

pub struct EnrollUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> EnrollUseCase<R> {
    /// "Already enrolled" and "course full" are outcomes, not errors.
    pub async fn execute(&self, user_id: i32, course_id: i32) -> Result<EnrollOutcome, ApiError> {
        self.repo.enroll(user_id, course_id).await
    }
}

// ── DropCourse ───────────────────────────────────────────────────────────────

pub struct DropCourseUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> DropCourseUseCase<R> {
    pub async fn execute(&self, user_id: i32, course_id: i32) -> Result<DropOutcome, ApiError> {
        self.repo.drop_course(user_id, course_id).await
    }
}

// ── ListEnrollments ──────────────────────────────────────────────────────────

pub struct ListEnrollmentsUseCase<R: EnrollmentRepository> {
    pub repo: R,
}

impl<R: EnrollmentRepository> ListEnrollmentsUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<Vec<EnrolledCourse>, ApiError> {
        self.repo.enrolled_courses(user_id).await
    }
}

#![allow(async_fn_in_trait)]

use degreedash_domain::course::InstructorRole;

use crate::domain::types::{
    AlumniEntry, AlumniProfile, AlumniProfileInput, Course, CourseFacets, CourseFilter,
    CourseInput, CourseProfessor, CourseStats, CourseSummary, DropOutcome, EnrollOutcome,
    EnrolledCourse, ExternalProfile, NewReview, Professor, ProfessorFilter, ProfessorInput,
    ProfessorStats, ProfileUpdate, Review, RosterEntry, TaughtCourse, User, UserStats,
};
use crate::error::ApiError;

/// Repository for courses and their professor links.
pub trait CourseRepository: Send + Sync {
    /// Courses matching every active filter, ordered by course code.
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<CourseSummary>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<CourseSummary>, ApiError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<CourseSummary>, ApiError>;

    /// Insert the course and link each professor as "Instructor", atomically.
    async fn create(&self, input: &CourseInput, professor_ids: &[i32])
    -> Result<Course, ApiError>;

    /// Update fields; when `professor_ids` is `Some`, replace the whole link set
    /// in the same transaction.
    async fn update(
        &self,
        id: i32,
        input: &CourseInput,
        professor_ids: Option<&[i32]>,
    ) -> Result<Course, ApiError>;

    /// Delete the course and, by cascade, its links and reviews. Refused while
    /// any enrollment exists.
    async fn delete(&self, id: i32) -> Result<(), ApiError>;

    /// Guarded `enrolled + 1`; `CourseFull` when already at capacity.
    async fn increment_enrolled(&self, id: i32) -> Result<(), ApiError>;
    /// Guarded `enrolled - 1`; `NoEnrollments` when already zero.
    async fn decrement_enrolled(&self, id: i32) -> Result<(), ApiError>;
    async fn has_available_seats(&self, id: i32) -> Result<bool, ApiError>;

    /// Linked professors ordered by role rank, then name.
    async fn professors(&self, course_id: i32) -> Result<Vec<CourseProfessor>, ApiError>;
    /// Link a professor. An existing link is left untouched.
    async fn add_professor(
        &self,
        course_id: i32,
        professor_id: i32,
        role: &InstructorRole,
    ) -> Result<(), ApiError>;
    /// Returns `false` if there was no such link.
    async fn remove_professor(&self, course_id: i32, professor_id: i32) -> Result<bool, ApiError>;
    /// Returns `false` if there was no such link.
    async fn update_professor_role(
        &self,
        course_id: i32,
        professor_id: i32,
        role: &InstructorRole,
    ) -> Result<bool, ApiError>;

    async fn facets(&self) -> Result<CourseFacets, ApiError>;
    async fn stats(&self) -> Result<CourseStats, ApiError>;
    /// Enrolled students, newest enrollment first.
    async fn roster(&self, course_id: i32) -> Result<Vec<RosterEntry>, ApiError>;
}

/// Repository for professors.
pub trait ProfessorRepository: Send + Sync {
    async fn list(&self, filter: &ProfessorFilter) -> Result<Vec<Professor>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Professor>, ApiError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Professor>, ApiError>;
    async fn create(&self, input: &ProfessorInput) -> Result<Professor, ApiError>;
    async fn update(&self, id: i32, input: &ProfessorInput) -> Result<Professor, ApiError>;
    /// Refused while the professor is linked to any course.
    async fn delete(&self, id: i32) -> Result<(), ApiError>;
    /// Courses taught, newest year first, then semester.
    async fn courses(&self, professor_id: i32) -> Result<Vec<TaughtCourse>, ApiError>;
    async fn stats(&self) -> Result<ProfessorStats, ApiError>;
}

/// Repository for users and alumni profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, profile: &ExternalProfile) -> Result<User, ApiError>;
    async fn update_last_login(&self, id: i32) -> Result<(), ApiError>;
    /// Newest account first.
    async fn list_all(&self) -> Result<Vec<User>, ApiError>;
    /// Switching to `current` removes any alumni profile in the same transaction.
    async fn update_profile(&self, id: i32, update: &ProfileUpdate) -> Result<User, ApiError>;
    async fn alumni_profile(&self, user_id: i32) -> Result<Option<AlumniProfile>, ApiError>;
    /// Refuses non-alumni, checked in the same transaction as the write.
    async fn upsert_alumni_profile(
        &self,
        user_id: i32,
        input: &AlumniProfileInput,
    ) -> Result<AlumniProfile, ApiError>;
    async fn list_alumni(&self, mentorship_only: bool) -> Result<Vec<AlumniEntry>, ApiError>;
    async fn stats(&self) -> Result<UserStats, ApiError>;
}

/// Repository owning the enroll/drop workflow.
pub trait EnrollmentRepository: Send + Sync {
    async fn is_enrolled(&self, user_id: i32, course_id: i32) -> Result<bool, ApiError>;
    /// Insert the enrollment and bump the course counter in one transaction.
    async fn enroll(&self, user_id: i32, course_id: i32) -> Result<EnrollOutcome, ApiError>;
    /// Delete the enrollment and lower the course counter in one transaction.
    async fn drop_course(&self, user_id: i32, course_id: i32) -> Result<DropOutcome, ApiError>;
    /// Newest enrollment first.
    async fn enrolled_courses(&self, user_id: i32) -> Result<Vec<EnrolledCourse>, ApiError>;
}

/// Repository for reviews. Reviews are immutable once written.
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, user_id: i32, review: &NewReview) -> Result<Review, ApiError>;
    async fn list_for_course(&self, course_id: i32) -> Result<Vec<Review>, ApiError>;
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Review>, ApiError>;
    async fn list_for_professor(&self, professor_id: i32) -> Result<Vec<Review>, ApiError>;
}

/// External login provider (OAuth authorization-code flow).
pub trait ExternalAuthPort: Send + Sync {
    /// URL the browser is redirected to, carrying `state` for CSRF protection.
    fn authorize_url(&self, state: &str) -> String;
    /// Exchange the callback `code` and fetch the signed-in user's profile.
    async fn fetch_profile(&self, code: &str) -> Result<ExternalProfile, ApiError>;
}

use chrono::{DateTime, Utc};

use degreedash_domain::course::{EnrollmentStatus, InstructorRole};
use degreedash_domain::user::UserType;

// ── Courses ──────────────────────────────────────────────────────────────────

/// A course row.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i32,
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub credits: i32,
    pub description: Option<String>,
    pub prerequisites: Option<String>,
    pub schedule: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub capacity: i32,
    pub enrolled: i32,
    pub created_at: DateTime<Utc>,
}

/// A course annotated with its instructor list and review aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSummary {
    pub course: Course,
    pub seats_available: i32,
    pub instructors: Option<String>,
    pub instructor_count: i32,
    pub review_count: i32,
    pub avg_rating: Option<f64>,
    pub avg_difficulty: Option<f64>,
    pub recommend_rate: Option<f64>,
}

/// Writable course fields. `credits` is required; `capacity` defaults to 30.
#[derive(Debug, Clone, Default)]
pub struct CourseInput {
    pub course_code: String,
    pub course_name: String,
    pub department: String,
    pub credits: Option<i32>,
    pub description: Option<String>,
    pub prerequisites: Option<String>,
    pub schedule: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub capacity: Option<i32>,
}

pub const DEFAULT_CAPACITY: i32 = 30;

impl CourseInput {
    /// Check required fields. Returns the credits and capacity to store.
    pub fn validate(&self) -> Result<(i32, i32), String> {
        for (field, value) in [
            ("course_code", &self.course_code),
            ("course_name", &self.course_name),
            ("department", &self.department),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} is required"));
            }
        }
        let credits = self.credits.ok_or("credits is required")?;
        if credits <= 0 {
            return Err("credits must be positive".to_owned());
        }
        let capacity = self.capacity.unwrap_or(DEFAULT_CAPACITY);
        if capacity < 0 {
            return Err("capacity must not be negative".to_owned());
        }
        Ok((credits, capacity))
    }
}

/// Catalogue query. Facets drop empty values and `"all"`; `search` drops only empty ones.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub department: Option<String>,
    pub search: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
}

/// Drop empty and `"all"` facet values.
pub fn facet(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Trim a free-text search term; only an empty term is dropped.
pub fn search_term(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Distinct values for the catalogue filter controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFacets {
    pub departments: Vec<String>,
    pub semesters: Vec<String>,
    pub years: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseStats {
    pub total_courses: i64,
    pub departments: i64,
    pub total_capacity: i64,
    pub total_enrolled: i64,
    pub avg_fill_percentage: Option<f64>,
    pub courses_with_professors: i64,
    pub avg_professors_per_course: Option<f64>,
    pub courses_with_reviews: i64,
    pub total_reviews: i64,
}

/// A professor linked to a course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseProfessor {
    pub professor: Professor,
    pub role: InstructorRole,
}

/// Order by role rank, then name.
pub fn sort_course_professors(professors: &mut [CourseProfessor]) {
    professors.sort_by(|a, b| {
        a.role
            .rank()
            .cmp(&b.role.rank())
            .then_with(|| a.professor.name.cmp(&b.professor.name))
    });
}

/// Full course page: the course, its staff, its reviews and score averages.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseWithDetails {
    pub course: CourseSummary,
    pub professors: Vec<CourseProfessor>,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
    pub average_difficulty: Option<f64>,
}

/// One student on a course roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub user_id: i32,
    pub email: String,
    pub name: String,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub grade: Option<String>,
}

// ── Professors ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Professor {
    pub id: i32,
    pub name: String,
    pub department: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfessorInput {
    pub name: String,
    pub department: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
}

impl ProfessorInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".to_owned());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfessorFilter {
    pub department: Option<String>,
    pub search: Option<String>,
}

/// A course a professor teaches, with their role on it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaughtCourse {
    pub course: Course,
    pub role: InstructorRole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfessorWithCourses {
    pub professor: Professor,
    pub courses: Vec<TaughtCourse>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfessorStats {
    pub total_professors: i64,
    pub departments: i64,
    pub avg_courses_per_professor: Option<f64>,
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Identity returned by the external login provider, already normalised.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalProfile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub user_type: Option<UserType>,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.user_type.is_none() && self.graduation_year.is_none() && self.major.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlumniProfile {
    pub user_id: i32,
    pub employer: Option<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub mentorship_available: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AlumniProfileInput {
    pub employer: Option<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub mentorship_available: bool,
}

/// Row of the alumni directory.
#[derive(Debug, Clone, PartialEq)]
pub struct AlumniEntry {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
    pub employer: Option<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub mentorship_available: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStats {
    pub total_users: i64,
    pub current_students: i64,
    pub alumni: i64,
    pub mentors_available: i64,
    pub total_enrollments: i64,
    pub total_reviews: i64,
}

// ── Enrollments ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EnrolledCourse {
    pub course: Course,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub grade: Option<String>,
}

/// Result of an enroll attempt. Only `Enrolled` changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollOutcome {
    Enrolled,
    AlreadyEnrolled,
    CourseFull,
}

impl EnrollOutcome {
    pub fn success(self) -> bool {
        matches!(self, Self::Enrolled)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Enrolled => "Successfully enrolled",
            Self::AlreadyEnrolled => "Already enrolled in this course",
            Self::CourseFull => "Course is full",
        }
    }
}

/// Result of a drop attempt. Only `Dropped` changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Dropped,
    NotEnrolled,
}

impl DropOutcome {
    pub fn success(self) -> bool {
        matches!(self, Self::Dropped)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Dropped => "Successfully dropped course",
            Self::NotEnrolled => "Not enrolled in this course",
        }
    }
}

// ── Reviews ──────────────────────────────────────────────────────────────────

/// A review, annotated with the reviewed professor's name while they still exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub professor_id: Option<i32>,
    pub professor_name: Option<String>,
    pub semester_taken: Option<String>,
    pub year_taken: Option<i32>,
    pub rating: i32,
    pub difficulty: i32,
    pub comment: Option<String>,
    pub would_recommend: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated review submission.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub course_id: i32,
    pub professor_id: Option<i32>,
    pub semester_taken: Option<String>,
    pub year_taken: Option<i32>,
    pub rating: i32,
    pub difficulty: i32,
    pub comment: Option<String>,
    pub would_recommend: bool,
}

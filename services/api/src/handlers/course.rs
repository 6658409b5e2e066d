use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use degreedash_domain::course::{EnrollmentStatus, InstructorRole};

use crate::domain::types::{
    Course, CourseFacets, CourseFilter, CourseInput, CourseProfessor, CourseStats, CourseSummary,
    RosterEntry, facet, search_term,
};
use crate::error::ApiError;
use crate::handlers::professor::ProfessorResponse;
use crate::handlers::review::ReviewResponse;
use crate::state::{AdminUser, AppState};
use crate::usecase::course::{
    AddCourseProfessorUseCase, CreateCourseUseCase, DeleteCourseUseCase, GetCourseDetailsUseCase,
    GetCourseFacetsUseCase, GetCourseRosterUseCase, GetCourseStatsUseCase, GetCourseUseCase,
    ListCourseProfessorsUseCase, ListCoursesUseCase, RemoveCourseProfessorUseCase,
    UpdateCourseProfessorRoleUseCase, UpdateCourseUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseResponse {
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
    #[serde(serialize_with = "degreedash_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            course_code: c.course_code,
            course_name: c.course_name,
            department: c.department,
            credits: c.credits,
            description: c.description,
            prerequisites: c.prerequisites,
            schedule: c.schedule,
            semester: c.semester,
            year: c.year,
            capacity: c.capacity,
            enrolled: c.enrolled,
            created_at: c.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CourseSummaryResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub seats_available: i32,
    pub instructors: Option<String>,
    pub instructor_count: i32,
    pub review_count: i32,
    pub avg_rating: Option<f64>,
    pub avg_difficulty: Option<f64>,
    pub recommend_rate: Option<f64>,
}

impl From<CourseSummary> for CourseSummaryResponse {
    fn from(s: CourseSummary) -> Self {
        Self {
            course: s.course.into(),
            seats_available: s.seats_available,
            instructors: s.instructors,
            instructor_count: s.instructor_count,
            review_count: s.review_count,
            avg_rating: s.avg_rating,
            avg_difficulty: s.avg_difficulty,
            recommend_rate: s.recommend_rate,
        }
    }
}

#[derive(Serialize)]
pub struct CourseProfessorResponse {
    #[serde(flatten)]
    pub professor: ProfessorResponse,
    pub role: InstructorRole,
}

impl From<CourseProfessor> for CourseProfessorResponse {
    fn from(cp: CourseProfessor) -> Self {
        Self {
            professor: cp.professor.into(),
            role: cp.role,
        }
    }
}

fn professors_response(list: Vec<CourseProfessor>) -> Json<Vec<CourseProfessorResponse>> {
    Json(list.into_iter().map(CourseProfessorResponse::from).collect())
}

// ── GET /courses ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CourseQuery {
    pub department: Option<String>,
    pub search: Option<String>,
    pub semester: Option<String>,
    /// String so that `year=all` is accepted as "no filter".
    pub year: Option<String>,
}

impl CourseQuery {
    fn into_filter(self) -> Result<CourseFilter, ApiError> {
        let year = facet(self.year)
            .map(|y| {
                y.parse::<i32>()
                    .map_err(|_| ApiError::validation(format!("invalid year: {y}")))
            })
            .transpose()?;
        Ok(CourseFilter {
            department: facet(self.department),
            search: search_term(self.search),
            semester: facet(self.semester),
            year,
        })
    }
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<Vec<CourseSummaryResponse>>, ApiError> {
    let usecase = ListCoursesUseCase {
        repo: state.course_repo(),
    };
    let courses = usecase.execute(query.into_filter()?).await?;
    Ok(Json(
        courses
            .into_iter()
            .map(CourseSummaryResponse::from)
            .collect(),
    ))
}

// ── GET /courses/filters ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseFacetsResponse {
    pub departments: Vec<String>,
    pub semesters: Vec<String>,
    pub years: Vec<i32>,
}

impl From<CourseFacets> for CourseFacetsResponse {
    fn from(f: CourseFacets) -> Self {
        Self {
            departments: f.departments,
            semesters: f.semesters,
            years: f.years,
        }
    }
}

pub async fn course_filters(
    State(state): State<AppState>,
) -> Result<Json<CourseFacetsResponse>, ApiError> {
    let usecase = GetCourseFacetsUseCase {
        repo: state.course_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

// ── GET /courses/stats ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseStatsResponse {
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

impl From<CourseStats> for CourseStatsResponse {
    fn from(s: CourseStats) -> Self {
        Self {
            total_courses: s.total_courses,
            departments: s.departments,
            total_capacity: s.total_capacity,
            total_enrolled: s.total_enrolled,
            avg_fill_percentage: s.avg_fill_percentage,
            courses_with_professors: s.courses_with_professors,
            avg_professors_per_course: s.avg_professors_per_course,
            courses_with_reviews: s.courses_with_reviews,
            total_reviews: s.total_reviews,
        }
    }
}

pub async fn course_stats(
    State(state): State<AppState>,
) -> Result<Json<CourseStatsResponse>, ApiError> {
    let usecase = GetCourseStatsUseCase {
        repo: state.course_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

// ── GET /courses/code/{code} ─────────────────────────────────────────────────

pub async fn get_course_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CourseSummaryResponse>, ApiError> {
    let usecase = GetCourseUseCase {
        repo: state.course_repo(),
    };
    Ok(Json(usecase.by_code(&code).await?.into()))
}

// ── GET /courses/{id} ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseDetailsResponse {
    #[serde(flatten)]
    pub course: CourseSummaryResponse,
    pub professors: Vec<CourseProfessorResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub average_rating: Option<f64>,
    pub average_difficulty: Option<f64>,
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CourseDetailsResponse>, ApiError> {
    let usecase = GetCourseDetailsUseCase {
        courses: state.course_repo(),
        reviews: state.review_repo(),
    };
    let details = usecase.execute(id).await?;
    Ok(Json(CourseDetailsResponse {
        course: details.course.into(),
        professors: details
            .professors
            .into_iter()
            .map(CourseProfessorResponse::from)
            .collect(),
        reviews: details
            .reviews
            .into_iter()
            .map(ReviewResponse::from)
            .collect(),
        average_rating: details.average_rating,
        average_difficulty: details.average_difficulty,
    }))
}

// ── POST /courses ────────────────────────────────────────────────────────────

/// Missing text fields default to empty so that validation, not the JSON
/// extractor, reports them.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CourseRequest {
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
    pub professor_ids: Option<Vec<i32>>,
}

impl CourseRequest {
    fn into_parts(self) -> (CourseInput, Option<Vec<i32>>) {
        let input = CourseInput {
            course_code: self.course_code.trim().to_owned(),
            course_name: self.course_name.trim().to_owned(),
            department: self.department.trim().to_owned(),
            credits: self.credits,
            description: self.description,
            prerequisites: self.prerequisites,
            schedule: self.schedule,
            semester: self.semester,
            year: self.year,
            capacity: self.capacity,
        };
        (input, self.professor_ids)
    }
}

pub async fn create_course(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let usecase = CreateCourseUseCase {
        repo: state.course_repo(),
    };
    let (input, professor_ids) = body.into_parts();
    let course = usecase
        .execute(input, professor_ids.unwrap_or_default())
        .await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

// ── PUT /courses/{id} ────────────────────────────────────────────────────────

pub async fn update_course(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<CourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let usecase = UpdateCourseUseCase {
        repo: state.course_repo(),
    };
    let (input, professor_ids) = body.into_parts();
    let course = usecase.execute(id, input, professor_ids).await?;
    Ok(Json(course.into()))
}

// ── DELETE /courses/{id} ─────────────────────────────────────────────────────

pub async fn delete_course(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteCourseUseCase {
        repo: state.course_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /courses/{id}/professors ─────────────────────────────────────────────

pub async fn list_course_professors(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CourseProfessorResponse>>, ApiError> {
    let usecase = ListCourseProfessorsUseCase {
        repo: state.course_repo(),
    };
    Ok(professors_response(usecase.execute(id).await?))
}

// ── POST /courses/{id}/professors ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddProfessorRequest {
    pub professor_id: i32,
    pub role: Option<InstructorRole>,
}

pub async fn add_course_professor(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<AddProfessorRequest>,
) -> Result<Json<Vec<CourseProfessorResponse>>, ApiError> {
    let usecase = AddCourseProfessorUseCase {
        courses: state.course_repo(),
        professors: state.professor_repo(),
    };
    Ok(professors_response(
        usecase.execute(id, body.professor_id, body.role).await?,
    ))
}

// ── PATCH /courses/{id}/professors/{professor_id} ────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub role: InstructorRole,
}

pub async fn update_course_professor_role(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((id, professor_id)): Path<(i32, i32)>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<Vec<CourseProfessorResponse>>, ApiError> {
    let usecase = UpdateCourseProfessorRoleUseCase {
        repo: state.course_repo(),
    };
    Ok(professors_response(
        usecase.execute(id, professor_id, body.role).await?,
    ))
}

// ── DELETE /courses/{id}/professors/{professor_id} ───────────────────────────

pub async fn remove_course_professor(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((id, professor_id)): Path<(i32, i32)>,
) -> Result<Json<Vec<CourseProfessorResponse>>, ApiError> {
    let usecase = RemoveCourseProfessorUseCase {
        repo: state.course_repo(),
    };
    Ok(professors_response(usecase.execute(id, professor_id).await?))
}

// ── GET /courses/{id}/roster ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RosterEntryResponse {
    pub user_id: i32,
    pub email: String,
    pub name: String,
    #[serde(serialize_with = "degreedash_core::serde::to_rfc3339_ms")]
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
    pub grade: Option<String>,
}

impl From<RosterEntry> for RosterEntryResponse {
    fn from(r: RosterEntry) -> Self {
        Self {
            user_id: r.user_id,
            email: r.email,
            name: r.name,
            enrolled_at: r.enrolled_at,
            status: r.status,
            grade: r.grade,
        }
    }
}

pub async fn course_roster(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<RosterEntryResponse>>, ApiError> {
    let usecase = GetCourseRosterUseCase {
        repo: state.course_repo(),
    };
    let roster = usecase.execute(id).await?;
    Ok(Json(
        roster.into_iter().map(RosterEntryResponse::from).collect(),
    ))
}

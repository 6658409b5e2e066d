use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use degreedash_domain::course::InstructorRole;

use crate::domain::types::{
    Professor, ProfessorFilter, ProfessorInput, ProfessorStats, TaughtCourse, facet,
    search_term,
};
use crate::error::ApiError;
use crate::handlers::course::CourseResponse;
use crate::handlers::review::ReviewResponse;
use crate::state::{AdminUser, AppState};
use crate::usecase::professor::{
    CreateProfessorUseCase, DeleteProfessorUseCase, GetProfessorStatsUseCase,
    GetProfessorUseCase, ListProfessorCoursesUseCase, ListProfessorReviewsUseCase,
    ListProfessorsUseCase, UpdateProfessorUseCase,
};

#[derive(Serialize)]
pub struct ProfessorResponse {
    pub id: i32,
    pub name: String,
    pub department: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
}

impl From<Professor> for ProfessorResponse {
    fn from(p: Professor) -> Self {
        Self {
            id: p.id,
            name: p.name,
            department: p.department,
            email: p.email,
            office: p.office,
        }
    }
}

#[derive(Serialize)]
pub struct TaughtCourseResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub role: InstructorRole,
}

impl From<TaughtCourse> for TaughtCourseResponse {
    fn from(t: TaughtCourse) -> Self {
        Self {
            course: t.course.into(),
            role: t.role,
        }
    }
}

// ── GET /professors ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ProfessorQuery {
    pub department: Option<String>,
    pub search: Option<String>,
}

pub async fn list_professors(
    State(state): State<AppState>,
    Query(query): Query<ProfessorQuery>,
) -> Result<Json<Vec<ProfessorResponse>>, ApiError> {
    let usecase = ListProfessorsUseCase {
        repo: state.professor_repo(),
    };
    let professors = usecase
        .execute(ProfessorFilter {
            department: facet(query.department),
            search: search_term(query.search),
        })
        .await?;
    Ok(Json(
        professors.into_iter().map(ProfessorResponse::from).collect(),
    ))
}

// ── GET /professors/stats ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfessorStatsResponse {
    pub total_professors: i64,
    pub departments: i64,
    pub avg_courses_per_professor: Option<f64>,
}

impl From<ProfessorStats> for ProfessorStatsResponse {
    fn from(s: ProfessorStats) -> Self {
        Self {
            total_professors: s.total_professors,
            departments: s.departments,
            avg_courses_per_professor: s.avg_courses_per_professor,
        }
    }
}

pub async fn professor_stats(
    State(state): State<AppState>,
) -> Result<Json<ProfessorStatsResponse>, ApiError> {
    let usecase = GetProfessorStatsUseCase {
        repo: state.professor_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

// ── GET /professors/by-name/{name} ───────────────────────────────────────────

pub async fn get_professor_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let usecase = GetProfessorUseCase {
        repo: state.professor_repo(),
    };
    Ok(Json(usecase.by_name(&name).await?.into()))
}

// ── GET /professors/{id} ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfessorDetailsResponse {
    #[serde(flatten)]
    pub professor: ProfessorResponse,
    pub courses: Vec<TaughtCourseResponse>,
}

pub async fn get_professor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProfessorDetailsResponse>, ApiError> {
    let usecase = GetProfessorUseCase {
        repo: state.professor_repo(),
    };
    let found = usecase.execute(id).await?;
    Ok(Json(ProfessorDetailsResponse {
        professor: found.professor.into(),
        courses: found
            .courses
            .into_iter()
            .map(TaughtCourseResponse::from)
            .collect(),
    }))
}

// ── POST /professors ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ProfessorRequest {
    pub name: String,
    pub department: Option<String>,
    pub email: Option<String>,
    pub office: Option<String>,
}

impl From<ProfessorRequest> for ProfessorInput {
    fn from(r: ProfessorRequest) -> Self {
        Self {
            name: r.name.trim().to_owned(),
            department: r.department,
            email: r.email,
            office: r.office,
        }
    }
}

pub async fn create_professor(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<ProfessorRequest>,
) -> Result<(StatusCode, Json<ProfessorResponse>), ApiError> {
    let usecase = CreateProfessorUseCase {
        repo: state.professor_repo(),
    };
    let professor = usecase.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(professor.into())))
}

// ── PUT /professors/{id} ─────────────────────────────────────────────────────

pub async fn update_professor(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ProfessorRequest>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let usecase = UpdateProfessorUseCase {
        repo: state.professor_repo(),
    };
    Ok(Json(usecase.execute(id, body.into()).await?.into()))
}

// ── DELETE /professors/{id} ──────────────────────────────────────────────────

pub async fn delete_professor(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteProfessorUseCase {
        repo: state.professor_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /professors/{id}/courses ─────────────────────────────────────────────

pub async fn list_professor_courses(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<TaughtCourseResponse>>, ApiError> {
    let usecase = ListProfessorCoursesUseCase {
        repo: state.professor_repo(),
    };
    let courses = usecase.execute(id).await?;
    Ok(Json(
        courses.into_iter().map(TaughtCourseResponse::from).collect(),
    ))
}

// ── GET /professors/{id}/reviews ─────────────────────────────────────────────

pub async fn list_professor_reviews(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let usecase = ListProfessorReviewsUseCase {
        professors: state.professor_repo(),
        reviews: state.review_repo(),
    };
    let reviews = usecase.execute(id).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

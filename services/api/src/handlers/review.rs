use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use degreedash_auth_types::session::SessionUser;

use crate::domain::types::Review;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, ListCourseReviewsUseCase, ListUserReviewsUseCase,
};

#[derive(Serialize)]
pub struct ReviewResponse {
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
    #[serde(serialize_with = "degreedash_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "degreedash_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            course_id: r.course_id,
            professor_id: r.professor_id,
            professor_name: r.professor_name,
            semester_taken: r.semester_taken,
            year_taken: r.year_taken,
            rating: r.rating,
            difficulty: r.difficulty,
            comment: r.comment,
            would_recommend: r.would_recommend,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// ── GET /courses/{id}/reviews ────────────────────────────────────────────────

pub async fn list_course_reviews(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let usecase = ListCourseReviewsUseCase {
        reviews: state.review_repo(),
        courses: state.course_repo(),
    };
    let reviews = usecase.execute(course_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

// ── POST /courses/{id}/reviews ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub professor_id: Option<i32>,
    pub semester_taken: Option<String>,
    pub year_taken: Option<i32>,
    pub rating: i32,
    pub difficulty: i32,
    pub comment: Option<String>,
    pub would_recommend: Option<bool>,
}

pub async fn create_review(
    session: SessionUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let usecase = CreateReviewUseCase {
        reviews: state.review_repo(),
        courses: state.course_repo(),
        professors: state.professor_repo(),
    };
    let review = usecase
        .execute(
            session.user_id,
            CreateReviewInput {
                course_id,
                professor_id: body.professor_id,
                semester_taken: body.semester_taken,
                year_taken: body.year_taken,
                rating: body.rating,
                difficulty: body.difficulty,
                comment: body.comment,
                would_recommend: body.would_recommend,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── GET /users/@me/reviews ───────────────────────────────────────────────────

pub async fn list_my_reviews(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let usecase = ListUserReviewsUseCase {
        repo: state.review_repo(),
    };
    let reviews = usecase.execute(session.user_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

use degreedash_domain::review::Score;

use crate::domain::repository::{CourseRepository, ProfessorRepository, ReviewRepository};
use crate::domain::types::{NewReview, Review};
use crate::error::ApiError;

// ── CreateReview ─────────────────────────────────────────────────────────────

pub struct CreateReviewInput {
    pub course_id: i32,
    pub professor_id: Option<i32>,
    pub semester_taken: Option<String>,
    pub year_taken: Option<i32>,
    pub rating: i32,
    pub difficulty: i32,
    pub comment: Option<String>,
    pub would_recommend: Option<bool>,
}

pub struct CreateReviewUseCase<V: ReviewRepository, C: CourseRepository, P: ProfessorRepository> {
    pub reviews: V,
    pub courses: C,
    pub professors: P,
}

impl<V, C, P> CreateReviewUseCase<V, C, P>
where
    V: ReviewRepository,
    C: CourseRepository,
    P: ProfessorRepository,
{
    pub async fn execute(&self, user_id: i32, input: CreateReviewInput) -> Result<Review, ApiError> {
        let rating =
            Score::new(input.rating).map_err(|e| ApiError::validation(format!("rating: {e}")))?;
        let difficulty = Score::new(input.difficulty)
            .map_err(|e| ApiError::validation(format!("difficulty: {e}")))?;

        self.courses
            .find_by_id(input.course_id)
            .await?
            .ok_or(ApiError::CourseNotFound)?;
        if let Some(professor_id) = input.professor_id {
            self.professors
                .find_by_id(professor_id)
                .await?
                .ok_or(ApiError::ProfessorNotFound)?;
        }

        let review = NewReview {
            course_id: input.course_id,
            professor_id: input.professor_id,
            semester_taken: input.semester_taken.filter(|s| !s.trim().is_empty()),
            year_taken: input.year_taken,
            rating: rating.get(),
            difficulty: difficulty.get(),
            comment: input.comment.filter(|c| !c.trim().is_empty()),
            would_recommend: input.would_recommend.unwrap_or(true),
        };
        self.reviews.create(user_id, &review).await
    }
}

// ── ListReviews ──────────────────────────────────────────────────────────────

pub struct ListCourseReviewsUseCase<V: ReviewRepository, C: CourseRepository> {
    pub reviews: V,
    pub courses: C,
}

impl<V: ReviewRepository, C: CourseRepository> ListCourseReviewsUseCase<V, C> {
    pub async fn execute(&self, course_id: i32) -> Result<Vec<Review>, ApiError> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or(ApiError::CourseNotFound)?;
        self.reviews.list_for_course(course_id).await
    }
}

pub struct ListUserReviewsUseCase<V: ReviewRepository> {
    pub repo: V,
}

impl<V: ReviewRepository> ListUserReviewsUseCase<V> {
    pub async fn execute(&self, user_id: i32) -> Result<Vec<Review>, ApiError> {
        self.repo.list_for_user(user_id).await
    }
}

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Select,
};
use tracing::info;

use degreedash_api_schema::{professors, reviews};

use super::review_from_model;
use crate::domain::repository::ReviewRepository;
use crate::domain::types::{NewReview, Review};
use crate::error::ApiError;

const DUPLICATE_REVIEW: &str = "you have already reviewed this course for that professor and term";

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl DbReviewRepository {
    async fn list_where(
        &self,
        query: Select<reviews::Entity>,
        context: &'static str,
    ) -> Result<Vec<Review>, ApiError> {
        let rows = query
            .find_also_related(professors::Entity)
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .all(&self.db)
            .await
            .context(context)?;
        Ok(rows
            .into_iter()
            .map(|(review, professor)| review_from_model(review, professor))
            .collect())
    }
}

impl ReviewRepository for DbReviewRepository {
    async fn create(&self, user_id: i32, review: &NewReview) -> Result<Review, ApiError> {
        let now = Utc::now();
        let model = reviews::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(review.course_id),
            professor_id: Set(review.professor_id),
            semester_taken: Set(review.semester_taken.clone()),
            year_taken: Set(review.year_taken),
            rating: Set(review.rating),
            difficulty: Set(review.difficulty),
            comment: Set(review.comment.clone()),
            would_recommend: Set(review.would_recommend),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ApiError::from_write(e, "insert review", DUPLICATE_REVIEW))?;
        info!(review_id = model.id, user_id, course_id = model.course_id, "review created");

        let professor = match model.professor_id {
            Some(id) => professors::Entity::find_by_id(id)
                .one(&self.db)
                .await
                .context("find reviewed professor")?,
            None => None,
        };
        Ok(review_from_model(model, professor))
    }

    async fn list_for_course(&self, course_id: i32) -> Result<Vec<Review>, ApiError> {
        self.list_where(
            reviews::Entity::find().filter(reviews::Column::CourseId.eq(course_id)),
            "list course reviews",
        )
        .await
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Review>, ApiError> {
        self.list_where(
            reviews::Entity::find().filter(reviews::Column::UserId.eq(user_id)),
            "list user reviews",
        )
        .await
    }

    async fn list_for_professor(&self, professor_id: i32) -> Result<Vec<Review>, ApiError> {
        self.list_where(
            reviews::Entity::find().filter(reviews::Column::ProfessorId.eq(professor_id)),
            "list professor reviews",
        )
        .await
    }
}

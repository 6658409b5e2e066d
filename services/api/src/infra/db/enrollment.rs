use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::info;

use degreedash_api_schema::{courses, enrollments};
use degreedash_domain::course::EnrollmentStatus;

use super::{course_from_model, decrement_enrolled, increment_enrolled};
use crate::domain::repository::EnrollmentRepository;
use crate::domain::types::{DropOutcome, EnrollOutcome, EnrolledCourse};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn is_enrolled(&self, user_id: i32, course_id: i32) -> Result<bool, ApiError> {
        let count = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .context("check enrollment")?;
        Ok(count > 0)
    }

    async fn enroll(&self, user_id: i32, course_id: i32) -> Result<EnrollOutcome, ApiError> {
        let result = self
            .db
            .transaction::<_, EnrollOutcome, ApiError>(|txn| {
                Box::pin(async move {
                    let existing = enrollments::Entity::find()
                        .filter(enrollments::Column::UserId.eq(user_id))
                        .filter(enrollments::Column::CourseId.eq(course_id))
                        .one(txn)
                        .await
                        .context("find enrollment")?;
                    if existing.is_some() {
                        return Ok(EnrollOutcome::AlreadyEnrolled);
                    }

                    let course = courses::Entity::find_by_id(course_id)
                        .one(txn)
                        .await
                        .context("find course for enrollment")?
                        .ok_or(ApiError::CourseNotFound)?;
                    // Early exit only; the guarded increment below is authoritative.
                    if course.enrolled >= course.capacity {
                        return Ok(EnrollOutcome::CourseFull);
                    }

                    enrollments::ActiveModel {
                        user_id: Set(user_id),
                        course_id: Set(course_id),
                        enrolled_at: Set(Utc::now()),
                        status: Set(EnrollmentStatus::Enrolled.to_string()),
                        grade: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| ApiError::from_write(e, "insert enrollment", "already enrolled"))?;

                    increment_enrolled(txn, course_id).await?;
                    Ok(EnrollOutcome::Enrolled)
                })
            })
            .await
            .map_err(ApiError::from_txn);

        // Losing a race surfaces as an error that rolled the transaction back.
        let outcome = match result {
            Err(ApiError::CourseFull) => EnrollOutcome::CourseFull,
            Err(ApiError::Duplicate(_)) => EnrollOutcome::AlreadyEnrolled,
            other => other?,
        };
        info!(user_id, course_id, outcome = ?outcome, "enroll");
        Ok(outcome)
    }

    async fn drop_course(&self, user_id: i32, course_id: i32) -> Result<DropOutcome, ApiError> {
        let outcome = self
            .db
            .transaction::<_, DropOutcome, ApiError>(|txn| {
                Box::pin(async move {
                    let result = enrollments::Entity::delete_many()
                        .filter(enrollments::Column::UserId.eq(user_id))
                        .filter(enrollments::Column::CourseId.eq(course_id))
                        .exec(txn)
                        .await
                        .context("delete enrollment")?;
                    if result.rows_affected == 0 {
                        return Ok(DropOutcome::NotEnrolled);
                    }
                    decrement_enrolled(txn, course_id).await?;
                    Ok(DropOutcome::Dropped)
                })
            })
            .await
            .map_err(ApiError::from_txn)?;
        info!(user_id, course_id, outcome = ?outcome, "drop");
        Ok(outcome)
    }

    async fn enrolled_courses(&self, user_id: i32) -> Result<Vec<EnrolledCourse>, ApiError> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id))
            .find_also_related(courses::Entity)
            .order_by_desc(enrollments::Column::EnrolledAt)
            .order_by_desc(enrollments::Column::Id)
            .all(&self.db)
            .await
            .context("list enrolled courses")?;
        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                course.map(|c| EnrolledCourse {
                    course: course_from_model(c),
                    enrolled_at: enrollment.enrolled_at,
                    status: enrollment.status.parse().unwrap_or_default(),
                    grade: enrollment.grade,
                })
            })
            .collect())
    }
}

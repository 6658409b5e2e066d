//! sea-orm implementations of the repository traits.

use anyhow::Context as _;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, sea_query::Expr};

use degreedash_api_schema::{course_details, courses, professors, reviews};
use degreedash_domain::user::UserType;

use crate::domain::types::{Course, CourseSummary, Professor, Review};
use crate::error::ApiError;

mod course;
mod enrollment;
mod professor;
mod review;
mod user;

pub use course::DbCourseRepository;
pub use enrollment::DbEnrollmentRepository;
pub use professor::DbProfessorRepository;
pub use review::DbReviewRepository;
pub use user::DbUserRepository;

// ── Capacity guard ───────────────────────────────────────────────────────────

/// `enrolled = enrolled + 1` only while `enrolled < capacity`.
///
/// This predicate, not any earlier read, is what keeps `enrolled <= capacity`
/// under concurrent enrollment. Zero affected rows means `CourseFull`.
pub(crate) async fn increment_enrolled<C>(conn: &C, course_id: i32) -> Result<(), ApiError>
where
    C: ConnectionTrait,
{
    let result = courses::Entity::update_many()
        .col_expr(
            courses::Column::Enrolled,
            Expr::col(courses::Column::Enrolled).add(1),
        )
        .filter(courses::Column::Id.eq(course_id))
        .filter(Expr::col(courses::Column::Enrolled).lt(Expr::col(courses::Column::Capacity)))
        .exec(conn)
        .await
        .context("increment enrolled")?;
    if result.rows_affected == 0 {
        return Err(ApiError::CourseFull);
    }
    Ok(())
}

/// `enrolled = enrolled - 1` only while `enrolled > 0`. Zero affected rows means `NoEnrollments`.
pub(crate) async fn decrement_enrolled<C>(conn: &C, course_id: i32) -> Result<(), ApiError>
where
    C: ConnectionTrait,
{
    let result = courses::Entity::update_many()
        .col_expr(
            courses::Column::Enrolled,
            Expr::col(courses::Column::Enrolled).sub(1),
        )
        .filter(courses::Column::Id.eq(course_id))
        .filter(courses::Column::Enrolled.gt(0))
        .exec(conn)
        .await
        .context("decrement enrolled")?;
    if result.rows_affected == 0 {
        return Err(ApiError::NoEnrollments);
    }
    Ok(())
}

pub(crate) async fn course_exists<C>(conn: &C, course_id: i32) -> Result<bool, ApiError>
where
    C: ConnectionTrait,
{
    let model = courses::Entity::find_by_id(course_id)
        .one(conn)
        .await
        .context("find course by id")?;
    Ok(model.is_some())
}

// ── Model mapping ────────────────────────────────────────────────────────────

pub(crate) fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: model.id,
        course_code: model.course_code,
        course_name: model.course_name,
        department: model.department,
        credits: model.credits,
        description: model.description,
        prerequisites: model.prerequisites,
        schedule: model.schedule,
        semester: model.semester,
        year: model.year,
        capacity: model.capacity,
        enrolled: model.enrolled,
        created_at: model.created_at,
    }
}

pub(crate) fn summary_from_model(model: course_details::Model) -> CourseSummary {
    CourseSummary {
        course: Course {
            id: model.id,
            course_code: model.course_code,
            course_name: model.course_name,
            department: model.department,
            credits: model.credits,
            description: model.description,
            prerequisites: model.prerequisites,
            schedule: model.schedule,
            semester: model.semester,
            year: model.year,
            capacity: model.capacity,
            enrolled: model.enrolled,
            created_at: model.created_at,
        },
        seats_available: model.seats_available,
        instructors: model.instructors,
        instructor_count: model.instructor_count,
        review_count: model.review_count,
        avg_rating: model.avg_rating,
        avg_difficulty: model.avg_difficulty,
        recommend_rate: model.recommend_rate,
    }
}

pub(crate) fn professor_from_model(model: professors::Model) -> Professor {
    Professor {
        id: model.id,
        name: model.name,
        department: model.department,
        email: model.email,
        office: model.office,
    }
}

pub(crate) fn review_from_model(
    model: reviews::Model,
    professor: Option<professors::Model>,
) -> Review {
    Review {
        id: model.id,
        user_id: model.user_id,
        course_id: model.course_id,
        professor_id: model.professor_id,
        professor_name: professor.map(|p| p.name),
        semester_taken: model.semester_taken,
        year_taken: model.year_taken,
        rating: model.rating,
        difficulty: model.difficulty,
        comment: model.comment,
        would_recommend: model.would_recommend,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// CHECK constraints keep stored values within the known set.
pub(crate) fn user_type_from_str(value: &str) -> UserType {
    value.parse().unwrap_or_default()
}

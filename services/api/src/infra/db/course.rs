use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, Statement, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::info;

use degreedash_api_schema::{
    course_details, course_professors, courses, enrollments, professors, user_enrollments,
};
use degreedash_core::sea_ext::search_any;
use degreedash_domain::course::InstructorRole;

use super::{
    course_exists, course_from_model, decrement_enrolled, increment_enrolled,
    professor_from_model, summary_from_model,
};
use crate::domain::repository::CourseRepository;
use crate::domain::types::{
    Course, CourseFacets, CourseFilter, CourseInput, CourseProfessor, CourseStats, CourseSummary,
    RosterEntry, sort_course_professors,
};
use crate::error::ApiError;

const DUPLICATE_CODE: &str = "a course with this course code already exists";

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<CourseSummary>, ApiError> {
        let mut query = course_details::Entity::find();
        if let Some(department) = &filter.department {
            query = query.filter(course_details::Column::Department.eq(department.as_str()));
        }
        if let Some(term) = &filter.search {
            query = query.filter(search_any(
                &[
                    course_details::Column::CourseCode,
                    course_details::Column::CourseName,
                    course_details::Column::Description,
                ],
                term,
            ));
        }
        if let Some(semester) = &filter.semester {
            query = query.filter(course_details::Column::Semester.eq(semester.as_str()));
        }
        if let Some(year) = filter.year {
            query = query.filter(course_details::Column::Year.eq(year));
        }
        let models = query
            .order_by_asc(course_details::Column::CourseCode)
            .all(&self.db)
            .await
            .context("list courses")?;
        Ok(models.into_iter().map(summary_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CourseSummary>, ApiError> {
        let model = course_details::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        Ok(model.map(summary_from_model))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<CourseSummary>, ApiError> {
        let model = course_details::Entity::find()
            .filter(course_details::Column::CourseCode.eq(code))
            .one(&self.db)
            .await
            .context("find course by code")?;
        Ok(model.map(summary_from_model))
    }

    async fn create(
        &self,
        input: &CourseInput,
        professor_ids: &[i32],
    ) -> Result<Course, ApiError> {
        let (credits, capacity) = input.validate().map_err(ApiError::Validation)?;
        let model = self
            .db
            .transaction::<_, courses::Model, ApiError>(|txn| {
                let input = input.clone();
                let professor_ids = professor_ids.to_vec();
                Box::pin(async move {
                    let course = courses::ActiveModel {
                        course_code: Set(input.course_code.trim().to_owned()),
                        course_name: Set(input.course_name.trim().to_owned()),
                        department: Set(input.department.trim().to_owned()),
                        credits: Set(credits),
                        description: Set(input.description),
                        prerequisites: Set(input.prerequisites),
                        schedule: Set(input.schedule),
                        semester: Set(input.semester),
                        year: Set(input.year),
                        capacity: Set(capacity),
                        enrolled: Set(0),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await
                    .map_err(|e| ApiError::from_write(e, "insert course", DUPLICATE_CODE))?;
                    link_professors(txn, course.id, &professor_ids).await?;
                    Ok(course)
                })
            })
            .await
            .map_err(ApiError::from_txn)?;
        info!(course_id = model.id, course_code = %model.course_code, "course created");
        Ok(course_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        input: &CourseInput,
        professor_ids: Option<&[i32]>,
    ) -> Result<Course, ApiError> {
        let (credits, capacity) = input.validate().map_err(ApiError::Validation)?;
        let model = self
            .db
            .transaction::<_, courses::Model, ApiError>(|txn| {
                let input = input.clone();
                let professor_ids = professor_ids.map(<[i32]>::to_vec);
                Box::pin(async move {
                    let existing = courses::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .context("find course for update")?
                        .ok_or(ApiError::CourseNotFound)?;
                    if capacity < existing.enrolled {
                        return Err(ApiError::Validation(format!(
                            "capacity {capacity} is below the {} students already enrolled",
                            existing.enrolled
                        )));
                    }

                    let mut am = existing.into_active_model();
                    am.course_code = Set(input.course_code.trim().to_owned());
                    am.course_name = Set(input.course_name.trim().to_owned());
                    am.department = Set(input.department.trim().to_owned());
                    am.credits = Set(credits);
                    am.description = Set(input.description);
                    am.prerequisites = Set(input.prerequisites);
                    am.schedule = Set(input.schedule);
                    am.semester = Set(input.semester);
                    am.year = Set(input.year);
                    am.capacity = Set(capacity);
                    let course = am
                        .update(txn)
                        .await
                        .map_err(|e| ApiError::from_write(e, "update course", DUPLICATE_CODE))?;

                    if let Some(professor_ids) = professor_ids {
                        course_professors::Entity::delete_many()
                            .filter(course_professors::Column::CourseId.eq(id))
                            .exec(txn)
                            .await
                            .context("clear course professors")?;
                        link_professors(txn, id, &professor_ids).await?;
                    }
                    Ok(course)
                })
            })
            .await
            .map_err(ApiError::from_txn)?;
        info!(course_id = id, relinked = professor_ids.is_some(), "course updated");
        Ok(course_from_model(model))
    }

    async fn delete(&self, id: i32) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), ApiError>(|txn| {
                Box::pin(async move {
                    let enrolled = enrollments::Entity::find()
                        .filter(enrollments::Column::CourseId.eq(id))
                        .count(txn)
                        .await
                        .context("count course enrollments")?;
                    if enrolled > 0 {
                        return Err(ApiError::CourseHasEnrollments(enrolled));
                    }
                    let result = courses::Entity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .context("delete course")?;
                    if result.rows_affected == 0 {
                        return Err(ApiError::CourseNotFound);
                    }
                    Ok(())
                })
            })
            .await
            .map_err(ApiError::from_txn)?;
        info!(course_id = id, "course deleted");
        Ok(())
    }

    async fn increment_enrolled(&self, id: i32) -> Result<(), ApiError> {
        match increment_enrolled(&self.db, id).await {
            Err(ApiError::CourseFull) => {
                if course_exists(&self.db, id).await? {
                    Err(ApiError::CourseFull)
                } else {
                    Err(ApiError::CourseNotFound)
                }
            }
            other => other,
        }
    }

    async fn decrement_enrolled(&self, id: i32) -> Result<(), ApiError> {
        match decrement_enrolled(&self.db, id).await {
            Err(ApiError::NoEnrollments) => {
                if course_exists(&self.db, id).await? {
                    Err(ApiError::NoEnrollments)
                } else {
                    Err(ApiError::CourseNotFound)
                }
            }
            other => other,
        }
    }

    async fn has_available_seats(&self, id: i32) -> Result<bool, ApiError> {
        let course = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?
            .ok_or(ApiError::CourseNotFound)?;
        Ok(course.enrolled < course.capacity)
    }

    async fn professors(&self, course_id: i32) -> Result<Vec<CourseProfessor>, ApiError> {
        let rows = course_professors::Entity::find()
            .filter(course_professors::Column::CourseId.eq(course_id))
            .find_also_related(professors::Entity)
            .all(&self.db)
            .await
            .context("list course professors")?;
        let mut list: Vec<CourseProfessor> = rows
            .into_iter()
            .filter_map(|(link, professor)| {
                professor.map(|p| CourseProfessor {
                    professor: professor_from_model(p),
                    role: InstructorRole::from(link.role),
                })
            })
            .collect();
        sort_course_professors(&mut list);
        Ok(list)
    }

    async fn add_professor(
        &self,
        course_id: i32,
        professor_id: i32,
        role: &InstructorRole,
    ) -> Result<(), ApiError> {
        let link = course_professors::ActiveModel {
            course_id: Set(course_id),
            professor_id: Set(professor_id),
            role: Set(role.to_string()),
            ..Default::default()
        };
        course_professors::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    course_professors::Column::CourseId,
                    course_professors::Column::ProfessorId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| ApiError::from_write(e, "add course professor", "already assigned"))?;
        info!(course_id, professor_id, role = %role, "professor assigned");
        Ok(())
    }

    async fn remove_professor(&self, course_id: i32, professor_id: i32) -> Result<bool, ApiError> {
        let result = course_professors::Entity::delete_many()
            .filter(course_professors::Column::CourseId.eq(course_id))
            .filter(course_professors::Column::ProfessorId.eq(professor_id))
            .exec(&self.db)
            .await
            .context("remove course professor")?;
        Ok(result.rows_affected > 0)
    }

    async fn update_professor_role(
        &self,
        course_id: i32,
        professor_id: i32,
        role: &InstructorRole,
    ) -> Result<bool, ApiError> {
        let result = course_professors::Entity::update_many()
            .col_expr(course_professors::Column::Role, Expr::value(role.to_string()))
            .filter(course_professors::Column::CourseId.eq(course_id))
            .filter(course_professors::Column::ProfessorId.eq(professor_id))
            .exec(&self.db)
            .await
            .context("update course professor role")?;
        Ok(result.rows_affected > 0)
    }

    async fn facets(&self) -> Result<CourseFacets, ApiError> {
        let departments: Vec<String> = courses::Entity::find()
            .select_only()
            .column(courses::Column::Department)
            .distinct()
            .order_by_asc(courses::Column::Department)
            .into_tuple()
            .all(&self.db)
            .await
            .context("list departments")?;
        let semesters: Vec<String> = courses::Entity::find()
            .select_only()
            .column(courses::Column::Semester)
            .distinct()
            .filter(courses::Column::Semester.is_not_null())
            .order_by_asc(courses::Column::Semester)
            .into_tuple()
            .all(&self.db)
            .await
            .context("list semesters")?;
        let years: Vec<i32> = courses::Entity::find()
            .select_only()
            .column(courses::Column::Year)
            .distinct()
            .filter(courses::Column::Year.is_not_null())
            .order_by_desc(courses::Column::Year)
            .into_tuple()
            .all(&self.db)
            .await
            .context("list years")?;
        Ok(CourseFacets {
            departments,
            semesters,
            years,
        })
    }

    async fn stats(&self) -> Result<CourseStats, ApiError> {
        let row = CourseStatsRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            COURSE_STATS_SQL,
        ))
        .one(&self.db)
        .await
        .context("course stats")?
        .unwrap_or_default();
        Ok(CourseStats {
            total_courses: row.total_courses,
            departments: row.departments,
            total_capacity: row.total_capacity,
            total_enrolled: row.total_enrolled,
            avg_fill_percentage: row.avg_fill_percentage,
            courses_with_professors: row.courses_with_professors,
            avg_professors_per_course: row.avg_professors_per_course,
            courses_with_reviews: row.courses_with_reviews,
            total_reviews: row.total_reviews,
        })
    }

    async fn roster(&self, course_id: i32) -> Result<Vec<RosterEntry>, ApiError> {
        let models = user_enrollments::Entity::find()
            .filter(user_enrollments::Column::CourseId.eq(course_id))
            .order_by_desc(user_enrollments::Column::EnrolledAt)
            .order_by_asc(user_enrollments::Column::Name)
            .all(&self.db)
            .await
            .context("course roster")?;
        Ok(models
            .into_iter()
            .map(|m| RosterEntry {
                user_id: m.user_id,
                email: m.email,
                name: m.name,
                enrolled_at: m.enrolled_at,
                status: m.status.parse().unwrap_or_default(),
                grade: m.grade,
            })
            .collect())
    }
}

/// Insert one "Instructor" link per distinct professor id.
async fn link_professors<C>(conn: &C, course_id: i32, professor_ids: &[i32]) -> Result<(), ApiError>
where
    C: ConnectionTrait,
{
    let mut ids = professor_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    for professor_id in ids {
        course_professors::ActiveModel {
            course_id: Set(course_id),
            professor_id: Set(professor_id),
            role: Set(InstructorRole::Instructor.to_string()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| match e.sql_err() {
            // The course row was written in this transaction, so the dangling side is the professor.
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => ApiError::ProfessorNotFound,
            _ => ApiError::from_write(e, "link course professor", "professor listed twice"),
        })?;
    }
    Ok(())
}

const COURSE_STATS_SQL: &str = r#"
SELECT
    COUNT(*) AS total_courses,
    COUNT(DISTINCT department) AS departments,
    COALESCE(SUM(capacity), 0) AS total_capacity,
    COALESCE(SUM(enrolled), 0) AS total_enrolled,
    ROUND(AVG(CASE WHEN capacity > 0 THEN 100.0 * enrolled / capacity END), 1)
        AS avg_fill_percentage,
    (SELECT COUNT(DISTINCT course_id) FROM course_professors) AS courses_with_professors,
    (SELECT ROUND(AVG(n), 1)
        FROM (SELECT COUNT(*) AS n FROM course_professors GROUP BY course_id))
        AS avg_professors_per_course,
    (SELECT COUNT(DISTINCT course_id) FROM reviews) AS courses_with_reviews,
    (SELECT COUNT(*) FROM reviews) AS total_reviews
FROM courses
"#;

#[derive(Debug, Default, FromQueryResult)]
struct CourseStatsRow {
    total_courses: i64,
    departments: i64,
    total_capacity: i64,
    total_enrolled: i64,
    avg_fill_percentage: Option<f64>,
    courses_with_professors: i64,
    avg_professors_per_course: Option<f64>,
    courses_with_reviews: i64,
    total_reviews: i64,
}

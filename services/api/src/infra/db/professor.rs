use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, FromQueryResult, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder,
    Statement, TransactionTrait,
};
use tracing::info;

use degreedash_api_schema::{course_professors, courses, professors};
use degreedash_core::sea_ext::search_any;
use degreedash_domain::course::InstructorRole;

use super::{course_from_model, professor_from_model};
use crate::domain::repository::ProfessorRepository;
use crate::domain::types::{
    Professor, ProfessorFilter, ProfessorInput, ProfessorStats, TaughtCourse,
};
use crate::error::ApiError;

const REVIEW_KEY_COLLISION: &str =
    "a student reviewed this course both with and without this professor for the same term";
const DUPLICATE_PROFESSOR: &str = "a professor with this name already exists in the department";

#[derive(Clone)]
pub struct DbProfessorRepository {
    pub db: DatabaseConnection,
}

impl ProfessorRepository for DbProfessorRepository {
    async fn list(&self, filter: &ProfessorFilter) -> Result<Vec<Professor>, ApiError> {
        let mut query = professors::Entity::find();
        if let Some(department) = &filter.department {
            query = query.filter(professors::Column::Department.eq(department.as_str()));
        }
        if let Some(term) = &filter.search {
            query = query.filter(search_any(
                &[
                    professors::Column::Name,
                    professors::Column::Department,
                    professors::Column::Email,
                ],
                term,
            ));
        }
        let models = query
            .order_by_asc(professors::Column::Name)
            .order_by_asc(professors::Column::Id)
            .all(&self.db)
            .await
            .context("list professors")?;
        Ok(models.into_iter().map(professor_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Professor>, ApiError> {
        let model = professors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find professor by id")?;
        Ok(model.map(professor_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Professor>, ApiError> {
        let model = professors::Entity::find()
            .filter(professors::Column::Name.eq(name))
            .order_by_asc(professors::Column::Id)
            .one(&self.db)
            .await
            .context("find professor by name")?;
        Ok(model.map(professor_from_model))
    }

    async fn create(&self, input: &ProfessorInput) -> Result<Professor, ApiError> {
        let model = professors::ActiveModel {
            name: Set(input.name.trim().to_owned()),
            department: Set(input.department.clone()),
            email: Set(input.email.clone()),
            office: Set(input.office.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ApiError::from_write(e, "insert professor", DUPLICATE_PROFESSOR))?;
        info!(professor_id = model.id, "professor created");
        Ok(professor_from_model(model))
    }

    async fn update(&self, id: i32, input: &ProfessorInput) -> Result<Professor, ApiError> {
        let existing = professors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find professor for update")?
            .ok_or(ApiError::ProfessorNotFound)?;
        let mut am = existing.into_active_model();
        am.name = Set(input.name.trim().to_owned());
        am.department = Set(input.department.clone());
        am.email = Set(input.email.clone());
        am.office = Set(input.office.clone());
        let model = am
            .update(&self.db)
            .await
            .map_err(|e| ApiError::from_write(e, "update professor", DUPLICATE_PROFESSOR))?;
        info!(professor_id = id, "professor updated");
        Ok(professor_from_model(model))
    }

    async fn delete(&self, id: i32) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), ApiError>(|txn| {
                Box::pin(async move {
                    let linked = course_professors::Entity::find()
                        .filter(course_professors::Column::ProfessorId.eq(id))
                        .count(txn)
                        .await
                        .context("count professor courses")?;
                    if linked > 0 {
                        return Err(ApiError::ProfessorHasCourses(linked));
                    }
                    // Nulling the professor on their reviews can collide with a
                    // review the same user left without naming a professor.
                    let result = professors::Entity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .map_err(|e| {
                            ApiError::from_write(e, "delete professor", REVIEW_KEY_COLLISION)
                        })?;
                    if result.rows_affected == 0 {
                        return Err(ApiError::ProfessorNotFound);
                    }
                    Ok(())
                })
            })
            .await
            .map_err(ApiError::from_txn)?;
        info!(professor_id = id, "professor deleted");
        Ok(())
    }

    async fn courses(&self, professor_id: i32) -> Result<Vec<TaughtCourse>, ApiError> {
        let rows = course_professors::Entity::find()
            .filter(course_professors::Column::ProfessorId.eq(professor_id))
            .find_also_related(courses::Entity)
            .order_by_desc(courses::Column::Year)
            .order_by_asc(courses::Column::Semester)
            .order_by_asc(courses::Column::CourseCode)
            .all(&self.db)
            .await
            .context("list professor courses")?;
        Ok(rows
            .into_iter()
            .filter_map(|(link, course)| {
                course.map(|c| TaughtCourse {
                    course: course_from_model(c),
                    role: InstructorRole::from(link.role),
                })
            })
            .collect())
    }

    async fn stats(&self) -> Result<ProfessorStats, ApiError> {
        let row = ProfessorStatsRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            PROFESSOR_STATS_SQL,
        ))
        .one(&self.db)
        .await
        .context("professor stats")?
        .unwrap_or_default();
        Ok(ProfessorStats {
            total_professors: row.total_professors,
            departments: row.departments,
            avg_courses_per_professor: row.avg_courses_per_professor,
        })
    }
}

const PROFESSOR_STATS_SQL: &str = r#"
SELECT
    COUNT(*) AS total_professors,
    COUNT(DISTINCT department) AS departments,
    (SELECT ROUND(AVG(n), 1)
        FROM (SELECT COUNT(cp.id) AS n
              FROM professors p
              LEFT JOIN course_professors cp ON cp.professor_id = p.id
              GROUP BY p.id)) AS avg_courses_per_professor
FROM professors
"#;

#[derive(Debug, Default, FromQueryResult)]
struct ProfessorStatsRow {
    total_professors: i64,
    departments: i64,
    avg_courses_per_professor: Option<f64>,
}

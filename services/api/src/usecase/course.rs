use tracing::info;

use degreedash_domain::course::InstructorRole;
use degreedash_domain::review::rounded_mean;

use crate::domain::repository::{CourseRepository, ProfessorRepository, ReviewRepository};
use crate::domain::types::{
    Course, CourseFacets, CourseFilter, CourseInput, CourseProfessor, CourseStats, CourseSummary,
    CourseWithDetails, RosterEntry,
};
use crate::error::ApiError;

async fn require_course<R: CourseRepository>(repo: &R, id: i32) -> Result<CourseSummary, ApiError> {
    repo.find_by_id(id).await?.ok_or(ApiError::CourseNotFound)
}

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> ListCoursesUseCase<R> {
    pub async fn execute(&self, filter: CourseFilter) -> Result<Vec<CourseSummary>, ApiError> {
        self.repo.list(&filter).await
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> GetCourseUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<CourseSummary, ApiError> {
        require_course(&self.repo, id).await
    }

    pub async fn by_code(&self, code: &str) -> Result<CourseSummary, ApiError> {
        self.repo
            .find_by_code(code.trim())
            .await?
            .ok_or(ApiError::CourseNotFound)
    }
}

// ── GetCourseDetails ─────────────────────────────────────────────────────────

pub struct GetCourseDetailsUseCase<C: CourseRepository, V: ReviewRepository> {
    pub courses: C,
    pub reviews: V,
}

impl<C: CourseRepository, V: ReviewRepository> GetCourseDetailsUseCase<C, V> {
    pub async fn execute(&self, id: i32) -> Result<CourseWithDetails, ApiError> {
        let course = require_course(&self.courses, id).await?;
        let professors = self.courses.professors(id).await?;
        let reviews = self.reviews.list_for_course(id).await?;
        let average_rating = rounded_mean(reviews.iter().map(|r| r.rating));
        let average_difficulty = rounded_mean(reviews.iter().map(|r| r.difficulty));
        Ok(CourseWithDetails {
            course,
            professors,
            reviews,
            average_rating,
            average_difficulty,
        })
    }
}

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> CreateCourseUseCase<R> {
    pub async fn execute(
        &self,
        input: CourseInput,
        professor_ids: Vec<i32>,
    ) -> Result<Course, ApiError> {
        input.validate().map_err(ApiError::Validation)?;
        self.repo.create(&input, &professor_ids).await
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> UpdateCourseUseCase<R> {
    /// `professor_ids: None` keeps the current links.
    pub async fn execute(
        &self,
        id: i32,
        input: CourseInput,
        professor_ids: Option<Vec<i32>>,
    ) -> Result<Course, ApiError> {
        input.validate().map_err(ApiError::Validation)?;
        self.repo
            .update(id, &input, professor_ids.as_deref())
            .await
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> DeleteCourseUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        self.repo.delete(id).await
    }
}

// ── CourseProfessors ─────────────────────────────────────────────────────────

pub struct ListCourseProfessorsUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> ListCourseProfessorsUseCase<R> {
    pub async fn execute(&self, course_id: i32) -> Result<Vec<CourseProfessor>, ApiError> {
        require_course(&self.repo, course_id).await?;
        self.repo.professors(course_id).await
    }
}

pub struct AddCourseProfessorUseCase<C: CourseRepository, P: ProfessorRepository> {
    pub courses: C,
    pub professors: P,
}

impl<C: CourseRepository, P: ProfessorRepository> AddCourseProfessorUseCase<C, P> {
    /// Link a professor (default role "Instructor") and return the updated staff list.
    pub async fn execute(
        &self,
        course_id: i32,
        professor_id: i32,
        role: Option<InstructorRole>,
    ) -> Result<Vec<CourseProfessor>, ApiError> {
        require_course(&self.courses, course_id).await?;
        self.professors
            .find_by_id(professor_id)
            .await?
            .ok_or(ApiError::ProfessorNotFound)?;
        let role = role.unwrap_or_default();
        self.courses
            .add_professor(course_id, professor_id, &role)
            .await?;
        self.courses.professors(course_id).await
    }
}

pub struct RemoveCourseProfessorUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> RemoveCourseProfessorUseCase<R> {
    pub async fn execute(
        &self,
        course_id: i32,
        professor_id: i32,
    ) -> Result<Vec<CourseProfessor>, ApiError> {
        require_course(&self.repo, course_id).await?;
        if !self.repo.remove_professor(course_id, professor_id).await? {
            return Err(ApiError::CourseProfessorNotFound);
        }
        info!(course_id, professor_id, "professor unlinked");
        self.repo.professors(course_id).await
    }
}

pub struct UpdateCourseProfessorRoleUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> UpdateCourseProfessorRoleUseCase<R> {
    pub async fn execute(
        &self,
        course_id: i32,
        professor_id: i32,
        role: InstructorRole,
    ) -> Result<Vec<CourseProfessor>, ApiError> {
        if role.as_str().trim().is_empty() {
            return Err(ApiError::validation("role is required"));
        }
        require_course(&self.repo, course_id).await?;
        if !self
            .repo
            .update_professor_role(course_id, professor_id, &role)
            .await?
        {
            return Err(ApiError::CourseProfessorNotFound);
        }
        self.repo.professors(course_id).await
    }
}

// ── Catalogue ────────────────────────────────────────────────────────────────

pub struct GetCourseFacetsUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> GetCourseFacetsUseCase<R> {
    pub async fn execute(&self) -> Result<CourseFacets, ApiError> {
        self.repo.facets().await
    }
}

pub struct GetCourseStatsUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> GetCourseStatsUseCase<R> {
    pub async fn execute(&self) -> Result<CourseStats, ApiError> {
        self.repo.stats().await
    }
}

pub struct GetCourseRosterUseCase<R: CourseRepository> {
    pub repo: R,
}

impl<R: CourseRepository> GetCourseRosterUseCase<R> {
    pub async fn execute(&self, course_id: i32) -> Result<Vec<RosterEntry>, ApiError> {
        require_course(&self.repo, course_id).await?;
        self.repo.roster(course_id).await
    }
}

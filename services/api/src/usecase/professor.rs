use crate::domain::repository::{ProfessorRepository, ReviewRepository};
use crate::domain::types::{
    Professor, ProfessorFilter, ProfessorInput, ProfessorStats, ProfessorWithCourses, Review,
    TaughtCourse,
};
use crate::error::ApiError;

async fn require_professor<R: ProfessorRepository>(
    repo: &R,
    id: i32,
) -> Result<Professor, ApiError> {
    repo.find_by_id(id).await?.ok_or(ApiError::ProfessorNotFound)
}

// ── ListProfessors ───────────────────────────────────────────────────────────

pub struct ListProfessorsUseCase<R: ProfessorRepository> {
    pub repo: R,
}

impl<R: ProfessorRepository> ListProfessorsUseCase<R> {
    pub async fn execute(&self, filter: ProfessorFilter) -> Result<Vec<Professor>, ApiError> {
        self.repo.list(&filter).await
    }
}

// ── GetProfessor ─────────────────────────────────────────────────────────────

pub struct GetProfessorUseCase<R: ProfessorRepository> {
    pub repo: R,
}

impl<R: ProfessorRepository> GetProfessorUseCase<R> {
    /// The professor together with every course they are linked to.
    pub async fn execute(&self, id: i32) -> Result<ProfessorWithCourses, ApiError> {
        let professor = require_professor(&self.repo, id).await?;
        let courses = self.repo.courses(id).await?;
        Ok(ProfessorWithCourses { professor, courses })
    }

    pub async fn by_name(&self, name: &str) -> Result<Professor, ApiError> {
        self.repo
            .find_by_name(name.trim())
            .await?
            .ok_or(ApiError::ProfessorNotFound)
    }
}

// ── CreateProfessor / UpdateProfessor / DeleteProfessor ──────────────────────

pub struct CreateProfessorUseCase<R: ProfessorRepository> {
    pub repo: R,
}

impl<R: ProfessorRepository> CreateProfessorUseCase<R> {
    pub async fn execute(&self, input: ProfessorInput) -> Result<Professor, ApiError> {
        input.validate().map_err(ApiError::Validation)?;
        self.repo.create(&input).await
    }
}

pub struct UpdateProfessorUseCase<R: ProfessorRepository> {
    pub repo: R,
}

impl<R: ProfessorRepository> UpdateProfessorUseCase<R> {
    pub async fn execute(&self, id: i32, input: ProfessorInput) -> Result<Professor, ApiError> {
        input.validate().map_err(ApiError::Validation)?;
        self.repo.update(id, &input).await
    }
}

pub struct DeleteProfessorUseCase<R: ProfessorRepository> {
    pub repo: R,
}

impl<R: ProfessorRepository> DeleteProfessorUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), ApiError> {
        self.repo.delete(id).await
    }
}

// ── ProfessorCourses / ProfessorReviews ──────────────────────────────────────

pub struct ListProfessorCoursesUseCase<R: ProfessorRepository> {
    pub repo: R,
}

impl<R: ProfessorRepository> ListProfessorCoursesUseCase<R> {
    pub async fn execute(&self, professor_id: i32) -> Result<Vec<TaughtCourse>, ApiError> {
        require_professor(&self.repo, professor_id).await?;
        self.repo.courses(professor_id).await
    }
}

pub struct ListProfessorReviewsUseCase<P: ProfessorRepository, V: ReviewRepository> {
    pub professors: P,
    pub reviews: V,
}

impl<P: ProfessorRepository, V: ReviewRepository> ListProfessorReviewsUseCase<P, V> {
    pub async fn execute(&self, professor_id: i32) -> Result<Vec<Review>, ApiError> {
        require_professor(&self.professors, professor_id).await?;
        self.reviews.list_for_professor(professor_id).await
    }
}

// ── ProfessorStats ───────────────────────────────────────────────────────────

pub struct GetProfessorStatsUseCase<R: ProfessorRepository> {
    pub repo: R,
}

impl<R: ProfessorRepository> GetProfessorStatsUseCase<R> {
    pub async fn execute(&self) -> Result<ProfessorStats, ApiError> {
        self.repo.stats().await
    }
}

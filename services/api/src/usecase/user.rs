use crate::domain::repository::UserRepository;
use crate::domain::types::{
    AlumniEntry, AlumniProfile, AlumniProfileInput, ExternalProfile, ProfileUpdate, User,
    UserStats,
};
use crate::error::ApiError;

async fn require_user<R: UserRepository>(repo: &R, id: i32) -> Result<User, ApiError> {
    repo.find_by_id(id).await?.ok_or(ApiError::UserNotFound)
}

// ── FindOrCreateUser ─────────────────────────────────────────────────────────

pub struct FindOrCreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> FindOrCreateUserUseCase<R> {
    /// Sole entry point from the login provider, keyed on the provider's user id.
    /// A returning user gets `last_login` bumped; a new one is created.
    pub async fn execute(&self, profile: &ExternalProfile) -> Result<User, ApiError> {
        if let Some(user) = self.repo.find_by_external_id(&profile.id).await? {
            self.repo.update_last_login(user.id).await?;
            return require_user(&self.repo, user.id).await;
        }
        match self.repo.create(profile).await {
            // A concurrent first login for the same account won the insert.
            Err(ApiError::Duplicate(message)) => self
                .repo
                .find_by_external_id(&profile.id)
                .await?
                .ok_or(ApiError::Duplicate(message)),
            other => other,
        }
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<User, ApiError> {
        require_user(&self.repo, user_id).await
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(&self, user_id: i32, update: ProfileUpdate) -> Result<User, ApiError> {
        if update.is_empty() {
            return Err(ApiError::validation("no profile fields to update"));
        }
        self.repo.update_profile(user_id, &update).await
    }
}

// ── AlumniProfile ────────────────────────────────────────────────────────────

pub struct GetAlumniProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetAlumniProfileUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<AlumniProfile, ApiError> {
        self.repo
            .alumni_profile(user_id)
            .await?
            .ok_or(ApiError::AlumniProfileNotFound)
    }
}

pub struct UpsertAlumniProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpsertAlumniProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: i32,
        input: AlumniProfileInput,
    ) -> Result<AlumniProfile, ApiError> {
        self.repo.upsert_alumni_profile(user_id, &input).await
    }
}

pub struct ListAlumniUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListAlumniUseCase<R> {
    pub async fn execute(&self, mentorship_only: bool) -> Result<Vec<AlumniEntry>, ApiError> {
        self.repo.list_alumni(mentorship_only).await
    }
}

// ── Admin ────────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, ApiError> {
        self.repo.list_all().await
    }
}

pub struct GetUserStatsUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserStatsUseCase<R> {
    pub async fn execute(&self) -> Result<UserStats, ApiError> {
        self.repo.stats().await
    }
}

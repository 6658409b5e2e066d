use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use degreedash_auth_types::session::SessionUser;
use degreedash_domain::user::UserType;

use crate::domain::types::{AlumniProfile, AlumniProfileInput, ProfileUpdate, User, UserStats};
use crate::error::ApiError;
use crate::state::{AdminUser, AppState};
use crate::usecase::user::{
    GetAlumniProfileUseCase, GetUserStatsUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateProfileUseCase, UpsertAlumniProfileUseCase,
};

/// Public view of a user. The provider's external id is never exposed.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub user_type: UserType,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
    #[serde(serialize_with = "degreedash_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "degreedash_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            user_type: user.user_type,
            graduation_year: user.graduation_year,
            major: user.major,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(session.user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub user_type: Option<UserType>,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
}

pub async fn update_me(
    session: SessionUser,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            session.user_id,
            ProfileUpdate {
                user_type: body.user_type,
                graduation_year: body.graduation_year,
                major: body.major,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── GET /users/@me/alumni-profile ────────────────────────────────────────────

#[derive(Serialize)]
pub struct AlumniProfileResponse {
    pub user_id: i32,
    pub employer: Option<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub mentorship_available: bool,
    #[serde(serialize_with = "degreedash_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<AlumniProfile> for AlumniProfileResponse {
    fn from(p: AlumniProfile) -> Self {
        Self {
            user_id: p.user_id,
            employer: p.employer,
            title: p.title,
            industry: p.industry,
            mentorship_available: p.mentorship_available,
            updated_at: p.updated_at,
        }
    }
}

pub async fn get_alumni_profile(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<AlumniProfileResponse>, ApiError> {
    let usecase = GetAlumniProfileUseCase {
        repo: state.user_repo(),
    };
    let profile = usecase.execute(session.user_id).await?;
    Ok(Json(profile.into()))
}

// ── PUT /users/@me/alumni-profile ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AlumniProfileRequest {
    pub employer: Option<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    #[serde(default)]
    pub mentorship_available: bool,
}

pub async fn put_alumni_profile(
    session: SessionUser,
    State(state): State<AppState>,
    Json(body): Json<AlumniProfileRequest>,
) -> Result<Json<AlumniProfileResponse>, ApiError> {
    let usecase = UpsertAlumniProfileUseCase {
        repo: state.user_repo(),
    };
    let profile = usecase
        .execute(
            session.user_id,
            AlumniProfileInput {
                employer: body.employer,
                title: body.title,
                industry: body.industry,
                mentorship_available: body.mentorship_available,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/stats ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserStatsResponse {
    pub total_users: i64,
    pub current_students: i64,
    pub alumni: i64,
    pub mentors_available: i64,
    pub total_enrollments: i64,
    pub total_reviews: i64,
}

impl From<UserStats> for UserStatsResponse {
    fn from(s: UserStats) -> Self {
        Self {
            total_users: s.total_users,
            current_students: s.current_students,
            alumni: s.alumni,
            mentors_available: s.mentors_available,
            total_enrollments: s.total_enrollments,
            total_reviews: s.total_reviews,
        }
    }
}

pub async fn user_stats(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<UserStatsResponse>, ApiError> {
    let usecase = GetUserStatsUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use degreedash_auth_types::session::SessionUser;

use crate::domain::types::AlumniEntry;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::user::ListAlumniUseCase;

#[derive(Serialize)]
pub struct AlumniEntryResponse {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub graduation_year: Option<i32>,
    pub major: Option<String>,
    pub employer: Option<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub mentorship_available: bool,
}

impl From<AlumniEntry> for AlumniEntryResponse {
    fn from(a: AlumniEntry) -> Self {
        Self {
            user_id: a.user_id,
            name: a.name,
            email: a.email,
            avatar_url: a.avatar_url,
            graduation_year: a.graduation_year,
            major: a.major,
            employer: a.employer,
            title: a.title,
            industry: a.industry,
            mentorship_available: a.mentorship_available,
        }
    }
}

// ── GET /alumni ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AlumniQuery {
    #[serde(default)]
    pub mentorship: bool,
}

pub async fn list_alumni(
    _session: SessionUser,
    State(state): State<AppState>,
    Query(query): Query<AlumniQuery>,
) -> Result<Json<Vec<AlumniEntryResponse>>, ApiError> {
    let usecase = ListAlumniUseCase {
        repo: state.user_repo(),
    };
    let alumni = usecase.execute(query.mentorship).await?;
    Ok(Json(
        alumni.into_iter().map(AlumniEntryResponse::from).collect(),
    ))
}

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use degreedash_auth_types::cookie::{
    OAUTH_STATE_COOKIE, clear_oauth_state_cookie, clear_session_cookie, set_oauth_state_cookie,
    set_session_cookie,
};
use degreedash_auth_types::session::session_from_headers;
use degreedash_auth_types::token::issue_session_token;

use crate::error::ApiError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::auth::LoginUseCase;
use crate::usecase::user::GetUserUseCase;

// ── GET /auth/microsoft ──────────────────────────────────────────────────────

pub async fn microsoft_login(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let usecase = LoginUseCase {
        auth: state.oauth.clone(),
        users: state.user_repo(),
    };
    let redirect = usecase.start();
    let jar = set_oauth_state_cookie(jar, redirect.state, state.cookie_secure);
    (jar, Redirect::to(&redirect.url))
}

// ── GET /auth/microsoft/callback ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Every failure lands on the frontend root; success lands on `/home`.
pub async fn microsoft_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> impl IntoResponse {
    let expected = jar.get(OAUTH_STATE_COOKIE).map(|c| c.value().to_owned());
    let jar = clear_oauth_state_cookie(jar, state.cookie_secure);

    match finish_login(&state, query, expected.as_deref()).await {
        Ok(token) => {
            let jar = set_session_cookie(jar, token, state.cookie_secure);
            (jar, Redirect::to(&format!("{}/home", state.frontend_url)))
        }
        Err(e) => {
            tracing::warn!(kind = e.kind(), error = %e, "login failed");
            (jar, Redirect::to(&state.frontend_url))
        }
    }
}

async fn finish_login(
    state: &AppState,
    query: CallbackQuery,
    expected_state: Option<&str>,
) -> Result<String, ApiError> {
    if let Some(error) = query.error {
        return Err(ApiError::OAuthProvider(error));
    }
    let code = query
        .code
        .ok_or_else(|| ApiError::validation("missing authorization code"))?;
    let returned_state = query.state.ok_or(ApiError::InvalidOAuthState)?;
    let usecase = LoginUseCase {
        auth: state.oauth.clone(),
        users: state.user_repo(),
    };
    let user = usecase
        .complete(&code, &returned_state, expected_state)
        .await?;
    issue_session_token(user.id, &user.email, &state.session_secret)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e).context("issue session token")))
}

// ── GET /auth/status ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

pub async fn status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthStatusResponse>, ApiError> {
    let Ok(session) = session_from_headers(&headers, &state.session_secret) else {
        return Ok(Json(AuthStatusResponse {
            is_authenticated: false,
            user: None,
        }));
    };
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = match usecase.execute(session.user_id).await {
        Ok(user) => Some(user),
        // Token outlived its account.
        Err(ApiError::UserNotFound) => None,
        Err(e) => return Err(e),
    };
    Ok(Json(AuthStatusResponse {
        is_authenticated: user.is_some(),
        user: user.map(UserResponse::from),
    }))
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.cookie_secure);
    (
        jar,
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    )
}

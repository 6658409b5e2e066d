use tracing::info;
use uuid::Uuid;

use crate::domain::repository::{ExternalAuthPort, UserRepository};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::usecase::user::FindOrCreateUserUseCase;

/// Where to send the browser, plus the CSRF `state` to remember in a cookie.
pub struct LoginRedirect {
    pub state: String,
    pub url: String,
}

pub struct LoginUseCase<A: ExternalAuthPort, U: UserRepository> {
    pub auth: A,
    pub users: U,
}

impl<A: ExternalAuthPort, U: UserRepository> LoginUseCase<A, U> {
    pub fn start(&self) -> LoginRedirect {
        let state = Uuid::new_v4().to_string();
        let url = self.auth.authorize_url(&state);
        LoginRedirect { state, url }
    }

    /// Verify `state`, exchange `code` and resolve the local user.
    pub async fn complete(
        self,
        code: &str,
        state: &str,
        expected_state: Option<&str>,
    ) -> Result<User, ApiError> {
        if expected_state != Some(state) {
            return Err(ApiError::InvalidOAuthState);
        }
        let profile = self.auth.fetch_profile(code).await?;
        let user = FindOrCreateUserUseCase { repo: self.users }
            .execute(&profile)
            .await?;
        info!(user_id = user.id, "login");
        Ok(user)
    }
}

//! Microsoft identity platform client (authorization-code flow + Graph `/me`).

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use url::form_urlencoded;

use crate::config::ApiConfig;
use crate::domain::repository::ExternalAuthPort;
use crate::domain::types::ExternalProfile;
use crate::error::ApiError;

const AUTHORITY: &str = "https://login.microsoftonline.com";
const GRAPH_ME: &str = "https://graph.microsoft.com/v1.0/me";
const SCOPE: &str = "user.read";

#[derive(Clone)]
pub struct MicrosoftOAuthClient {
    pub http: reqwest::Client,
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
    pub tenant: String,
}

impl MicrosoftOAuthClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.microsoft_client_id.clone(),
            client_secret: config.microsoft_client_secret.clone(),
            callback_url: config.microsoft_callback_url.clone(),
            tenant: config.microsoft_tenant.clone(),
        }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{AUTHORITY}/{}/oauth2/v2.0/{name}", self.tenant)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, ApiError> {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret)
            .append_pair("code", code)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("grant_type", "authorization_code")
            .append_pair("scope", SCOPE)
            .finish();
        let resp = self
            .http
            .post(self.endpoint("token"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::OAuthProvider(format!("token request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(ApiError::OAuthProvider(format!(
                "token endpoint returned {}",
                resp.status()
            )));
        }
        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::OAuthProvider(format!("invalid token response: {e}")))?;
        Ok(token.access_token)
    }
}

impl ExternalAuthPort for MicrosoftOAuthClient {
    fn authorize_url(&self, state: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("response_mode", "query")
            .append_pair("scope", SCOPE)
            .append_pair("state", state)
            .append_pair("prompt", "select_account")
            .finish();
        format!("{}?{query}", self.endpoint("authorize"))
    }

    async fn fetch_profile(&self, code: &str) -> Result<ExternalProfile, ApiError> {
        let access_token = self.exchange_code(code).await?;
        let resp = self
            .http
            .get(GRAPH_ME)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ApiError::OAuthProvider(format!("profile request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(ApiError::OAuthProvider(format!(
                "profile endpoint returned {}",
                resp.status()
            )));
        }
        let me: GraphUser = resp
            .json()
            .await
            .map_err(|e| ApiError::OAuthProvider(format!("invalid profile response: {e}")))?;
        profile_from_graph(me)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Subset of the Graph `user` resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphUser {
    pub id: String,
    pub display_name: Option<String>,
    pub mail: Option<String>,
    pub user_principal_name: Option<String>,
}

/// Normalise a Graph user. Personal accounts often lack `mail`, so fall back to the UPN.
pub fn profile_from_graph(user: GraphUser) -> Result<ExternalProfile, ApiError> {
    let email = user
        .mail
        .or(user.user_principal_name)
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::validation("microsoft account has no email address"))?;
    let display_name = user
        .display_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| email.clone());
    Ok(ExternalProfile {
        id: user.id,
        email,
        display_name,
        avatar_url: None,
    })
}

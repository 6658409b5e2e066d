use serde::Deserialize;

use degreedash_core::config::Config;

/// API service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// SQLite connection URL.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// TCP port for the HTTP server (default 5050).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Browser origin allowed by CORS; also the post-login redirect base.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// HMAC secret for signing session tokens.
    pub session_secret: String,
    /// Mark cookies `Secure` (enable behind HTTPS).
    #[serde(default)]
    pub cookie_secure: bool,
    /// Comma-separated emails allowed to use the admin routes.
    #[serde(default)]
    pub admin_emails: Vec<String>,
    pub microsoft_client_id: String,
    pub microsoft_client_secret: String,
    pub microsoft_callback_url: String,
    #[serde(default = "default_microsoft_tenant")]
    pub microsoft_tenant: String,
}

impl Config for ApiConfig {}

fn default_database_url() -> String {
    "sqlite://degreedash.db?mode=rwc".to_owned()
}

fn default_port() -> u16 {
    5050
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_owned()
}

fn default_microsoft_tenant() -> String {
    "common".to_owned()
}

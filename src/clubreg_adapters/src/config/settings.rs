use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use clubreg_core::SESSION_TOKEN_TTL_SECONDS;

use super::constants;

/// Service configuration, loaded from an optional `config.json` next to the
/// binary with `CLUBREG_`-prefixed environment overrides on top
/// (`CLUBREG_AUTH__JWT_SECRET`, section and key separated by `__`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub address: String,
    pub allowed_origins: Option<AllowedOrigins>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.address", constants::prod::APP_ADDRESS)?
            .set_default("auth.token_ttl_in_seconds", SESSION_TOKEN_TTL_SECONDS)?
            .set_default(
                "email_client.base_url",
                constants::prod::email_client::BASE_URL,
            )?
            .set_default("email_client.sender", constants::prod::email_client::SENDER)?
            .set_default(
                "email_client.timeout_in_millis",
                constants::prod::email_client::TIMEOUT_MILLIS,
            )?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("CLUBREG").separator("__"))
            .build()?
            .try_deserialize()
    }
}

/// CORS allow-list for browser clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

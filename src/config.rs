use crate::api::DEFAULT_API_URL;
use anyhow::{Context, Result};

/// Variable d'environnement portant le token API.
pub const TOKEN_VAR: &str = "PAGERDUTY_API_TOKEN";
/// Variable optionnelle pour rediriger l'API (tests, proxys).
pub const API_URL_VAR: &str = "PAGERDUTY_API_URL";

/// Configuration lue une fois au démarrage du process.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_VAR)
            .with_context(|| format!("{TOKEN_VAR} must be set (scheduling API token)"))?;
        let api_url =
            std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Ok(Self { token, api_url })
    }
}

pub mod profiles;

use dotenvy::dotenv;
use profiles::{Profile, ProfileDefaults};
use secrecy::SecretString;
use std::env;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(anyhow::anyhow!("LOG_FORMAT must be 'text' or 'json', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub stripe_api_base: String,
    pub stripe_secret_key: Arc<SecretString>,
    pub stripe_publishable_key: String,
    pub stripe_api_version: String,
    pub connect_account_country: String,
    pub account_link_refresh_url: String,
    pub account_link_return_url: String,
    pub cors_allowed_origins: Option<String>,
    pub log_format: LogFormat,
    pub http_timeout: Duration,
}

pub struct ConfigInfo {
    pub config: Config,
    pub profile: Profile,
    pub overrides: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<ConfigInfo> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<ConfigInfo>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = lookup("APP_PROFILE")
            .and_then(|v| Profile::parse(&v))
            .unwrap_or(Profile::Development);
        let defaults = ProfileDefaults::for_profile(profile);
        let mut overrides = Vec::new();

        let mut var = |key: &str| {
            let value = lookup(key).filter(|v| !v.trim().is_empty());
            if value.is_some() {
                overrides.push(key.to_string());
            }
            value
        };

        let stripe_secret_key = var("STRIPE_SECRET_KEY")
            .ok_or_else(|| anyhow::anyhow!("STRIPE_SECRET_KEY must be set"))?;

        let server_port = match var("SERVER_PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a port number, got '{}'", v))?,
            None => defaults.server_port,
        };

        let http_timeout = match var("HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse().map_err(|_| {
                anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{}'", v)
            })?),
            None => Duration::from_secs(80),
        };

        let log_format = match var("LOG_FORMAT") {
            Some(v) => LogFormat::parse(&v)?,
            None => LogFormat::Text,
        };

        let config = Config {
            server_port,
            stripe_api_base: var("STRIPE_API_BASE").unwrap_or(defaults.stripe_api_base),
            stripe_secret_key: Arc::new(SecretString::new(stripe_secret_key.into())),
            stripe_publishable_key: var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default(),
            stripe_api_version: var("STRIPE_API_VERSION")
                .unwrap_or_else(|| "2023-10-16".to_string()),
            connect_account_country: var("CONNECT_ACCOUNT_COUNTRY")
                .unwrap_or_else(|| "MY".to_string()),
            account_link_refresh_url: var("ACCOUNT_LINK_REFRESH_URL")
                .unwrap_or(defaults.account_link_refresh_url),
            account_link_return_url: var("ACCOUNT_LINK_RETURN_URL")
                .unwrap_or(defaults.account_link_return_url),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS").or(defaults.cors_allowed_origins),
            log_format,
            http_timeout,
        };

        Ok(ConfigInfo {
            config,
            profile,
            overrides,
        })
    }

    /// Origins accepted by the CORS layer; `None` means any origin.
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        self.cors_allowed_origins.as_ref().map(|origins| {
            origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect()
        })
    }
}

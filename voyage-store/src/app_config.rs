use secrecy::Secret;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub stripe: StripeSettings,
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Payment provider credentials and tuning.
///
/// Empty secrets are valid configuration: checkout and webhook
/// verification then degrade to explicit request-time errors instead of
/// failing at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct StripeSettings {
    #[serde(default = "empty_secret")]
    pub secret_key: Secret<String>,
    #[serde(default = "empty_secret")]
    pub webhook_secret: Secret<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Public base URL the provider redirects back to.
    pub base_url: String,
    pub name: String,
    pub noreply_email: String,
    /// Where operator notices for bookings and contact forms go.
    pub operator_email: String,
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_api_base_url() -> String {
    "https://api.stripe.com/v1".to_string()
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Per-environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables, e.g. `VOYAGE__STRIPE__SECRET_KEY`
            .add_source(config::Environment::with_prefix("VOYAGE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

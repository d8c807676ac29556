use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

use crate::{error::ConfigError, providers::Provider};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub mailgun_domain: String,
    pub mailgun_api_key: String,
    #[serde(default = "default_mailgun_api_url")]
    pub mailgun_api_url: String,
    pub sendgrid_api_key: String,
    #[serde(default = "default_sendgrid_api_url")]
    pub sendgrid_api_url: String,
    #[serde(default)]
    pub default_email_provider: Provider,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds; the HTTP client default applies when unset
    #[serde(default)]
    pub request_timeout: Option<u64>,
}

fn default_mailgun_api_url() -> String {
    "https://api.mailgun.net/v3".to_string()
}

fn default_sendgrid_api_url() -> String {
    "https://api.sendgrid.com/v3".to_string()
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_port() -> u16 {
    8000
}

impl Config {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(contents).map_err(Into::into)
    }

    pub fn from_env_iter<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars).map_err(Into::into)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path = env::var("EMAIL_RELAY_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return Config::from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return Config::from_file("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return Config::from_file("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    let config = Config::from_env_iter(env::vars())?;
    tracing::info!("Successfully loaded configuration from environment variables");
    Ok(config)
}

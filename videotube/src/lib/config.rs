use std::env;

use auth::AuthConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Single origin allowed to make credentialed cross-origin requests.
    pub cors_origin: String,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Set the `Secure` attribute on session cookies.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_body_limit_bytes() -> usize {
    16 * 1024
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__ACCESS_TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

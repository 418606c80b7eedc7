use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    #[serde(default)]
    pub health: HealthSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HealthSettings {
    /// Upper bound for any single check inside one report.
    #[serde(default = "default_check_timeout_ms")]
    pub check_timeout_ms: u64,
    #[serde(default = "default_dependency_timeout_ms")]
    pub database_timeout_ms: u64,
    /// How long `/health/ready` answers 503 before the server stops.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
    #[serde(default)]
    pub dependencies: Vec<HttpDependencySettings>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HttpDependencySettings {
    pub name: String,
    pub url: String,
    #[serde(default = "default_dependency_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_check_timeout_ms() -> u64 {
    5000
}

fn default_dependency_timeout_ms() -> u64 {
    2000
}

fn default_shutdown_grace_secs() -> u64 {
    5
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            check_timeout_ms: default_check_timeout_ms(),
            database_timeout_ms: default_dependency_timeout_ms(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
            dependencies: Vec::new(),
        }
    }
}

impl HealthSettings {
    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }

    pub fn database_timeout(&self) -> Duration {
        Duration::from_millis(self.database_timeout_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl HttpDependencySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database_name)
            .ssl_mode(PgSslMode::Prefer)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // `configuration.yaml` first, then APP__* environment variables on top,
    // e.g. APP__DATABASE__HOST=db
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

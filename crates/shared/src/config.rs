//! Layered application configuration.
//!
//! Values come from `config/default.toml`, then `config/{RUN_MODE}.toml`,
//! then `MONETA__*` environment variables, each layer overriding the last.

use serde::Deserialize;

/// Top-level configuration for the whole service.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Postgres connection settings.
    pub database: DatabaseSettings,
    /// Token signing settings.
    pub jwt: JwtSettings,
}

/// Where the HTTP server binds.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Bind address.
    #[serde(default = "default_bind_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_bind_port")]
    pub port: u16,
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

/// Postgres pool settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_pool_max")]
    pub max_connections: u32,
    /// Connections kept open when idle.
    #[serde(default = "default_pool_min")]
    pub min_connections: u32,
}

fn default_pool_max() -> u32 {
    10
}

fn default_pool_min() -> u32 {
    1
}

/// Settings for the token service.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token lifetime in minutes.
    #[serde(default = "default_access_minutes")]
    pub access_token_expires_minutes: i64,
    /// Refresh token lifetime in days.
    #[serde(default = "default_refresh_days")]
    pub refresh_token_expires_days: i64,
}

fn default_access_minutes() -> i64 {
    15
}

fn default_refresh_days() -> i64 {
    7
}

impl AppConfig {
    /// Loads and merges all configuration layers.
    ///
    /// Nested keys use `__` in environment variables, e.g.
    /// `MONETA__DATABASE__URL`. `RUN_MODE` defaults to `development`.
    ///
    /// # Errors
    ///
    /// Returns an error when a layer fails to parse or a required key
    /// (such as `database.url`) is missing from every layer.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MONETA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("MONETA__SERVER__HOST", Some("127.0.0.1")),
                ("MONETA__DATABASE__URL", Some("postgres://localhost/moneta_test")),
                ("MONETA__JWT__SECRET", Some("test-secret")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.host, "127.0.0.1");
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.database.url, "postgres://localhost/moneta_test");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.jwt.secret, "test-secret");
                assert_eq!(config.jwt.access_token_expires_minutes, 15);
                assert_eq!(config.jwt.refresh_token_expires_days, 7);
            },
        );
    }

    #[test]
    fn test_environment_overrides_defaults() {
        temp_env::with_vars(
            [
                ("MONETA__SERVER__HOST", Some("0.0.0.0")),
                ("MONETA__SERVER__PORT", Some("3001")),
                ("MONETA__DATABASE__URL", Some("postgres://localhost/moneta_test")),
                ("MONETA__DATABASE__MAX_CONNECTIONS", Some("25")),
                ("MONETA__JWT__SECRET", Some("another-secret")),
                ("MONETA__JWT__ACCESS_TOKEN_EXPIRES_MINUTES", Some("10")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 3001);
                assert_eq!(config.database.max_connections, 25);
                assert_eq!(config.jwt.access_token_expires_minutes, 10);
            },
        );
    }
}

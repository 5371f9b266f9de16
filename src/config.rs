//! Configuration management for the Local Library server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::Path};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Run mode; error details are only shown to clients in `development`
    pub environment: String,
    /// Directory served under `/public`
    pub static_dir: String,
}

impl ServerConfig {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub url: String,
    /// Database used when the connection string does not name one
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_minute: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Load with the configuration files looked up in `dir`; any file or
    /// field that is missing keeps its built-in default
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::from(dir.join("default")).required(false))
            // Layer on the environment-specific file
            .add_source(File::from(dir.join(&run_mode)).required(false))
            .set_default("server.environment", run_mode.as_str())?
            // Add environment variables (e.g. LIBRARY_SERVER__PORT)
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // The document store connection string wins over everything else
            .set_override_option("database.url", env::var("MONGODB_URI").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            static_dir: "public".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://127.0.0.1:27017".to_string(),
            name: "local_library".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_minute: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.server.is_development());
        assert_eq!(config.rate_limit.requests_per_minute, 20);
        assert_eq!(config.database.name, "local_library");
    }

    #[test]
    fn test_environment_is_case_insensitive() {
        let server = ServerConfig {
            environment: "Development".to_string(),
            ..ServerConfig::default()
        };
        assert!(server.is_development());

        let server = ServerConfig {
            environment: "production".to_string(),
            ..ServerConfig::default()
        };
        assert!(!server.is_development());
    }

    #[test]
    fn test_load_layers_file_and_connection_string() {
        let missing = env::temp_dir().join(format!("local-library-none-{}", std::process::id()));
        let partial = env::temp_dir().join(format!("local-library-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&partial).unwrap();
        std::fs::write(
            partial.join("default.toml"),
            "[server]\nport = 8080\n\n[rate_limit]\nenabled = false\n",
        )
        .unwrap();

        env::set_var("MONGODB_URI", "mongodb://db:27017/library");

        let config = AppConfig::load_from(&missing).unwrap();
        assert_eq!(config.database.url, "mongodb://db:27017/library");
        assert_eq!(config.database.name, "local_library");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.rate_limit.enabled);

        let config = AppConfig::load_from(&partial).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, "public");
        assert!(!config.rate_limit.enabled);
        assert_eq!(config.rate_limit.requests_per_minute, 20);
        assert_eq!(config.database.url, "mongodb://db:27017/library");

        env::remove_var("MONGODB_URI");
        std::fs::remove_dir_all(&partial).ok();
    }
}

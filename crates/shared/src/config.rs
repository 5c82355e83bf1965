//! Application configuration management.

use chrono_tz::Tz;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Report defaults.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Defaults applied to every report request.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// IANA timezone used to decide what "today" is.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Reporting framework used when a request does not name one.
    #[serde(default)]
    pub default_reporting_framework: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            default_reporting_framework: None,
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl ReportConfig {
    /// Parses the configured timezone, falling back to UTC when it is unknown.
    ///
    /// `AppConfig::load` rejects unknown timezones, so the fallback only
    /// applies to hand-built configs.
    #[must_use]
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(Tz::UTC)
    }

    /// Checks that the timezone is a known IANA name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the unknown timezone.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map(|_| ())
            .map_err(|_| {
                config::ConfigError::Message(format!(
                    "report.timezone: unknown timezone {:?}",
                    self.timezone
                ))
            })
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERVIEW").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.report.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("LEDGERVIEW__DATABASE__URL", Some("postgres://localhost/ledgerview")),
                ("LEDGERVIEW__SERVER__PORT", Some("9090")),
                ("LEDGERVIEW__REPORT__TIMEZONE", Some("Africa/Accra")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "postgres://localhost/ledgerview");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.report.tz(), Tz::Africa__Accra);
                assert!(config.report.default_reporting_framework.is_none());
            },
        );
    }

    #[test]
    fn test_load_rejects_unknown_timezone() {
        temp_env::with_vars(
            [
                ("LEDGERVIEW__DATABASE__URL", Some("postgres://localhost/ledgerview")),
                ("LEDGERVIEW__REPORT__TIMEZONE", Some("Europe/Lodnon")),
            ],
            || {
                let err = AppConfig::load().unwrap_err();
                assert!(err.to_string().contains("Europe/Lodnon"));
            },
        );
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let report = ReportConfig {
            timezone: "Mars/Olympus".to_string(),
            default_reporting_framework: None,
        };
        assert_eq!(report.tz(), Tz::UTC);
    }
}

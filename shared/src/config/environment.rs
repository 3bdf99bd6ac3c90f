//! Environment detection and logging configuration

use serde::{Deserialize, Serialize};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl Environment {
    /// Detect the environment from the `EKYC_ENV` variable
    ///
    /// Unknown or missing values fall back to `Development`.
    pub fn from_env() -> Self {
        match std::env::var("EKYC_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") => Environment::Staging,
            _ => Environment::Development,
        }
    }

    /// Whether this is a production deployment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Tracing filter directive (e.g. "info", "ekyc_core=debug")
    pub filter: String,

    /// Whether to emit logs as JSON
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: String::from("info"),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Recommended logging configuration for an environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                filter: String::from("debug"),
                json: false,
            },
            Environment::Staging => Self {
                filter: String::from("info"),
                json: true,
            },
            Environment::Production => Self {
                filter: String::from("info"),
                json: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_default() {
        assert_eq!(Environment::default(), Environment::Development);
        assert!(!Environment::Development.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_logging_for_environment() {
        let dev = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev.filter, "debug");
        assert!(!dev.json);

        let prod = LoggingConfig::for_environment(Environment::Production);
        assert!(prod.json);
    }
}

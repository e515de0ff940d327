//! API server configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use inkpress_shared_config::{CommonConfig, Environment};

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode, `DATABASE_URL` must be explicitly set; the
    /// development default carries credentials that must never reach a real
    /// deployment. In development/staging mode, defaults are used for
    /// convenience.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        )
        .unwrap_or_default();

        if environment.is_production() {
            Self::validate_database_url()?;
        }

        let common =
            CommonConfig::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }

    /// Require an explicit DATABASE_URL in production
    fn validate_database_url() -> Result<()> {
        match env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => Ok(()),
            _ => bail!(
                "DATABASE_URL environment variable is required in production. \
                 The built-in development default must not be used."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_development() {
        temp_env::with_vars(
            [
                ("ENVIRONMENT", None::<&str>),
                ("PORT", None),
                ("DATABASE_URL", None),
                ("CORS_ORIGINS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.port, 8080);
                assert!(!config.is_production());
                assert!(config.cors_allowed_origins.is_none());
            },
        );
    }

    #[test]
    fn test_production_requires_database_url() {
        temp_env::with_vars(
            [
                ("ENVIRONMENT", Some("production")),
                ("DATABASE_URL", None::<&str>),
            ],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        temp_env::with_vars(
            [
                ("ENVIRONMENT", None::<&str>),
                (
                    "CORS_ORIGINS",
                    Some("https://a.example, https://b.example ,"),
                ),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(
                    config.cors_allowed_origins,
                    Some(vec![
                        "https://a.example".to_string(),
                        "https://b.example".to_string()
                    ])
                );
            },
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        temp_env::with_vars(
            [("ENVIRONMENT", None::<&str>), ("PORT", Some("not-a-port"))],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}

//! Configuration module
//!
//! Configuration is loaded from the environment exactly once at process start.
//! The parsed [`Environment`] is threaded into the error classifier and the
//! logging setup rather than re-read from `std::env` at call sites, so both
//! stay deterministic functions of their inputs.

use std::env;

// Common defaults
const SERVER_PORT: u16 = 8000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const REQUEST_BODY_LIMIT_BYTES: usize = 1024 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const ACCESS_LOG_FILE: &str = "logs/access.log";

/// Deployment environment, parsed once at startup.
///
/// Gates two behaviors: whether error responses carry a `debug` block, and
/// whether request logging writes to a file or to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse an environment name. `"production"` and `"prod"` (any case) are
    /// production; everything else is treated as development.
    pub fn parse(value: &str) -> Self {
        let value = value.to_lowercase();
        if value == "production" || value == "prod" {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub cors_origins: Vec<String>,
    pub environment: Environment,
    /// Where request/error logs go when running in production.
    pub log_file: String,
    pub request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = Environment::parse(
            &env::var("ENVIRONMENT")
                .or_else(|_| env::var("APP_ENV"))
                .unwrap_or_else(|_| "development".to_string()),
        );

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            cors_origins,
            environment,
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| ACCESS_LOG_FILE.to_string()),
            request_body_limit_bytes: env::var("REQUEST_BODY_LIMIT_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(REQUEST_BODY_LIMIT_BYTES),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        if self.cors_origins.is_empty() {
            return Err(anyhow::anyhow!("CORS_ORIGINS must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(environment: Environment, cors_origins: Vec<&str>) -> Config {
        Config {
            server_port: 8000,
            database_url: "postgres://localhost/taskboard".to_string(),
            db_max_connections: MAX_CONNECTIONS,
            db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
            cors_origins: cors_origins.into_iter().map(String::from).collect(),
            environment,
            log_file: ACCESS_LOG_FILE.to_string(),
            request_body_limit_bytes: REQUEST_BODY_LIMIT_BYTES,
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
        }
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("PROD"), Environment::Production);
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert_eq!(Environment::parse(""), Environment::Development);
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let config = config_with(Environment::Production, vec!["*"]);
        assert!(config.validate().is_err());

        let config = config_with(Environment::Production, vec!["https://app.example.com"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wildcard_cors_allowed_in_development() {
        let config = config_with(Environment::Development, vec!["*"]);
        assert!(config.validate().is_ok());
    }
}

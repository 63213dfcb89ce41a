// ABOUTME: Environment-based runtime configuration for database, bridge, and logging
// ABOUTME: Every setting has a sensible default so the engine runs with an empty environment
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 FitFrame.dev

//! Environment-driven server configuration

use crate::constants::bridge;
use crate::logging::LoggingConfig;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development
    Development,
    /// Production deployment
    Production,
    /// Automated testing
    Testing,
}

impl Environment {
    /// Parse an environment name, defaulting to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Whether this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// External computation collaborator configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Command to spawn for each exchange; `None` selects the in-process engine
    pub command: Option<String>,
    /// Arguments passed to the command
    pub args: Vec<String>,
    /// Bound on a single request/response exchange
    pub timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            timeout: Duration::from_secs(bridge::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection URL
    pub database_url: String,
    /// Compute bridge settings
    pub bridge: BridgeConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Recognized variables: `DATABASE_URL`, `BRIDGE_COMMAND`, `BRIDGE_ARGS`
    /// (whitespace-separated), `BRIDGE_TIMEOUT_SECS`, `LOG_LEVEL`,
    /// `LOG_FORMAT`, `ENVIRONMENT`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable fails to parse.
    pub fn from_env() -> Result<Self> {
        let timeout_secs: u64 = env_var_or(
            "BRIDGE_TIMEOUT_SECS",
            &bridge::DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .context("BRIDGE_TIMEOUT_SECS must be a positive integer")?;

        let command = env::var("BRIDGE_COMMAND")
            .ok()
            .filter(|c| !c.trim().is_empty());
        let args = env::var("BRIDGE_ARGS")
            .map(|raw| raw.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default();

        Ok(Self {
            database_url: env_var_or("DATABASE_URL", "sqlite:./data/fitframe.db"),
            bridge: BridgeConfig {
                command,
                args,
                timeout: Duration::from_secs(timeout_secs),
            },
            logging: LoggingConfig::from_env(),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
        })
    }
}

/// Read an environment variable with a default fallback
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

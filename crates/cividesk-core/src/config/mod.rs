//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. The merged configuration is built once at startup, validated,
//! and passed explicitly into the components that need it.

pub mod approval;
pub mod auth;
pub mod database;
pub mod logging;
pub mod ownership;
pub mod server;

use serde::{Deserialize, Serialize};

use self::approval::ApprovalConfig;
use self::auth::AuthConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::ownership::OwnershipConfig;
use self::server::ServerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (default.toml + environment overlay + `CIVIDESK__` env vars).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Approval notification settings.
    #[serde(default)]
    pub approval: ApprovalConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Ownership registry for single-record routes.
    #[serde(default)]
    pub ownership: OwnershipConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CIVIDESK`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CIVIDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Validate the loaded configuration.
    ///
    /// An absent or short signing secret and a malformed ownership registry
    /// are fatal startup conditions, never per-request errors.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        self.ownership.validate()?;
        Ok(())
    }
}

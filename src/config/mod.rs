//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `HONEYPOT` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use scam_honeypot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Turn cap: {}", config.engagement.max_turns);
//! ```

mod ai;
mod engagement;
mod error;
mod runtime;
mod storage;

pub use ai::AiConfig;
pub use engagement::EngagementConfig;
pub use error::{ConfigError, ValidationError};
pub use runtime::{Environment, RuntimeConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration. Every section has defaults, so an empty
/// environment yields a working offline honeypot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Environment and log filter
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Turn cap and context window
    #[serde(default)]
    pub engagement: EngagementConfig,

    /// Where conversation records are kept
    #[serde(default)]
    pub storage: StorageConfig,

    /// Optional language model
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HONEYPOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `HONEYPOT__ENGAGEMENT__MAX_TURNS=20` -> `engagement.max_turns = 20`
    /// - `HONEYPOT__AI__API_KEY=...` -> `ai.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HONEYPOT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.runtime.validate()?;
        self.engagement.validate()?;
        self.storage.validate()?;
        self.ai.validate(self.is_production())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}

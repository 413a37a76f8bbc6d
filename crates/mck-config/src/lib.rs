//! # mck-config
//!
//! Layered configuration loading for mindcheck using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. `API_BASE_URL` (compatibility override for the API root only)
//! 2. Environment variables (`MINDCHECK_*` prefix, `__` as separator)
//! 3. Project-level `.mindcheck/config.toml`
//! 4. User-level `~/.config/mindcheck/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MINDCHECK_API__BASE_URL` -> `api.base_url`,
//! `MINDCHECK_API__TIMEOUT_SECS` -> `api.timeout_secs`, etc. The `__`
//! (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use mck_config::MckConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = MckConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = MckConfig::load().expect("config");
//!
//! println!("API root: {}", config.api.base_url);
//! ```

mod api;
mod error;

pub use api::ApiConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MckConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

impl MckConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. `API_BASE_URL` (API root only)
    /// 2. Environment variables (`MINDCHECK_*` prefix)
    /// 3. `.mindcheck/config.toml` (project-local)
    /// 4. `~/.config/mindcheck/config.toml` (user-global)
    /// 5. Default values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a field value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a field value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".mindcheck/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed("MINDCHECK_").split("__"));

        // Layer 4: API_BASE_URL compatibility override (highest priority)
        if let Ok(url) = std::env::var("API_BASE_URL") {
            if !url.is_empty() {
                figment = figment.merge(("api.base_url", url));
            }
        }

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mindcheck").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        // In tests/build: CARGO_MANIFEST_DIR points to the crate dir.
        // Walk up to find workspace root's .env.
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

//! # mw-config
//!
//! Layered configuration loading for meshwatch using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MESHWATCH_*` prefix, `__` as separator)
//! 2. Project-level `.meshwatch/config.toml`
//! 3. User-level `~/.config/meshwatch/config.toml`
//! 4. Built-in defaults
//!
//! `MESHWATCH_CONSENSUS__SENTINEL` maps to `consensus.sentinel`,
//! `MESHWATCH_CLASSIFY__PARALLEL` to `classify.parallel`, and so on.
//!
//! ```toml
//! [consensus.profiles.ooni]
//! key_column = "input"
//! status_column = "accessible"
//! blocked = { kind = "false_like" }
//!
//! [report]
//! dns_key = "Dominio"
//! ```

mod classify;
mod consensus;
mod error;

pub use classify::ClassifyConfig;
pub use consensus::{ConsensusConfig, ProfileConfig};
pub use error::ConfigError;
pub use mw_report::ReportColumns;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use mw_core::CellValue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MeshConfig {
    #[serde(default)]
    pub consensus: ConsensusConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub report: ReportColumns,
}

impl MeshConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`load_with_dotenv`](Self::load_with_dotenv)
    /// for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or any
    /// error from [`validate`](Self::validate).
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory first, then [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".meshwatch/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("MESHWATCH_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("meshwatch").join("config.toml"))
    }

    /// Look up a consensus profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProfile`] listing the configured names.
    pub fn profile(&self, name: &str) -> Result<&ProfileConfig, ConfigError> {
        self.consensus
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: name.to_string(),
                available: self
                    .consensus
                    .profiles
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Reject values that would make a run meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sentinel = self.consensus.sentinel.trim();
        if sentinel.is_empty() {
            return Err(invalid("consensus.sentinel", "must not be empty"));
        }

        for (name, profile) in &self.consensus.profiles {
            if profile.key_column.trim().is_empty() {
                return Err(invalid(
                    &format!("consensus.profiles.{name}.key_column"),
                    "must not be empty",
                ));
            }
            if profile.status_column.trim().is_empty() {
                return Err(invalid(
                    &format!("consensus.profiles.{name}.status_column"),
                    "must not be empty",
                ));
            }
            if profile.blocked.matches(&CellValue::from(sentinel)) {
                return Err(invalid(
                    &format!("consensus.profiles.{name}.blocked"),
                    "policy would match the sentinel status",
                ));
            }
        }

        if self.classify.url_column.trim().is_empty() {
            return Err(invalid("classify.url_column", "must not be empty"));
        }

        for (field, column) in self.report.named() {
            if column.trim().is_empty() {
                return Err(invalid(&format!("report.{field}"), "must not be empty"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

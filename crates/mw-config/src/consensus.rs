//! Consensus marking configuration.

use std::collections::BTreeMap;

use mw_core::{BlockedPolicy, SENTINEL_STATUS};
use serde::{Deserialize, Serialize};

fn default_sentinel() -> String {
    SENTINEL_STATUS.to_string()
}

/// Where a kind of source table keeps its key and status, and how it says
/// "blocked".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfileConfig {
    pub key_column: String,
    pub status_column: String,
    pub blocked: BlockedPolicy,
}

impl ProfileConfig {
    /// DNS dig tables: `Dominio`, `Bloqueado = Sí`.
    #[must_use]
    pub fn dns() -> Self {
        Self {
            key_column: "Dominio".into(),
            status_column: "Bloqueado".into(),
            blocked: BlockedPolicy::equals("Sí"),
        }
    }

    /// Web-connectivity tables: `input`, `accessible = false`.
    #[must_use]
    pub fn web() -> Self {
        Self {
            key_column: "input".into(),
            status_column: "accessible".into(),
            blocked: BlockedPolicy::FalseLike,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsensusConfig {
    /// Status written over consensus-blocked rows.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    #[serde(default = "default_profiles")]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

fn default_profiles() -> BTreeMap<String, ProfileConfig> {
    BTreeMap::from([
        ("dns".to_string(), ProfileConfig::dns()),
        ("web".to_string(), ProfileConfig::web()),
    ])
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
            profiles: default_profiles(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ConsensusConfig::default();
        assert_eq!(config.sentinel, "NOACCESIBLEPORMETODO");
        assert_eq!(config.profiles["dns"].status_column, "Bloqueado");
        assert_eq!(config.profiles["web"].blocked, BlockedPolicy::FalseLike);
    }
}

//! Process-level settings that influence descriptor construction.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings loaded from a JSON document. Unknown keys are ignored and every
/// field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CairnConfig {
    /// Record sequence id transitions of the meta region in a `historian`
    /// family of the root table.
    #[serde(rename = "metaregion.seqid.record.enabled")]
    pub metaregion_seqid_record_enabled: bool,
}

impl CairnConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// Whether meta region sequence id recording is on; false without a config.
pub fn is_metaregion_seqid_record_enabled(config: Option<&CairnConfig>) -> bool {
    config.is_some_and(|c| c.metaregion_seqid_record_enabled)
}

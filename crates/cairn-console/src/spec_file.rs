//! JSON table specs accepted by `encode`.
//!
//! ```json
//! {
//!   "name": "users",
//!   "attributes": {"READONLY": "true", "owner": "ops"},
//!   "families": [{"name": "profile", "settings": {"VERSIONS": "1"}}],
//!   "servers": ["rs1:60020", "rs2:60020", "rs3:60020"]
//! }
//! ```

use std::collections::BTreeMap;

use cairn_core::{ColumnFamilyDescriptor, ServerAddress, TableDescriptor};
use serde::Deserialize;

use crate::error::ConsoleError;

#[derive(Debug, Deserialize)]
pub struct TableSpec {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub families: Vec<FamilySpec>,
    #[serde(default)]
    pub servers: Vec<String>,
}

/// A family starts from the default settings; `settings` overrides them.
#[derive(Debug, Deserialize)]
pub struct FamilySpec {
    pub name: String,
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

impl TableSpec {
    pub fn from_json(json: &str) -> Result<Self, ConsoleError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_descriptor(self) -> Result<TableDescriptor, ConsoleError> {
        let mut desc = TableDescriptor::new(&self.name)?;
        for spec in self.families {
            let mut family = ColumnFamilyDescriptor::new(&spec.name);
            for (key, value) in &spec.settings {
                family.set_value(key, Some(value.as_str()));
            }
            desc.add_family(family)?;
        }
        for (key, value) in &self.attributes {
            desc.set_value_str(key, Some(value.as_str()));
        }
        if !self.servers.is_empty() {
            let servers = self
                .servers
                .iter()
                .map(|s| s.parse::<ServerAddress>())
                .collect::<Result<Vec<_>, _>>()?;
            desc.set_servers(Some(servers))?;
        }
        Ok(desc)
    }
}

//! Serde form of a descriptor for RPC transport.
//!
//! Kept apart from [`TableDescriptor`] so the data model carries no
//! transport concerns. Byte maps travel as lists of pairs because JSON
//! object keys must be strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::descriptor::TableDescriptor;
use crate::error::DescriptorError;
use crate::family::ColumnFamilyDescriptor;

pub type TransportValues = Vec<(Vec<u8>, Vec<u8>)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportFamily {
    pub name: Vec<u8>,
    #[serde(default)]
    pub values: TransportValues,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportDescriptor {
    pub name: Vec<u8>,
    #[serde(default)]
    pub families: Vec<TransportFamily>,
    #[serde(default)]
    pub values: TransportValues,
}

fn pairs(map: &BTreeMap<Vec<u8>, Vec<u8>>) -> TransportValues {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

pub fn to_transport(desc: &TableDescriptor) -> TransportDescriptor {
    TransportDescriptor {
        name: desc.name().to_vec(),
        families: desc
            .families()
            .map(|f| TransportFamily {
                name: f.name().to_vec(),
                values: pairs(f.values()),
            })
            .collect(),
        values: pairs(desc.values()),
    }
}

/// Rebuild a descriptor. The name is validated as for
/// [`TableDescriptor::new`]; transported values override the catalog flags
/// derived from the name.
pub fn from_transport(transport: TransportDescriptor) -> Result<TableDescriptor, DescriptorError> {
    let families = transport
        .families
        .into_iter()
        .map(|f| ColumnFamilyDescriptor::from_parts(f.name, f.values.into_iter().collect()));
    TableDescriptor::from_parts(
        transport.name,
        families,
        transport.values.into_iter().collect(),
    )
}

#[cfg(test)]
mod tests {
    use crate::server::ServerAddress;
    use crate::types::*;

    use super::*;

    #[test]
    fn test_transport_roundtrip_through_json() {
        let mut desc = TableDescriptor::new("users").unwrap();
        desc.add_family(ColumnFamilyDescriptor::new("cf").with_max_versions(4))
            .unwrap();
        desc.set_value(&[0xC3, 0x28], Some(b"bin".as_slice()));
        desc.set_servers(Some([
            ServerAddress::new("a", 1),
            ServerAddress::new("b", 1),
            ServerAddress::new("c", 1),
        ]))
        .unwrap();

        let json = serde_json::to_string(&to_transport(&desc)).unwrap();
        let parsed: TransportDescriptor = serde_json::from_str(&json).unwrap();
        let rebuilt = from_transport(parsed).unwrap();

        assert_eq!(rebuilt, desc);
        assert_eq!(rebuilt.values(), desc.values());
        assert_eq!(rebuilt.servers().len(), 3);
        assert_eq!(rebuilt.get_family(b"cf").unwrap().max_versions(), 4);
    }

    #[test]
    fn test_from_transport_validates_name() {
        let bad = TransportDescriptor {
            name: b"bad name".to_vec(),
            families: vec![],
            values: vec![],
        };
        assert!(matches!(
            from_transport(bad),
            Err(DescriptorError::IllegalCharacter { .. })
        ));

        let root = TransportDescriptor {
            name: ROOT_TABLE_NAME.to_vec(),
            families: vec![],
            values: vec![],
        };
        assert!(from_transport(root).unwrap().is_root_region());
    }

    #[test]
    fn test_missing_lists_default_empty() {
        let parsed: TransportDescriptor =
            serde_json::from_str(r#"{"name":[116]}"#).unwrap();
        let desc = from_transport(parsed).unwrap();
        assert_eq!(desc.name_as_string(), "t");
        assert_eq!(desc.families().len(), 0);
    }
}

//! Built-in descriptors of the root and meta catalog tables.

use crate::config::{CairnConfig, is_metaregion_seqid_record_enabled};
use crate::descriptor::TableDescriptor;
use crate::family::ColumnFamilyDescriptor;
use crate::types::*;

/// 8 KiB blocks for catalog families.
const CATALOG_BLOCKSIZE: i32 = 8 * 1024;

/// Historian entries expire after 13 weeks.
const HISTORIAN_TTL: i32 = 13 * WEEK_IN_SECONDS;

fn catalog_family() -> ColumnFamilyDescriptor {
    // Ten versions is arbitrary; kept to help debugging.
    ColumnFamilyDescriptor::new(CATALOG_FAMILY)
        .with_max_versions(10)
        .with_in_memory(true)
        .with_block_size(CATALOG_BLOCKSIZE)
        .with_time_to_live(FOREVER)
        .with_scope(REPLICATION_SCOPE_LOCAL)
}

fn historian_family() -> ColumnFamilyDescriptor {
    ColumnFamilyDescriptor::new(CATALOG_HISTORIAN_FAMILY)
        .with_max_versions(ALL_VERSIONS)
        .with_block_size(CATALOG_BLOCKSIZE)
        .with_time_to_live(HISTORIAN_TTL)
        .with_scope(REPLICATION_SCOPE_LOCAL)
}

/// `-ROOT-` with the `info` family.
pub fn root_table_descriptor() -> TableDescriptor {
    TableDescriptor::catalog(ROOT_TABLE_NAME, vec![catalog_family()])
}

/// `-ROOT-` with `info` and the `historian` family recording meta region
/// sequence id transitions.
pub fn root_table_descriptor_with_historian() -> TableDescriptor {
    TableDescriptor::catalog(ROOT_TABLE_NAME, vec![catalog_family(), historian_family()])
}

/// `.META.` with `info` and `historian`.
pub fn meta_table_descriptor() -> TableDescriptor {
    TableDescriptor::catalog(META_TABLE_NAME, vec![catalog_family(), historian_family()])
}

/// The root descriptor matching `config`.
pub fn root_table_descriptor_for(config: Option<&CairnConfig>) -> TableDescriptor {
    if is_metaregion_seqid_record_enabled(config) {
        root_table_descriptor_with_historian()
    } else {
        root_table_descriptor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_descriptor() {
        let root = root_table_descriptor();
        assert_eq!(root.name(), ROOT_TABLE_NAME);
        assert!(root.is_root_region());
        assert!(root.is_meta_region());
        assert_eq!(root.families().len(), 1);

        let info = root.get_family(CATALOG_FAMILY).unwrap();
        assert_eq!(info.max_versions(), 10);
        assert!(info.is_in_memory());
        assert_eq!(info.block_size(), 8192);
        assert_eq!(info.time_to_live(), FOREVER);
        assert_eq!(info.scope(), REPLICATION_SCOPE_LOCAL);
    }

    #[test]
    fn test_meta_descriptor() {
        let meta = meta_table_descriptor();
        assert!(meta.is_meta_table());
        assert!(meta.has_family(CATALOG_FAMILY));
        let historian = meta.get_family(CATALOG_HISTORIAN_FAMILY).unwrap();
        assert_eq!(historian.max_versions(), ALL_VERSIONS);
        assert_eq!(historian.time_to_live(), 13 * WEEK_IN_SECONDS);
        assert!(!historian.is_in_memory());
    }

    #[test]
    fn test_root_for_config() {
        assert!(!root_table_descriptor_for(None).has_family(CATALOG_HISTORIAN_FAMILY));

        let enabled = CairnConfig {
            metaregion_seqid_record_enabled: true,
        };
        let root = root_table_descriptor_for(Some(&enabled));
        assert!(root.has_family(CATALOG_HISTORIAN_FAMILY));
        assert_ne!(root, root_table_descriptor());
    }
}

//! The table descriptor: name, attributes, and column families of one table.

pub mod attributes;
mod codec;
mod compare;
pub mod families;
mod flags;
mod placement;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::encoding::bytes;
use crate::error::DescriptorError;
use crate::family::ColumnFamilyDescriptor;
use crate::types::*;

pub use attributes::{AttributeStore, RESERVED_KEYWORDS, default_values, is_reserved};
pub use families::FamilyRegistry;

use flags::FlagCache;
use placement::PlacementCache;

/// Metadata record of a single table.
///
/// The descriptor owns its attributes and families outright; cloning makes
/// a deep copy with fresh derived-flag caches. Derived flags are cached
/// behind internal locks, so shared `&TableDescriptor` reads are safe, but
/// mutation needs exclusive access.
#[derive(Debug, Default)]
pub struct TableDescriptor {
    name: Vec<u8>,
    name_as_string: String,
    attributes: AttributeStore,
    families: FamilyRegistry,
    flags: FlagCache,
    placement: PlacementCache,
}

/// Check that `name` is a legal user-space table name.
///
/// The first byte may not be `.` or `-`, and every byte must be an ASCII
/// letter, digit, `_`, `-`, or `.`.
pub fn is_legal_table_name(name: &[u8]) -> Result<&[u8], DescriptorError> {
    let Some(&first) = name.first() else {
        return Err(DescriptorError::EmptyTableName);
    };
    if first == b'.' || first == b'-' {
        return Err(DescriptorError::IllegalFirstCharacter {
            byte: first,
            name: bytes::to_string_binary(name),
        });
    }
    for (position, &b) in name.iter().enumerate() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.' {
            continue;
        }
        return Err(DescriptorError::IllegalCharacter {
            byte: b,
            position,
            name: bytes::to_string_binary(name),
        });
    }
    Ok(name)
}

fn is_catalog_name(name: &[u8]) -> bool {
    name == ROOT_TABLE_NAME || name == META_TABLE_NAME
}

/// Directory holding the files of table `name` under `root`.
pub fn table_dir(root: &Path, name: &[u8]) -> PathBuf {
    root.join(bytes::to_string(name))
}

impl TableDescriptor {
    /// A descriptor with an empty name and nothing else; the starting point
    /// for decoding.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a descriptor for table `name`.
    ///
    /// Catalog table names skip the legal-name check and get their
    /// `IS_ROOT`/`IS_META` flags set.
    pub fn new(name: impl AsRef<[u8]>) -> Result<Self, DescriptorError> {
        let name = name.as_ref();
        if !is_catalog_name(name) {
            is_legal_table_name(name)?;
        }
        Ok(Self::with_name(name.to_vec()))
    }

    /// Assemble a descriptor from its parts. `values` are applied last and
    /// win over the flags derived from the name.
    pub fn from_parts(
        name: impl AsRef<[u8]>,
        families: impl IntoIterator<Item = ColumnFamilyDescriptor>,
        values: BTreeMap<Vec<u8>, Vec<u8>>,
    ) -> Result<Self, DescriptorError> {
        let mut desc = Self::new(name)?;
        for family in families {
            desc.add_family(family)?;
        }
        for (key, value) in values {
            desc.set_value(&key, Some(value.as_slice()));
        }
        Ok(desc)
    }

    /// Catalog descriptors: the name is trusted and families are non-empty.
    pub(crate) fn catalog(name: &[u8], families: Vec<ColumnFamilyDescriptor>) -> Self {
        let mut desc = Self::with_name(name.to_vec());
        for family in families {
            desc.families
                .add(family)
                .unwrap_or_else(|e| warn!(error = %e, "skipping catalog family"));
        }
        desc
    }

    fn with_name(name: Vec<u8>) -> Self {
        let mut desc = Self {
            name_as_string: bytes::to_string(&name),
            name,
            ..Self::default()
        };
        desc.set_meta_flags();
        desc
    }

    fn set_meta_flags(&mut self) {
        let is_root = self.name == ROOT_TABLE_NAME;
        self.set_root_region(is_root);
        self.set_meta_region(is_root || self.name == META_TABLE_NAME);
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn name_as_string(&self) -> &str {
        &self.name_as_string
    }

    // -----------------------------------------------------------------------
    // Attributes
    // -----------------------------------------------------------------------

    pub fn get_value(&self, key: &[u8]) -> Option<&[u8]> {
        self.attributes.get(key)
    }

    pub fn get_value_str(&self, key: &str) -> Option<String> {
        self.attributes.get_str(key)
    }

    /// All attributes, ordered by key bytes.
    pub fn values(&self) -> &BTreeMap<Vec<u8>, Vec<u8>> {
        self.attributes.entries()
    }

    /// Set an attribute; `None` removes it.
    pub fn set_value(&mut self, key: &[u8], value: Option<&[u8]>) {
        self.attributes.set(key, value);
        self.invalidate(key);
    }

    pub fn set_value_str(&mut self, key: &str, value: Option<&str>) {
        self.set_value(key.as_bytes(), value.map(str::as_bytes));
    }

    pub fn remove_value(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        let removed = self.attributes.remove(key);
        self.invalidate(key);
        removed
    }

    fn set_flag(&mut self, key: &str, value: bool) {
        self.attributes.set_flag(key, value);
        self.invalidate(key.as_bytes());
    }

    fn invalidate(&mut self, key: &[u8]) {
        self.flags.invalidate(key);
        self.placement.invalidate(key);
    }

    fn parse_u64(&self, key: &str, default: u64) -> u64 {
        let Some(raw) = self.attributes.get(key.as_bytes()) else {
            return default;
        };
        match bytes::to_string(raw).parse() {
            Ok(v) => v,
            Err(_) => {
                warn!(
                    table = %self.name_as_string,
                    key,
                    value = %bytes::to_string_binary(raw),
                    "unparseable table attribute, using default"
                );
                default
            }
        }
    }

    /// True if every column of the table is read only.
    pub fn is_read_only(&self) -> bool {
        self.attributes.flag(READONLY, DEFAULT_READONLY)
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.set_flag(READONLY, read_only);
    }

    /// Store file size at which a region splits.
    pub fn max_file_size(&self) -> u64 {
        self.parse_u64(MAX_FILESIZE, DEFAULT_MAX_FILESIZE)
    }

    pub fn set_max_file_size(&mut self, size: u64) {
        self.set_value_str(MAX_FILESIZE, Some(&size.to_string()));
    }

    /// Memstore size at which a region flushes.
    pub fn memstore_flush_size(&self) -> u64 {
        self.parse_u64(MEMSTORE_FLUSHSIZE, DEFAULT_MEMSTORE_FLUSH_SIZE)
    }

    pub fn set_memstore_flush_size(&mut self, size: u64) {
        self.set_value_str(MEMSTORE_FLUSHSIZE, Some(&size.to_string()));
    }

    pub fn is_wal_disabled(&self) -> bool {
        self.attributes.flag(DISABLE_WAL, DEFAULT_WAL_DISABLED)
    }

    pub fn set_wal_disabled(&mut self, disabled: bool) {
        self.set_flag(DISABLE_WAL, disabled);
    }

    // -----------------------------------------------------------------------
    // Families
    // -----------------------------------------------------------------------

    /// Add a column family, replacing one of the same name.
    pub fn add_family(&mut self, family: ColumnFamilyDescriptor) -> Result<(), DescriptorError> {
        self.families.add(family)
    }

    pub fn has_family(&self, name: &[u8]) -> bool {
        self.families.has(name)
    }

    pub fn get_family(&self, name: &[u8]) -> Option<&ColumnFamilyDescriptor> {
        self.families.get(name)
    }

    pub fn get_family_mut(&mut self, name: &[u8]) -> Option<&mut ColumnFamilyDescriptor> {
        self.families.get_mut(name)
    }

    pub fn remove_family(&mut self, name: &[u8]) -> Option<ColumnFamilyDescriptor> {
        self.families.remove(name)
    }

    /// Families ordered by name bytes.
    pub fn families(&self) -> impl ExactSizeIterator<Item = &ColumnFamilyDescriptor> {
        self.families.iter()
    }

    pub fn family_names(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        self.families.names()
    }

    pub fn column_families(&self) -> Vec<ColumnFamilyDescriptor> {
        self.families.iter().cloned().collect()
    }
}

impl Clone for TableDescriptor {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            name_as_string: self.name_as_string.clone(),
            attributes: self.attributes.clone(),
            families: self.families.clone(),
            flags: FlagCache::default(),
            placement: PlacementCache::default(),
        }
    }
}

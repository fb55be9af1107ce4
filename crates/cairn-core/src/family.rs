//! Column family schema: a named group of settings stored as a byte map,
//! with its own versioned codec, ordering, and rendering.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::warn;

use crate::encoding::bytes::{self, hash_code, hash_difference, map_hash_code, parse_bool};
use crate::encoding::{DataInput, DataOutput};
use crate::error::EncodingError;
use crate::types::*;

/// Settings for one column family, keyed by family name within a table.
///
/// Every setting lives in `values`; typed accessors parse on read and fall
/// back to the documented default when a value is missing or unparseable.
#[derive(Debug, Clone)]
pub struct ColumnFamilyDescriptor {
    name: Vec<u8>,
    values: BTreeMap<Vec<u8>, Vec<u8>>,
}

/// Reserved family settings and their defaults, in rendering order.
fn family_defaults() -> [(&'static str, String); 8] {
    [
        (FAMILY_BLOCKCACHE, DEFAULT_FAMILY_BLOCKCACHE.to_string()),
        (FAMILY_BLOCKSIZE, DEFAULT_FAMILY_BLOCKSIZE.to_string()),
        (FAMILY_BLOOMFILTER, DEFAULT_FAMILY_BLOOMFILTER.to_string()),
        (FAMILY_COMPRESSION, DEFAULT_FAMILY_COMPRESSION.to_string()),
        (FAMILY_IN_MEMORY, DEFAULT_FAMILY_IN_MEMORY.to_string()),
        (
            FAMILY_REPLICATION_SCOPE,
            DEFAULT_FAMILY_REPLICATION_SCOPE.to_string(),
        ),
        (FAMILY_TTL, DEFAULT_FAMILY_TTL.to_string()),
        (FAMILY_VERSIONS, DEFAULT_FAMILY_VERSIONS.to_string()),
    ]
}

impl ColumnFamilyDescriptor {
    /// Create a family with every reserved setting at its default.
    pub fn new(name: impl AsRef<[u8]>) -> Self {
        let mut family = Self::bare(name.as_ref().to_vec());
        for (key, value) in family_defaults() {
            family
                .values
                .insert(key.as_bytes().to_vec(), value.into_bytes());
        }
        family
    }

    /// A family carrying exactly `values`, with no defaults filled in.
    pub fn from_parts(name: impl AsRef<[u8]>, values: BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            name: name.as_ref().to_vec(),
            values,
        }
    }

    /// A family with no settings at all; used by the decoder.
    fn bare(name: Vec<u8>) -> Self {
        Self {
            name,
            values: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn name_as_string(&self) -> String {
        bytes::to_string(&self.name)
    }

    pub fn values(&self) -> &BTreeMap<Vec<u8>, Vec<u8>> {
        &self.values
    }

    pub fn get_value(&self, key: &str) -> Option<&[u8]> {
        self.values.get(key.as_bytes()).map(Vec::as_slice)
    }

    /// Set a setting; `None` removes it.
    pub fn set_value(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.values
                    .insert(key.as_bytes().to_vec(), v.as_bytes().to_vec());
            }
            None => {
                self.values.remove(key.as_bytes());
            }
        }
    }

    fn parse_i32(&self, key: &str, default: i32) -> i32 {
        let Some(raw) = self.get_value(key) else {
            return default;
        };
        match bytes::to_string(raw).parse() {
            Ok(v) => v,
            Err(_) => {
                warn!(
                    family = %self.name_as_string(),
                    key,
                    value = %bytes::to_string_binary(raw),
                    "unparseable family setting, using default"
                );
                default
            }
        }
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        self.get_value(key).map(parse_bool).unwrap_or(default)
    }

    pub fn max_versions(&self) -> i32 {
        self.parse_i32(FAMILY_VERSIONS, DEFAULT_FAMILY_VERSIONS)
    }

    pub fn set_max_versions(&mut self, versions: i32) {
        self.set_value(FAMILY_VERSIONS, Some(&versions.to_string()));
    }

    pub fn with_max_versions(mut self, versions: i32) -> Self {
        self.set_max_versions(versions);
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.flag(FAMILY_IN_MEMORY, DEFAULT_FAMILY_IN_MEMORY)
    }

    pub fn set_in_memory(&mut self, in_memory: bool) {
        self.set_value(FAMILY_IN_MEMORY, Some(&in_memory.to_string()));
    }

    pub fn with_in_memory(mut self, in_memory: bool) -> Self {
        self.set_in_memory(in_memory);
        self
    }

    pub fn block_size(&self) -> i32 {
        self.parse_i32(FAMILY_BLOCKSIZE, DEFAULT_FAMILY_BLOCKSIZE)
    }

    pub fn set_block_size(&mut self, size: i32) {
        self.set_value(FAMILY_BLOCKSIZE, Some(&size.to_string()));
    }

    pub fn with_block_size(mut self, size: i32) -> Self {
        self.set_block_size(size);
        self
    }

    pub fn is_block_cache_enabled(&self) -> bool {
        self.flag(FAMILY_BLOCKCACHE, DEFAULT_FAMILY_BLOCKCACHE)
    }

    pub fn set_block_cache_enabled(&mut self, enabled: bool) {
        self.set_value(FAMILY_BLOCKCACHE, Some(&enabled.to_string()));
    }

    /// Time to live of cells in seconds; [`FOREVER`] disables expiry.
    pub fn time_to_live(&self) -> i32 {
        self.parse_i32(FAMILY_TTL, DEFAULT_FAMILY_TTL)
    }

    pub fn set_time_to_live(&mut self, seconds: i32) {
        self.set_value(FAMILY_TTL, Some(&seconds.to_string()));
    }

    pub fn with_time_to_live(mut self, seconds: i32) -> Self {
        self.set_time_to_live(seconds);
        self
    }

    pub fn scope(&self) -> i32 {
        self.parse_i32(FAMILY_REPLICATION_SCOPE, DEFAULT_FAMILY_REPLICATION_SCOPE)
    }

    pub fn set_scope(&mut self, scope: i32) {
        self.set_value(FAMILY_REPLICATION_SCOPE, Some(&scope.to_string()));
    }

    pub fn with_scope(mut self, scope: i32) -> Self {
        self.set_scope(scope);
        self
    }

    // -----------------------------------------------------------------------
    // Codec
    // -----------------------------------------------------------------------

    /// Encode as: version byte, vlong-prefixed name, i32 setting count, then
    /// each key and value with an i32 length prefix.
    pub fn write(&self, out: &mut DataOutput) {
        out.write_u8(COLUMN_DESCRIPTOR_VERSION);
        out.write_byte_array(&self.name);
        out.write_len(self.values.len());
        for (key, value) in &self.values {
            out.write_writable_bytes(key);
            out.write_writable_bytes(value);
        }
    }

    pub fn read(input: &mut DataInput<'_>) -> Result<Self, EncodingError> {
        let version = input.read_u8()?;
        if version != COLUMN_DESCRIPTOR_VERSION {
            return Err(EncodingError::FamilyVersionUnsupported(version));
        }
        let mut family = Self::bare(input.read_byte_array()?);
        let count = input.read_len()?;
        for _ in 0..count {
            let key = input.read_writable_bytes()?;
            let value = input.read_writable_bytes()?;
            family.values.insert(key, value);
        }
        Ok(family)
    }

    // -----------------------------------------------------------------------
    // Comparison and rendering
    // -----------------------------------------------------------------------

    /// Name first, then the sign of the settings-hash difference.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name).then_with(|| {
            hash_difference(map_hash_code(&self.values), map_hash_code(&other.values))
        })
    }

    pub fn hash_code(&self) -> i32 {
        hash_code(&self.name) ^ COLUMN_DESCRIPTOR_VERSION as i32 ^ map_hash_code(&self.values)
    }

    /// Rendering with settings equal to their defaults left out.
    pub fn to_string_customized_values(&self) -> String {
        self.render(false)
    }

    fn render(&self, print_defaults: bool) -> String {
        let defaults = family_defaults();
        let mut s = format!("{{NAME => '{}'", self.name_as_string());
        let mut config = Vec::new();
        for (key, value) in &self.values {
            let key = bytes::to_string(key);
            let value = bytes::to_string(value);
            match defaults.iter().find(|(k, _)| *k == key) {
                Some((_, default)) => {
                    if print_defaults || !default.eq_ignore_ascii_case(&value) {
                        s.push_str(&format!(", {key} => '{value}'"));
                    }
                }
                None => config.push(format!("'{key}' => '{value}'")),
            }
        }
        if !config.is_empty() {
            s.push_str(&format!(", {CONFIG} => {{{}}}", config.join(", ")));
        }
        s.push('}');
        s
    }
}

impl fmt::Display for ColumnFamilyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

impl PartialEq for ColumnFamilyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for ColumnFamilyDescriptor {}

impl PartialOrd for ColumnFamilyDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ColumnFamilyDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for ColumnFamilyDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

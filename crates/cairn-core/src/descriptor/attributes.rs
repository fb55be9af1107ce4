//! Table attributes: an ordered byte map plus the reserved-key tables.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::encoding::bytes::{self, map_hash_code, parse_bool};
use crate::server::ServerAddress;
use crate::types::*;

/// Attribute keys rendered outside the `CONFIG` block. `DISABLE_WAL` has a
/// typed accessor but renders with the free-form attributes.
pub const RESERVED_KEYWORDS: [&str; 7] = [
    MAX_FILESIZE,
    READONLY,
    MEMSTORE_FLUSHSIZE,
    DEFERRED_LOG_FLUSH,
    SERVER_SET,
    IS_ROOT,
    IS_META,
];

static DEFAULT_VALUES: LazyLock<BTreeMap<&'static str, String>> = LazyLock::new(|| {
    BTreeMap::from([
        (MAX_FILESIZE, DEFAULT_MAX_FILESIZE.to_string()),
        (READONLY, DEFAULT_READONLY.to_string()),
        (MEMSTORE_FLUSHSIZE, DEFAULT_MEMSTORE_FLUSH_SIZE.to_string()),
        (DEFERRED_LOG_FLUSH, DEFAULT_DEFERRED_LOG_FLUSH.to_string()),
    ])
});

/// Documented default of each reserved attribute that has one.
pub fn default_values() -> &'static BTreeMap<&'static str, String> {
    &DEFAULT_VALUES
}

pub fn is_reserved(key: &[u8]) -> bool {
    RESERVED_KEYWORDS.iter().any(|k| k.as_bytes() == key)
}

/// Ordered key/value metadata of a table.
///
/// Keys compare by raw bytes. Storing "no value" removes the key rather than
/// recording an empty marker.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    values: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key.as_bytes()).map(bytes::to_string)
    }

    pub fn set(&mut self, key: &[u8], value: Option<&[u8]>) {
        match value {
            Some(v) => {
                self.values.insert(key.to_vec(), v.to_vec());
            }
            None => {
                self.values.remove(key);
            }
        }
    }

    pub fn set_str(&mut self, key: &str, value: Option<&str>) {
        self.set(key.as_bytes(), value.map(str::as_bytes));
    }

    pub fn remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        self.values.remove(key)
    }

    pub fn entries(&self) -> &BTreeMap<Vec<u8>, Vec<u8>> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn replace_all(&mut self, values: BTreeMap<Vec<u8>, Vec<u8>>) {
        self.values = values;
    }

    /// Read a textual boolean, `default` when absent.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key.as_bytes()).map(parse_bool).unwrap_or(default)
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        let encoded = if value { TRUE } else { FALSE };
        self.set(key.as_bytes(), Some(encoded));
    }

    pub fn hash_code(&self) -> i32 {
        map_hash_code(&self.values)
    }

    /// Render as `, {METHOD => 'table_att', KEY => 'value', ..., CONFIG => {...}}`.
    ///
    /// Reserved keys come first. `IS_ROOT`/`IS_META` only show when true;
    /// other reserved keys equal to their default are hidden unless
    /// `print_defaults`. Returns an empty string when nothing remains.
    pub fn render(
        &self,
        print_defaults: bool,
        servers: impl Fn() -> BTreeSet<ServerAddress>,
    ) -> String {
        let mut reserved = Vec::new();
        let mut config = Vec::new();
        for (k, v) in &self.values {
            if !is_reserved(k) {
                config.push((bytes::to_string(k), bytes::to_string(v)));
                continue;
            }
            let key = bytes::to_string(k);
            let value = bytes::to_string(v);
            if (key == IS_ROOT || key == IS_META) && !parse_bool(v) {
                continue;
            }
            let is_default = DEFAULT_VALUES
                .get(key.as_str())
                .is_some_and(|d| d.eq_ignore_ascii_case(&value));
            if print_defaults || !is_default {
                reserved.push((key, value));
            }
        }

        if reserved.is_empty() && config.is_empty() {
            return String::new();
        }

        let mut s = String::from(", {METHOD => 'table_att'");
        for (key, value) in reserved {
            if key == SERVER_SET {
                let hosts: Vec<String> = servers()
                    .iter()
                    .map(|addr| format!("'{}'", addr.host_name_with_port()))
                    .collect();
                s.push_str(&format!(", {key} => [ {} ]", hosts.join(", ")));
            } else {
                s.push_str(&format!(", {key} => '{value}'"));
            }
        }
        if !config.is_empty() {
            let pairs: Vec<String> = config
                .iter()
                .map(|(k, v)| format!("'{k}' => '{v}'"))
                .collect();
            s.push_str(&format!(", {CONFIG} => {{{}}}", pairs.join(", ")));
        }
        s.push('}');
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_servers() -> BTreeSet<ServerAddress> {
        BTreeSet::new()
    }

    #[test]
    fn test_set_get_remove() {
        let mut store = AttributeStore::new();
        store.set(b"k", Some(b"v".as_slice()));
        assert_eq!(store.get(b"k"), Some(&b"v"[..]));
        store.set(b"k", None);
        assert_eq!(store.get(b"k"), None);

        store.set_str("owner", Some("ops"));
        assert_eq!(store.get_str("owner").as_deref(), Some("ops"));
        assert_eq!(store.remove(b"owner"), Some(b"ops".to_vec()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_non_utf8_keys_are_distinct() {
        let mut store = AttributeStore::new();
        store.set(&[0xFF], Some(b"a".as_slice()));
        store.set(&[0xFE], Some(b"b".as_slice()));
        assert_eq!(store.len(), 2);
        let keys: Vec<Vec<u8>> = store.entries().keys().cloned().collect();
        assert_eq!(keys, vec![vec![0xFEu8], vec![0xFFu8]]);
    }

    #[test]
    fn test_flags() {
        let mut store = AttributeStore::new();
        assert!(store.flag(DEFERRED_LOG_FLUSH, true));
        assert!(!store.flag(READONLY, false));
        store.set_flag(READONLY, true);
        assert_eq!(store.get(READONLY.as_bytes()), Some(TRUE));
        assert!(store.flag(READONLY, false));
    }

    #[test]
    fn test_reserved_and_defaults_tables() {
        for key in RESERVED_KEYWORDS {
            assert!(is_reserved(key.as_bytes()));
        }
        assert!(!is_reserved(b"owner"));
        assert!(!is_reserved(DISABLE_WAL.as_bytes()));
        assert_eq!(
            default_values().get(MAX_FILESIZE).map(String::as_str),
            Some("268435456")
        );
        assert_eq!(
            default_values().get(MEMSTORE_FLUSHSIZE).map(String::as_str),
            Some("67108864")
        );
        assert_eq!(
            default_values().get(DEFERRED_LOG_FLUSH).map(String::as_str),
            Some("true")
        );
        assert_eq!(default_values().len(), 4);
        assert!(!default_values().contains_key(SERVER_SET));
    }

    #[test]
    fn test_render_empty_store() {
        let store = AttributeStore::new();
        assert_eq!(store.render(true, no_servers), "");
        assert_eq!(store.render(false, no_servers), "");
    }

    #[test]
    fn test_render_hides_defaults_and_false_catalog_flags() {
        let mut store = AttributeStore::new();
        store.set_flag(READONLY, false);
        store.set_flag(IS_ROOT, false);
        store.set_flag(IS_META, false);
        store.set_str(MAX_FILESIZE, Some(&DEFAULT_MAX_FILESIZE.to_string()));
        assert_eq!(store.render(false, no_servers), "");
        assert_eq!(
            store.render(true, no_servers),
            ", {METHOD => 'table_att', MAX_FILESIZE => '268435456', READONLY => 'false'}"
        );

        store.set_flag(READONLY, true);
        assert_eq!(
            store.render(false, no_servers),
            ", {METHOD => 'table_att', READONLY => 'true'}"
        );
    }

    #[test]
    fn test_render_config_block_and_servers() {
        let mut store = AttributeStore::new();
        store.set_str("owner", Some("ops"));
        store.set_str(SERVER_SET, Some("ignored"));
        store.set_flag(IS_META, true);
        let servers = || {
            BTreeSet::from([ServerAddress::new("a", 1), ServerAddress::new("b", 2)])
        };
        assert_eq!(
            store.render(false, servers),
            ", {METHOD => 'table_att', IS_META => 'true', SERVER_SET => [ 'a:1', 'b:2' ], \
             CONFIG => {'owner' => 'ops'}}"
        );
    }
}

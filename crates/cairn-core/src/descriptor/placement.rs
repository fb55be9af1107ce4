//! Placement hint: the set of servers a table may be assigned to, stored
//! encoded under the `SERVER_SET` attribute and cached decoded.
//!
//! The hint is best-effort metadata. Encode and decode failures are logged
//! and read as "no servers"; they never fail the caller.

use std::collections::BTreeSet;

use parking_lot::Mutex;
use tracing::error;

use crate::error::{DescriptorError, EncodingError};
use crate::server::{ServerAddress, ServerSet};
use crate::types::{MIN_PLACEMENT_SERVERS, SERVER_SET};

use super::TableDescriptor;
use super::attributes::AttributeStore;

#[derive(Debug, Default)]
pub(crate) struct PlacementCache {
    servers: Mutex<Option<BTreeSet<ServerAddress>>>,
}

impl PlacementCache {
    fn get(&self, attributes: &AttributeStore, table: &str) -> BTreeSet<ServerAddress> {
        let mut guard = self.servers.lock();
        guard
            .get_or_insert_with(|| decode_servers(attributes, table))
            .clone()
    }

    fn set(&mut self, servers: BTreeSet<ServerAddress>) {
        *self.servers.get_mut() = Some(servers);
    }

    pub(crate) fn invalidate(&mut self, key: &[u8]) {
        if key == SERVER_SET.as_bytes() {
            *self.servers.get_mut() = None;
        }
    }

    pub(crate) fn clear(&mut self) {
        *self.servers.get_mut() = None;
    }
}

fn decode_servers(attributes: &AttributeStore, table: &str) -> BTreeSet<ServerAddress> {
    let Some(raw) = attributes.get(SERVER_SET.as_bytes()) else {
        return BTreeSet::new();
    };
    match ServerSet::decode(raw) {
        Ok(set) => set.servers,
        Err(e) => {
            error!(table, error = %e, "failed to decode server set");
            BTreeSet::new()
        }
    }
}

impl TableDescriptor {
    /// Replace the placement hint.
    ///
    /// `None` or an empty collection clears it. Otherwise at least three
    /// servers must be supplied; duplicates are dropped after the check.
    pub fn set_servers(
        &mut self,
        servers: Option<impl IntoIterator<Item = ServerAddress>>,
    ) -> Result<(), DescriptorError> {
        let supplied: Vec<ServerAddress> = servers.into_iter().flatten().collect();
        if supplied.is_empty() {
            self.remove_value(SERVER_SET.as_bytes());
            self.placement.set(BTreeSet::new());
            return Ok(());
        }
        if supplied.len() < MIN_PLACEMENT_SERVERS {
            return Err(DescriptorError::TooFewServers {
                min: MIN_PLACEMENT_SERVERS,
                actual: supplied.len(),
            });
        }

        let set = ServerSet::new(supplied);
        let encoded = set.encode();
        self.store_servers(set.servers, encoded);
        Ok(())
    }

    /// Persist `servers` under `SERVER_SET`. If encoding failed, the stale
    /// attribute is dropped and the new set lives only in the cache.
    fn store_servers(
        &mut self,
        servers: BTreeSet<ServerAddress>,
        encoded: Result<Vec<u8>, EncodingError>,
    ) {
        match encoded {
            Ok(encoded) => {
                self.set_value(SERVER_SET.as_bytes(), Some(encoded.as_slice()));
            }
            Err(e) => {
                error!(
                    table = %self.name_as_string,
                    error = %e,
                    "failed to encode server set"
                );
                self.remove_value(SERVER_SET.as_bytes());
            }
        }
        self.placement.set(servers);
    }

    /// Servers this table may be placed on; empty when no hint is set or
    /// the stored hint cannot be decoded.
    pub fn servers(&self) -> BTreeSet<ServerAddress> {
        self.placement.get(&self.attributes, &self.name_as_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(n: u16) -> Vec<ServerAddress> {
        (0..n)
            .map(|i| ServerAddress::new(format!("rs{i}"), 60020))
            .collect()
    }

    #[test]
    fn test_too_few_servers_rejected() {
        let mut desc = TableDescriptor::new("users").unwrap();
        match desc.set_servers(Some(addrs(2))) {
            Err(DescriptorError::TooFewServers { min: 3, actual: 2 }) => {}
            other => panic!("expected TooFewServers, got {other:?}"),
        }
        assert!(desc.get_value(SERVER_SET.as_bytes()).is_none());
        assert!(desc.servers().is_empty());
    }

    #[test]
    fn test_minimum_counts_supplied_servers() {
        let mut desc = TableDescriptor::new("users").unwrap();
        let mut servers = addrs(2);
        servers.push(servers[0].clone());
        desc.set_servers(Some(servers)).unwrap();

        let expected: BTreeSet<ServerAddress> = addrs(2).into_iter().collect();
        assert_eq!(desc.servers(), expected);
        assert_eq!(desc.clone().servers(), expected);
    }

    #[test]
    fn test_encode_failure_keeps_new_set_in_memory() {
        let mut desc = TableDescriptor::new("users").unwrap();
        desc.set_servers(Some(addrs(3))).unwrap();
        assert!(desc.get_value(SERVER_SET.as_bytes()).is_some());

        let replacement: BTreeSet<ServerAddress> = addrs(4).into_iter().collect();
        desc.store_servers(replacement.clone(), Err(EncodingError::InvalidLength(-1)));

        assert_eq!(desc.servers(), replacement);
        assert!(desc.get_value(SERVER_SET.as_bytes()).is_none());
    }

    #[test]
    fn test_set_and_get_servers() {
        let mut desc = TableDescriptor::new("users").unwrap();
        let mut servers = addrs(3);
        servers.push(servers[1].clone());
        desc.set_servers(Some(servers)).unwrap();

        let expected: BTreeSet<ServerAddress> = addrs(3).into_iter().collect();
        assert_eq!(desc.servers(), expected);
        assert!(desc.get_value(SERVER_SET.as_bytes()).is_some());

        // A copy has a cold cache and must decode the stored attribute.
        let copy = desc.clone();
        assert_eq!(copy.servers(), expected);
    }

    #[test]
    fn test_none_clears() {
        let mut desc = TableDescriptor::new("users").unwrap();
        desc.set_servers(Some(addrs(4))).unwrap();
        desc.set_servers(None::<Vec<ServerAddress>>).unwrap();
        assert!(desc.servers().is_empty());
        assert!(desc.get_value(SERVER_SET.as_bytes()).is_none());
    }

    #[test]
    fn test_corrupt_attribute_reads_empty() {
        let mut desc = TableDescriptor::new("users").unwrap();
        desc.set_value(SERVER_SET.as_bytes(), Some(b"\x00garbage".as_slice()));
        assert!(desc.servers().is_empty());
        // The rest of the descriptor is untouched.
        assert_eq!(desc.name_as_string(), "users");
        assert!(desc.get_value(SERVER_SET.as_bytes()).is_some());
    }

    #[test]
    fn test_raw_write_invalidates_cache() {
        let mut desc = TableDescriptor::new("users").unwrap();
        desc.set_servers(Some(addrs(3))).unwrap();
        assert_eq!(desc.servers().len(), 3);

        let encoded = ServerSet::new(addrs(5)).encode().unwrap();
        desc.set_value(SERVER_SET.as_bytes(), Some(encoded.as_slice()));
        assert_eq!(desc.servers().len(), 5);
    }
}

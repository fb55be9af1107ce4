//! Lazily derived boolean flags backed by reserved attributes.
//!
//! Each flag is computed from the attribute store on first read and cached.
//! The compute-and-store step runs under a per-flag mutex so concurrent
//! first reads agree on one value. Any descriptor-level write to the backing
//! attribute resets the cached value; that path holds `&mut` and needs no lock.

use parking_lot::Mutex;

use crate::types::{DEFAULT_DEFERRED_LOG_FLUSH, DEFERRED_LOG_FLUSH, IS_META, IS_ROOT};

use super::TableDescriptor;
use super::attributes::AttributeStore;

#[derive(Debug, Default)]
pub(crate) struct FlagCache {
    root: Mutex<Option<bool>>,
    meta: Mutex<Option<bool>>,
    deferred_log_flush: Mutex<Option<bool>>,
}

fn cached(slot: &Mutex<Option<bool>>, compute: impl FnOnce() -> bool) -> bool {
    let mut guard = slot.lock();
    *guard.get_or_insert_with(compute)
}

impl FlagCache {
    fn root(&self, attributes: &AttributeStore) -> bool {
        cached(&self.root, || attributes.flag(IS_ROOT, false))
    }

    fn meta(&self, attributes: &AttributeStore) -> bool {
        cached(&self.meta, || attributes.flag(IS_META, false))
    }

    fn deferred_log_flush(&self, attributes: &AttributeStore) -> bool {
        cached(&self.deferred_log_flush, || {
            attributes.flag(DEFERRED_LOG_FLUSH, DEFAULT_DEFERRED_LOG_FLUSH)
        })
    }

    /// Forget the cached flag backed by `key`, if any.
    pub(crate) fn invalidate(&mut self, key: &[u8]) {
        let slot = match key {
            k if k == IS_ROOT.as_bytes() => &mut self.root,
            k if k == IS_META.as_bytes() => &mut self.meta,
            k if k == DEFERRED_LOG_FLUSH.as_bytes() => &mut self.deferred_log_flush,
            _ => return,
        };
        *slot.get_mut() = None;
    }

    pub(crate) fn clear(&mut self) {
        *self.root.get_mut() = None;
        *self.meta.get_mut() = None;
        *self.deferred_log_flush.get_mut() = None;
    }
}

impl TableDescriptor {
    /// True if this is the root catalog region.
    pub fn is_root_region(&self) -> bool {
        self.flags.root(&self.attributes)
    }

    pub fn set_root_region(&mut self, is_root: bool) {
        self.set_flag(IS_ROOT, is_root);
    }

    /// True for regions of either catalog table (root or meta).
    pub fn is_meta_region(&self) -> bool {
        self.flags.meta(&self.attributes)
    }

    pub fn set_meta_region(&mut self, is_meta: bool) {
        self.set_flag(IS_META, is_meta);
    }

    /// True only for the meta table itself, not the root table.
    pub fn is_meta_table(&self) -> bool {
        self.is_meta_region() && !self.is_root_region()
    }

    /// True if WAL syncs for this table are left to a background flusher.
    pub fn is_deferred_log_flush(&self) -> bool {
        self.flags.deferred_log_flush(&self.attributes)
    }

    pub fn set_deferred_log_flush(&mut self, deferred: bool) {
        self.set_flag(DEFERRED_LOG_FLUSH, deferred);
    }
}

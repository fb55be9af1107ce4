//! Column families of a table, keyed and ordered by family name.

use std::collections::BTreeMap;

use crate::error::DescriptorError;
use crate::family::ColumnFamilyDescriptor;

#[derive(Debug, Clone, Default)]
pub struct FamilyRegistry {
    families: BTreeMap<Vec<u8>, ColumnFamilyDescriptor>,
}

impl FamilyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a family, replacing any family with the same name.
    pub fn add(&mut self, family: ColumnFamilyDescriptor) -> Result<(), DescriptorError> {
        if family.name().is_empty() {
            return Err(DescriptorError::EmptyFamilyName);
        }
        self.families.insert(family.name().to_vec(), family);
        Ok(())
    }

    pub fn has(&self, name: &[u8]) -> bool {
        self.families.contains_key(name)
    }

    pub fn get(&self, name: &[u8]) -> Option<&ColumnFamilyDescriptor> {
        self.families.get(name)
    }

    pub fn get_mut(&mut self, name: &[u8]) -> Option<&mut ColumnFamilyDescriptor> {
        self.families.get_mut(name)
    }

    pub fn remove(&mut self, name: &[u8]) -> Option<ColumnFamilyDescriptor> {
        self.families.remove(name)
    }

    /// Families in byte-lexicographic name order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ColumnFamilyDescriptor> {
        self.families.values()
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        self.families.keys().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.families.clear();
    }
}

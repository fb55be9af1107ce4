//! Ordering, equality, hashing, and text rendering of table descriptors.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::encoding::bytes::{hash_code, hash_difference};
use crate::types::TABLE_DESCRIPTOR_VERSION;

use super::TableDescriptor;

impl TableDescriptor {
    /// Compare by name bytes, then family count, then families pairwise in
    /// name order, then by the sign of the attribute-hash difference.
    ///
    /// The final step is not a total order: distinct attribute maps with
    /// colliding hashes compare equal, and overflowing differences flip sign.
    /// Stored comparison results rely on this exact behavior.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.families.len().cmp(&other.families.len()))
            .then_with(|| {
                self.families
                    .iter()
                    .zip(other.families.iter())
                    .map(|(a, b)| a.compare_to(b))
                    .find(|ord| ord.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| hash_difference(self.attributes.hash_code(), other.attributes.hash_code()))
    }

    /// Name hash, version, each family hash (xor-folded), and attribute hash.
    pub fn hash_code(&self) -> i32 {
        let families = self
            .families
            .iter()
            .fold(0i32, |acc, family| acc ^ family.hash_code());
        hash_code(&self.name) ^ TABLE_DESCRIPTOR_VERSION ^ families ^ self.attributes.hash_code()
    }

    /// Rendering with reserved attributes and family settings at their
    /// defaults left out.
    pub fn to_string_customized_values(&self) -> String {
        let mut s = format!("'{}'", self.name_as_string);
        s.push_str(&self.attributes.render(false, || self.servers()));
        for family in self.families.iter() {
            s.push_str(", ");
            s.push_str(&family.to_string_customized_values());
        }
        s
    }
}

/// `'name', {METHOD => 'table_att', ...}, {NAME => 'family', ...}, ...`
impl fmt::Display for TableDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.name_as_string)?;
        f.write_str(&self.attributes.render(true, || self.servers()))?;
        for family in self.families.iter() {
            write!(f, ", {family}")?;
        }
        Ok(())
    }
}

impl PartialEq for TableDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for TableDescriptor {}

impl PartialOrd for TableDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TableDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for TableDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::family::ColumnFamilyDescriptor;
    use crate::server::ServerAddress;
    use crate::types::*;

    use super::*;

    #[test]
    fn test_orders_by_name_first() {
        let a = TableDescriptor::new("a").unwrap();
        let mut b = TableDescriptor::new("b").unwrap();
        b.add_family(ColumnFamilyDescriptor::new("cf")).unwrap();
        assert_eq!(a.compare_to(&b), Ordering::Less);
        assert_eq!(b.compare_to(&a), Ordering::Greater);
    }

    #[test]
    fn test_family_count_then_families() {
        let mut one = TableDescriptor::new("t").unwrap();
        one.add_family(ColumnFamilyDescriptor::new("z")).unwrap();
        let mut two = TableDescriptor::new("t").unwrap();
        two.add_family(ColumnFamilyDescriptor::new("a")).unwrap();
        two.add_family(ColumnFamilyDescriptor::new("b")).unwrap();
        assert_eq!(one.compare_to(&two), Ordering::Less);

        let mut other = TableDescriptor::new("t").unwrap();
        other.add_family(ColumnFamilyDescriptor::new("y")).unwrap();
        assert_eq!(other.compare_to(&one), Ordering::Less);
    }

    #[test]
    fn test_attributes_break_ties() {
        let plain = TableDescriptor::new("t").unwrap();
        let mut tagged = TableDescriptor::new("t").unwrap();
        tagged.set_value_str("owner", Some("ops"));
        assert_ne!(plain, tagged);
        assert_eq!(plain, TableDescriptor::new("t").unwrap());
    }

    #[test]
    fn test_equal_descriptors_hash_equal() {
        let mut a = TableDescriptor::new("t").unwrap();
        a.add_family(ColumnFamilyDescriptor::new("cf")).unwrap();
        a.set_read_only(true);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());

        let set: HashSet<TableDescriptor> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_family_hashes_fold_order_independent() {
        let mut a = TableDescriptor::new("t").unwrap();
        a.add_family(ColumnFamilyDescriptor::new("x")).unwrap();
        a.add_family(ColumnFamilyDescriptor::new("y")).unwrap();
        let expected = hash_code(b"t")
            ^ TABLE_DESCRIPTOR_VERSION
            ^ ColumnFamilyDescriptor::new("x").hash_code()
            ^ ColumnFamilyDescriptor::new("y").hash_code()
            ^ crate::encoding::bytes::map_hash_code(a.values());
        assert_eq!(a.hash_code(), expected);
    }

    #[test]
    fn test_display_plain_table() {
        let desc = TableDescriptor::new("users").unwrap();
        assert_eq!(desc.to_string_customized_values(), "'users'");
        // IS_ROOT/IS_META are false and never shown.
        assert_eq!(desc.to_string(), "'users'");
    }

    #[test]
    fn test_display_defaults_vs_customized() {
        let mut desc = TableDescriptor::new("users").unwrap();
        desc.set_read_only(false);
        desc.set_max_file_size(DEFAULT_MAX_FILESIZE);
        assert_eq!(desc.to_string_customized_values(), "'users'");
        assert_eq!(
            desc.to_string(),
            "'users', {METHOD => 'table_att', MAX_FILESIZE => '268435456', READONLY => 'false'}"
        );

        desc.set_read_only(true);
        assert_eq!(
            desc.to_string_customized_values(),
            "'users', {METHOD => 'table_att', READONLY => 'true'}"
        );
    }

    #[test]
    fn test_display_with_families_and_servers() {
        let mut desc = TableDescriptor::new("users").unwrap();
        desc.add_family(ColumnFamilyDescriptor::new("cf").with_max_versions(1))
            .unwrap();
        desc.set_servers(Some([
            ServerAddress::new("c", 3),
            ServerAddress::new("a", 1),
            ServerAddress::new("b", 2),
        ]))
        .unwrap();
        desc.set_value_str("owner", Some("ops"));

        assert_eq!(
            desc.to_string_customized_values(),
            "'users', {METHOD => 'table_att', SERVER_SET => [ 'a:1', 'b:2', 'c:3' ], \
             CONFIG => {'owner' => 'ops'}}, {NAME => 'cf', VERSIONS => '1'}"
        );
    }

    #[test]
    fn test_display_wal_disabled_in_config_block() {
        let mut desc = TableDescriptor::new("t").unwrap();
        desc.set_wal_disabled(true);
        assert!(desc.is_wal_disabled());
        assert_eq!(
            desc.to_string_customized_values(),
            "'t', {METHOD => 'table_att', CONFIG => {'DISABLE_WAL' => 'true'}}"
        );
        assert_eq!(
            desc.to_string(),
            "'t', {METHOD => 'table_att', CONFIG => {'DISABLE_WAL' => 'true'}}"
        );
    }

    #[test]
    fn test_display_catalog_table() {
        let meta = TableDescriptor::new(META_TABLE_NAME).unwrap();
        assert_eq!(
            meta.to_string_customized_values(),
            "'.META.', {METHOD => 'table_att', IS_META => 'true'}"
        );
    }
}

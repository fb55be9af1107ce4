//! Versioned binary encoding of a table descriptor.
//!
//! Layout (all integers big-endian):
//! ```text
//! i32            descriptor version (currently 5)
//! vlong + bytes  table name
//! u8             is root region (0/1)
//! u8             is meta region (0/1)
//! i32            attribute count
//!   i32 + bytes    key    } repeated
//!   i32 + bytes    value  }
//! i32            family count
//!   family         column family encoding, repeated, in name order
//! ```
//!
//! Versions 3, 4 and 5 share this layout. Anything older is rejected.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::encoding::{DataInput, DataOutput, bytes};
use crate::error::EncodingError;
use crate::family::ColumnFamilyDescriptor;
use crate::types::{MIN_TABLE_DESCRIPTOR_VERSION, TABLE_DESCRIPTOR_VERSION};

use super::TableDescriptor;

impl TableDescriptor {
    /// Encode at the current version.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = DataOutput::with_capacity(64);
        self.write(&mut out);
        out.into_inner()
    }

    pub fn write(&self, out: &mut DataOutput) {
        out.write_i32(TABLE_DESCRIPTOR_VERSION);
        out.write_byte_array(&self.name);
        out.write_bool(self.is_root_region());
        out.write_bool(self.is_meta_region());
        out.write_len(self.attributes.len());
        for (key, value) in self.attributes.entries() {
            out.write_writable_bytes(key);
            out.write_writable_bytes(value);
        }
        out.write_len(self.families.len());
        for family in self.families.iter() {
            family.write(out);
        }
    }

    /// Decode a descriptor from the start of `data`.
    ///
    /// Returns the descriptor and the number of bytes consumed.
    pub fn decode_prefix(data: &[u8]) -> Result<(Self, usize), EncodingError> {
        let mut input = DataInput::new(data);
        let desc = Self::read(&mut input)?;
        Ok((desc, input.position()))
    }

    /// Decode a descriptor from `data`, ignoring any trailing bytes.
    pub fn decode(data: &[u8]) -> Result<Self, EncodingError> {
        Self::decode_prefix(data).map(|(desc, _)| desc)
    }

    pub fn read(input: &mut DataInput<'_>) -> Result<Self, EncodingError> {
        let version = input.read_i32()?;
        if version < MIN_TABLE_DESCRIPTOR_VERSION {
            return Err(EncodingError::VersionUnsupported {
                version,
                minimum: MIN_TABLE_DESCRIPTOR_VERSION,
            });
        }

        let name = input.read_byte_array()?;
        let stream_root = input.read_bool()?;
        let stream_meta = input.read_bool()?;

        let attribute_count = input.read_len()?;
        let mut values = BTreeMap::new();
        for _ in 0..attribute_count {
            let key = input.read_writable_bytes()?;
            let value = input.read_writable_bytes()?;
            values.insert(key, value);
        }

        let family_count = input.read_len()?;
        let mut families = Vec::with_capacity(family_count.min(64));
        for _ in 0..family_count {
            families.push(ColumnFamilyDescriptor::read(input)?);
        }

        let mut desc = Self::empty();
        desc.apply_decoded(name, values, families);

        if desc.is_root_region() != stream_root || desc.is_meta_region() != stream_meta {
            warn!(
                table = %desc.name_as_string,
                stream_root,
                stream_meta,
                "catalog flags in stream disagree with attributes; attributes win"
            );
        }
        debug!(
            table = %desc.name_as_string,
            version,
            attributes = desc.attributes.len(),
            families = desc.families.len(),
            "decoded table descriptor"
        );
        Ok(desc)
    }

    /// Replace this descriptor's entire state with a decoded one.
    ///
    /// On error `self` is left unchanged.
    pub fn read_fields(&mut self, data: &[u8]) -> Result<usize, EncodingError> {
        let (decoded, consumed) = Self::decode_prefix(data)?;
        *self = decoded;
        Ok(consumed)
    }

    fn apply_decoded(
        &mut self,
        name: Vec<u8>,
        values: BTreeMap<Vec<u8>, Vec<u8>>,
        families: Vec<ColumnFamilyDescriptor>,
    ) {
        self.name_as_string = bytes::to_string(&name);
        self.name = name;
        self.attributes.replace_all(values);
        self.families.clear();
        for family in families {
            // Decoded families keep whatever name the stream carried.
            if let Err(e) = self.families.add(family) {
                warn!(table = %self.name_as_string, error = %e, "dropping decoded family");
            }
        }
        self.flags.clear();
        self.placement.clear();
    }

    /// Encode into a writer.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), EncodingError> {
        writer.write_all(&self.encode())?;
        Ok(())
    }

    /// Read everything from `reader` and decode it.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, EncodingError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::decode(&buf)
    }
}

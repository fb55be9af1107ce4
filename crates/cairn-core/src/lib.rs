//! # Cairn
//!
//! Table descriptors for a column-family store: the metadata record naming
//! a table, its attributes, and its column families, with a versioned
//! binary encoding compatible with the store's on-disk format.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cairn_core::descriptor::TableDescriptor;
//! use cairn_core::family::ColumnFamilyDescriptor;
//! use cairn_core::server::ServerAddress;
//!
//! let mut desc = TableDescriptor::new("users").unwrap();
//! desc.add_family(ColumnFamilyDescriptor::new("profile").with_max_versions(1))
//!     .unwrap();
//! desc.set_read_only(true);
//! desc.set_servers(Some([
//!     ServerAddress::new("rs1", 60020),
//!     ServerAddress::new("rs2", 60020),
//!     ServerAddress::new("rs3", 60020),
//! ]))
//! .unwrap();
//!
//! let bytes = desc.encode();
//! let decoded = TableDescriptor::decode(&bytes).unwrap();
//! assert_eq!(decoded, desc);
//! println!("{}", decoded.to_string_customized_values());
//! ```

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod encoding;
pub mod error;
pub mod family;
pub mod server;
pub mod transport;
pub mod types;

pub use descriptor::{TableDescriptor, default_values, is_legal_table_name};
pub use error::{Error, Result};
pub use family::ColumnFamilyDescriptor;
pub use server::ServerAddress;

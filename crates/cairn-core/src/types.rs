//! Core constants: catalog table names, reserved attribute keys, defaults,
//! and format versions.

/// Current table descriptor wire version.
///
/// Version 3 added the byte-keyed attribute map. Version 4 added indexes,
/// which version 5 removed again; neither changed the encoded layout.
pub const TABLE_DESCRIPTOR_VERSION: i32 = 5;

/// Oldest descriptor version the codec can read.
pub const MIN_TABLE_DESCRIPTOR_VERSION: i32 = 3;

/// Current column family wire version.
pub const COLUMN_DESCRIPTOR_VERSION: u8 = 1;

/// Name of the root catalog table.
pub const ROOT_TABLE_NAME: &[u8] = b"-ROOT-";

/// Name of the meta catalog table.
pub const META_TABLE_NAME: &[u8] = b".META.";

/// Family holding catalog rows in the root and meta tables.
pub const CATALOG_FAMILY: &[u8] = b"info";

/// Family recording the sequence id history of catalog regions.
pub const CATALOG_HISTORIAN_FAMILY: &[u8] = b"historian";

// ---------------------------------------------------------------------------
// Reserved table attribute keys
// ---------------------------------------------------------------------------

pub const MAX_FILESIZE: &str = "MAX_FILESIZE";
pub const READONLY: &str = "READONLY";
pub const MEMSTORE_FLUSHSIZE: &str = "MEMSTORE_FLUSHSIZE";
pub const IS_ROOT: &str = "IS_ROOT";
pub const IS_META: &str = "IS_META";
pub const DEFERRED_LOG_FLUSH: &str = "DEFERRED_LOG_FLUSH";
pub const DISABLE_WAL: &str = "DISABLE_WAL";
pub const SERVER_SET: &str = "SERVER_SET";

/// Rendering keyword grouping non-reserved attributes.
pub const CONFIG: &str = "CONFIG";

/// Textual boolean encodings used for flag attributes.
pub const TRUE: &[u8] = b"true";
pub const FALSE: &[u8] = b"false";

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_READONLY: bool = false;

/// 64 MiB.
pub const DEFAULT_MEMSTORE_FLUSH_SIZE: u64 = 1024 * 1024 * 64;

/// 16 MiB.
pub const DEFAULT_MEMSTORE_COLUMNFAMILY_FLUSH_SIZE: u64 = 1024 * 1024 * 16;

/// 256 MiB.
pub const DEFAULT_MAX_FILESIZE: u64 = 1024 * 1024 * 256;

pub const DEFAULT_DEFERRED_LOG_FLUSH: bool = true;

pub const DEFAULT_WAL_DISABLED: bool = false;

/// Minimum number of servers in a placement hint.
pub const MIN_PLACEMENT_SERVERS: usize = 3;

// ---------------------------------------------------------------------------
// Column family settings
// ---------------------------------------------------------------------------

pub const FAMILY_VERSIONS: &str = "VERSIONS";
pub const FAMILY_IN_MEMORY: &str = "IN_MEMORY";
pub const FAMILY_BLOCKSIZE: &str = "BLOCKSIZE";
pub const FAMILY_BLOCKCACHE: &str = "BLOCKCACHE";
pub const FAMILY_TTL: &str = "TTL";
pub const FAMILY_REPLICATION_SCOPE: &str = "REPLICATION_SCOPE";
pub const FAMILY_COMPRESSION: &str = "COMPRESSION";
pub const FAMILY_BLOOMFILTER: &str = "BLOOMFILTER";

pub const DEFAULT_FAMILY_VERSIONS: i32 = 3;
pub const DEFAULT_FAMILY_IN_MEMORY: bool = false;
pub const DEFAULT_FAMILY_BLOCKSIZE: i32 = 64 * 1024;
pub const DEFAULT_FAMILY_BLOCKCACHE: bool = true;
pub const DEFAULT_FAMILY_COMPRESSION: &str = "NONE";
pub const DEFAULT_FAMILY_BLOOMFILTER: &str = "NONE";

/// TTL value meaning cells never expire.
pub const FOREVER: i32 = i32::MAX;

/// Keep every version of a cell.
pub const ALL_VERSIONS: i32 = i32::MAX;

pub const WEEK_IN_SECONDS: i32 = 7 * 24 * 3600;

pub const REPLICATION_SCOPE_LOCAL: i32 = 0;
pub const REPLICATION_SCOPE_GLOBAL: i32 = 1;

pub const DEFAULT_FAMILY_TTL: i32 = FOREVER;
pub const DEFAULT_FAMILY_REPLICATION_SCOPE: i32 = REPLICATION_SCOPE_LOCAL;

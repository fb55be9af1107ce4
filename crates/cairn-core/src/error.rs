//! Error types for all cairn descriptor operations.

use std::io;
use thiserror::Error;

/// Top-level error type for cairn operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Invalid arguments supplied to a descriptor constructor or mutator.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("table name is empty")]
    EmptyTableName,

    #[error(
        "illegal first character <{byte}> at 0. User-space table names can only start with \
         'word characters': i.e. [a-zA-Z_0-9]: {name}"
    )]
    IllegalFirstCharacter { byte: u8, name: String },

    #[error(
        "illegal character <{byte}> at {position}. User-space table names can only contain \
         'word characters': i.e. [a-zA-Z_0-9-.]: {name}"
    )]
    IllegalCharacter {
        byte: u8,
        position: usize,
        name: String,
    },

    #[error("family name cannot be empty")]
    EmptyFamilyName,

    #[error("must provide at least {min} servers (got {actual})")]
    TooFewServers { min: usize, actual: usize },

    #[error("invalid server address '{0}': expected host:port")]
    InvalidServerAddress(String),
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("unsupported descriptor version {version} (minimum is {minimum})")]
    VersionUnsupported { version: i32, minimum: i32 },

    #[error("unsupported column family version {0}")]
    FamilyVersionUnsupported(u8),

    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("invalid length prefix: {0}")]
    InvalidLength(i64),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

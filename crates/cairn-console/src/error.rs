use std::io;
use std::path::PathBuf;

use cairn_core::error::{ConfigError, DescriptorError, EncodingError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid table spec: {0}")]
    Spec(#[from] serde_json::Error),
}

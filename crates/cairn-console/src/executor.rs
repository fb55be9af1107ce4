use std::fs;
use std::path::Path;

use cairn_core::catalog::{meta_table_descriptor, root_table_descriptor_for};
use cairn_core::config::CairnConfig;
use cairn_core::{TableDescriptor, default_values, is_legal_table_name};
use tracing::{debug, info};

use crate::commands::{CatalogTable, Command};
use crate::error::ConsoleError;
use crate::spec_file::TableSpec;

/// Structured result from executing a command.
pub enum CommandResult {
    /// Plain confirmation message.
    Ok(String),
    /// Reserved attribute defaults, ordered by key.
    Defaults(Vec<(String, String)>),
    /// A descriptor to print, fully or with defaults hidden.
    Descriptor {
        desc: TableDescriptor,
        customized: bool,
    },
}

/// Execute a parsed command.
pub fn execute(cmd: Command, config: Option<&CairnConfig>) -> Result<CommandResult, ConsoleError> {
    match cmd {
        Command::ValidateName { name } => {
            is_legal_table_name(name.as_bytes())?;
            Ok(CommandResult::Ok(format!("'{name}' is a legal table name")))
        }
        Command::Defaults => Ok(CommandResult::Defaults(
            default_values()
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )),
        Command::Catalog { table } => {
            let desc = match table {
                CatalogTable::Root => root_table_descriptor_for(config),
                CatalogTable::Meta => meta_table_descriptor(),
            };
            Ok(CommandResult::Descriptor {
                desc,
                customized: false,
            })
        }
        Command::Encode { spec, output } => exec_encode(&spec, &output),
        Command::Decode { input, customized } => exec_decode(&input, customized),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ConsoleError> {
    fs::read(path).map_err(|source| ConsoleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn exec_encode(spec: &Path, output: &Path) -> Result<CommandResult, ConsoleError> {
    let raw = read_file(spec)?;
    let json = String::from_utf8_lossy(&raw);
    let desc = TableSpec::from_json(&json)?.into_descriptor()?;
    let encoded = desc.encode();
    fs::write(output, &encoded).map_err(|source| ConsoleError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    info!(table = %desc.name_as_string(), path = %output.display(), bytes = encoded.len(), "wrote descriptor");
    Ok(CommandResult::Ok(format!(
        "Wrote {} ({} bytes) to {}",
        desc.name_as_string(),
        encoded.len(),
        output.display()
    )))
}

fn exec_decode(input: &Path, customized: bool) -> Result<CommandResult, ConsoleError> {
    let raw = read_file(input)?;
    let (desc, consumed) = TableDescriptor::decode_prefix(&raw)?;
    if consumed < raw.len() {
        debug!(
            path = %input.display(),
            trailing = raw.len() - consumed,
            "ignoring bytes after descriptor"
        );
    }
    Ok(CommandResult::Descriptor { desc, customized })
}

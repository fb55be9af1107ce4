use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

/// A console subcommand.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether NAME is a legal user table name.
    ValidateName { name: String },
    /// List reserved table attributes and their defaults.
    Defaults,
    /// Print a built-in catalog table descriptor.
    Catalog {
        #[arg(value_enum)]
        table: CatalogTable,
    },
    /// Build a descriptor from a JSON table spec and write its binary form.
    Encode {
        /// JSON table spec to read.
        spec: PathBuf,
        /// Where to write the encoded descriptor.
        output: PathBuf,
    },
    /// Decode a binary descriptor file and print it.
    Decode {
        input: PathBuf,
        /// Hide reserved attributes and family settings left at their defaults.
        #[arg(long)]
        customized: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogTable {
    Root,
    Meta,
}

// Storage module for reading inputs and persisting results
// Author: Gabriel Demetrios Lafis

mod file;

pub use file::*;

use std::path::PathBuf;

use thiserror::Error;

use crate::data::{DataError, DataSet};

/// Represents a data storage addressed by file name
pub trait DataStorage {
    /// Store a dataset
    fn store(&self, name: &str, data: &DataSet) -> Result<(), StorageError>;

    /// Load a dataset
    fn load(&self, name: &str) -> Result<DataSet, StorageError>;

    /// Check if a dataset exists
    fn exists(&self, name: &str) -> bool;
}

/// Represents an error in the storage module
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

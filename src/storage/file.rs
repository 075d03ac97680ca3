// File storage implementation
// Author: Gabriel Demetrios Lafis

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::data::{CsvSink, CsvSource, DataSet, DataSource, EUROSTAT_MISSING};
use super::{DataStorage, StorageError};

/// File format for storage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    /// Get the field delimiter for this format
    pub fn delimiter(&self) -> u8 {
        match self {
            FileFormat::Csv => b',',
            FileFormat::Tsv => b'\t',
        }
    }

    /// Parse a file format from a file extension
    pub fn from_extension(ext: &str) -> Result<Self, StorageError> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "tsv" | "tab" => Ok(FileFormat::Tsv),
            _ => Err(StorageError::InvalidFormat(format!(
                "Unknown file format: {}",
                ext
            ))),
        }
    }

    /// Infer the file format of a path
    pub fn from_path(path: &Path) -> Result<Self, StorageError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                StorageError::InvalidFormat(format!("'{}' has no extension", path.display()))
            })?;
        Self::from_extension(ext)
    }
}

/// File storage rooted at a data directory.
///
/// Inputs are read with the Eurostat missing-value marker. Outputs are always
/// comma delimited and are written to a temporary sibling first, then renamed
/// into place, so a failed write never leaves a partial file behind.
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a new file storage
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        FileStorage {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the path for a file in the data directory
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }
}

impl DataStorage for FileStorage {
    fn store(&self, name: &str, data: &DataSet) -> Result<(), StorageError> {
        let path = self.path_of(name);

        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir)?;
        }

        let tmp_path = path.with_extension("tmp");
        let written = File::create(&tmp_path)
            .map_err(StorageError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                CsvSink::new(&path, FileFormat::Csv.delimiter()).write_to(data, &mut writer)?;
                writer.flush()?;
                Ok(())
            });

        let stored =
            written.and_then(|()| fs::rename(&tmp_path, &path).map_err(StorageError::from));
        if let Err(err) = stored {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }

        debug!("Wrote {} rows to {}", data.len(), path.display());

        Ok(())
    }

    fn load(&self, name: &str) -> Result<DataSet, StorageError> {
        let path = self.path_of(name);

        if !path.exists() {
            return Err(StorageError::NotFound(path));
        }

        let format = FileFormat::from_path(&path)?;
        let source = CsvSource::new(&path, format.delimiter()).with_na_value(EUROSTAT_MISSING);
        let dataset = source.read()?;
        debug!("Read {} rows from {}", dataset.len(), path.display());

        Ok(dataset)
    }

    fn exists(&self, name: &str) -> bool {
        self.path_of(name).exists()
    }
}

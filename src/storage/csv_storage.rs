use super::base::{StorageBackend, StorageError};
use crate::core::record::{ProductRecord, CSV_HEADER};
use async_trait::async_trait;
use csv::{Terminator, WriterBuilder};
use log::debug;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Writes one `<name>.csv` per job under `base_path`. Every write opens the
/// file in append mode and closes it again.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    base_path: PathBuf,
}

impl CsvStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, StorageError> {
        let stem = sanitize_file_stem(name);
        if stem.is_empty() {
            return Err(StorageError::InvalidDestination(format!(
                "empty output name {:?}",
                name
            )));
        }
        Ok(self.base_path.join(format!("{}.csv", stem)))
    }

    fn append_row(&self, path: &Path, row: &[&str]) -> Result<(), StorageError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for CsvStorage {
    async fn initialize(&self, name: &str) -> Result<PathBuf, StorageError> {
        let path = self.path_for(name)?;
        self.append_row(&path, &CSV_HEADER)?;
        debug!("Initialized {}", path.display());
        Ok(path)
    }

    async fn store(&self, name: &str, record: &ProductRecord) -> Result<(), StorageError> {
        let path = self.path_for(name)?;
        self.append_row(&path, &record.to_csv_record())
    }
}

/// Replaces path separators, reserved and control characters with `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

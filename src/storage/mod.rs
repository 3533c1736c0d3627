pub mod base;
pub mod csv_storage;

pub use base::{StorageBackend, StorageError};
pub use csv_storage::{sanitize_file_stem, CsvStorage};

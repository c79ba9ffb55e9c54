use crate::utils::Result;
use std::{
    fs::{File, OpenOptions},
    path::Path,
};

/// Opens a file for appending, creating it if it does not exist yet.
pub fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open {} for appending: {}", path.display(), e))
}

pub fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| format!("Failed to create {}: {}", path.display(), e))
}

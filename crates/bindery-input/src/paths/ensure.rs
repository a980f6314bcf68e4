use std::fs;

use bindery_common::StoreError;

use super::resolve::data_dir;

/// Creates the data directory holding persisted overrides.
///
/// The config directory is created by the config loader on first run.
pub fn ensure_dirs() -> Result<(), StoreError> {
    fs::create_dir_all(data_dir()?).map_err(|e| StoreError::PathError(e.to_string()))
}

use std::path::PathBuf;

use bindery_common::StoreError;

const APP_NAME: &str = "bindery";

fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf, StoreError> {
    base.map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| StoreError::PathError(format!("could not determine {kind} directory")))
}

/// Returns the platform-specific data directory.
///
/// - macOS: `~/Library/Application Support/bindery`
/// - Linux: `$XDG_DATA_HOME/bindery` (defaults to `~/.local/share/bindery`)
/// - Windows: `%APPDATA%\bindery`
pub fn data_dir() -> Result<PathBuf, StoreError> {
    app_dir(dirs::data_dir(), "data")
}

/// Default backing file of the override key-value store.
///
/// Located at `data_dir()/overrides.json`.
pub fn overrides_file() -> Result<PathBuf, StoreError> {
    Ok(data_dir()?.join("overrides.json"))
}

/// Default directory scanned for icon map files, next to `config.toml`.
pub fn icons_dir() -> Result<PathBuf, StoreError> {
    Ok(app_dir(dirs::config_dir(), "config")?.join("icons"))
}

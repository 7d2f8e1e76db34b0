use crate::error::{Result, StoreError};
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "sift";
const CATALOG_FILENAME: &str = "catalog.json";

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_DATA_HOME") {
        let path = PathBuf::from(dir);
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidDataPath(path));
        }
        return Ok(path.join(APP_DIR));
    }

    let home = dirs::home_dir().ok_or(StoreError::MissingHomeDir)?;
    Ok(home.join(".local").join("share").join(APP_DIR))
}

pub fn default_catalog_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(CATALOG_FILENAME))
}

/// Picks the catalog from the command line, then the config file, then the
/// data directory.
pub fn resolve_catalog_path(
    custom: Option<PathBuf>,
    configured: Option<PathBuf>,
) -> Result<PathBuf> {
    match custom.or(configured) {
        Some(path) if path.as_os_str().is_empty() => Err(StoreError::InvalidDataPath(path)),
        Some(path) => Ok(path),
        None => default_catalog_path(),
    }
}

//! Application configuration

use crate::catalogue::remote::is_remote;
use crate::catalogue::{CatalogueSource, JsonFileCatalogue, RemoteCatalogue};
use crate::favourites::{LocalStorageFile, FAVOURITES_KEY};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the catalogue comes from and where favourites are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalogue file path or http(s) URL
    pub catalogue: String,

    /// Local-storage file holding the favourites
    pub favourites_file: PathBuf,

    /// Key the favourites are stored under in that file
    pub storage_key: String,

    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue: "data/properties.json".to_string(),
            favourites_file: PathBuf::from(".estate-catalogue/local-storage.json"),
            storage_key: FAVOURITES_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        info!("Loading config from {:?}", path);
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Catalogue source for the configured location.
    pub fn catalogue_source(&self) -> Result<Box<dyn CatalogueSource>> {
        if is_remote(&self.catalogue) {
            Ok(Box::new(RemoteCatalogue::new(&self.catalogue)?))
        } else {
            Ok(Box::new(JsonFileCatalogue::new(&self.catalogue)))
        }
    }

    pub fn favourites_store(&self) -> LocalStorageFile {
        LocalStorageFile::with_key(&self.favourites_file, &self.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.catalogue, "data/properties.json");
        assert_eq!(config.storage_key, "favouriteProperties");
        assert_eq!(config.favourites_store().path(), config.favourites_file.as_path());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"catalogue":"https://example.com/p.json"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config,
            Config {
                catalogue: "https://example.com/p.json".to_string(),
                ..Config::default()
            }
        );
        assert!(config.catalogue_source().unwrap().source_name().starts_with("https://"));
    }

    #[test]
    fn test_file_catalogue_source() {
        let config = Config::default();
        assert_eq!(
            config.catalogue_source().unwrap().source_name(),
            "file:data/properties.json"
        );
    }

    #[test]
    fn test_bad_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").unwrap();
        assert!(Config::load_from(&path).is_err());
        assert!(Config::load_from(&dir.path().join("missing.json")).is_err());
    }
}

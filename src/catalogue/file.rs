use crate::catalogue::traits::CatalogueSource;
use crate::models::Property;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Catalogue read from a JSON file on disk, e.g. the bundled `data/properties.json`.
///
/// Accepts either a bare array of records or an object with a `properties` array.
pub struct JsonFileCatalogue {
    path: PathBuf,
}

impl JsonFileCatalogue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse catalogue JSON text.
pub fn parse_catalogue(json: &str) -> Result<Vec<Property>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Document {
        List(Vec<Property>),
        Wrapped { properties: Vec<Property> },
    }

    let document: Document =
        serde_json::from_str(json).context("Catalogue JSON does not match the property schema")?;
    Ok(match document {
        Document::List(properties) | Document::Wrapped { properties } => properties,
    })
}

#[async_trait]
impl CatalogueSource for JsonFileCatalogue {
    async fn load(&self) -> Result<Vec<Property>> {
        debug!("Reading catalogue from {}", self.path.display());

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalogue file {}", self.path.display()))?;
        let properties = parse_catalogue(&json)
            .with_context(|| format!("Failed to parse catalogue file {}", self.path.display()))?;

        info!("Loaded {} properties from {}", properties.len(), self.path.display());
        Ok(properties)
    }

    fn source_name(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RECORD: &str = r#"{"id":1,"type":"house","price":450000,"bedrooms":4,"postcode":"BR1 3QD"}"#;

    #[test]
    fn test_parse_bare_array() {
        let properties = parse_catalogue(&format!("[{}]", RECORD)).unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].postcode, "BR1 3QD");
    }

    #[test]
    fn test_parse_wrapped_object() {
        let properties = parse_catalogue(&format!(r#"{{"properties":[{0},{0}]}}"#, RECORD)).unwrap();
        assert_eq!(properties.len(), 2);
    }

    #[test]
    fn test_parse_rejects_wrong_schema() {
        assert!(parse_catalogue(r#"[{"id":1}]"#).is_err());
        assert!(parse_catalogue("not json").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("properties.json");
        std::fs::write(&path, format!("[{}]", RECORD)).unwrap();

        let source = JsonFileCatalogue::new(&path);
        let properties = source.load().await.unwrap();
        assert_eq!(properties[0].property_type, "house");
        assert!(source.source_name().starts_with("file:"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let source = JsonFileCatalogue::new(dir.path().join("nope.json"));
        let err = source.load().await.unwrap_err();
        assert!(err.to_string().contains("Failed to read catalogue file"));
    }
}

pub mod file;
pub mod remote;
pub mod traits;

pub use file::JsonFileCatalogue;
pub use remote::RemoteCatalogue;
pub use traits::CatalogueSource;

use crate::models::{Property, PropertyId};
use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::info;

/// The full set of listings, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Catalogue {
    properties: Vec<Property>,
    index: HashMap<PropertyId, usize>,
}

impl Catalogue {
    /// Build a catalogue, rejecting duplicate ids and listings without images.
    pub fn new(properties: Vec<Property>) -> Result<Self> {
        let mut index = HashMap::with_capacity(properties.len());
        for (position, property) in properties.iter().enumerate() {
            if property.images.is_empty() {
                anyhow::bail!("Property {} has no images", property.id);
            }
            if index.insert(property.id.clone(), position).is_some() {
                anyhow::bail!("Duplicate property id {} in catalogue", property.id);
            }
        }
        Ok(Self { properties, index })
    }

    /// Load and validate a catalogue from `source`.
    pub async fn load(source: &dyn CatalogueSource) -> Result<Self> {
        info!("Loading catalogue from {}", source.source_name());
        let properties = source
            .load()
            .await
            .with_context(|| format!("Failed to load catalogue from {}", source.source_name()))?;
        Self::new(properties)
    }

    /// All listings in catalogue order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.index.get(id).map(|&i| &self.properties[i])
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

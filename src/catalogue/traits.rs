use crate::models::Property;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can supply the property catalogue
/// (bundled file, remote JSON feed).
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Load every property record. Called once at startup.
    async fn load(&self) -> Result<Vec<Property>>;

    /// Human-readable name of the source, used in logs
    fn source_name(&self) -> String;
}

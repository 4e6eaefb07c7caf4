use crate::catalogue::file::parse_catalogue;
use crate::catalogue::traits::CatalogueSource;
use crate::models::Property;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Catalogue served as JSON over HTTP, e.g. a static `properties.json`
/// published next to the site.
pub struct RemoteCatalogue {
    client: Client,
    url: String,
}

impl RemoteCatalogue {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Whether a catalogue location names an HTTP(S) resource rather than a file.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[async_trait]
impl CatalogueSource for RemoteCatalogue {
    async fn load(&self) -> Result<Vec<Property>> {
        debug!("Fetching catalogue from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to fetch catalogue")?;

        if !response.status().is_success() {
            warn!("Catalogue host returned status: {}", response.status());
            anyhow::bail!("Failed to fetch catalogue: {}", response.status());
        }

        let body = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of catalogue JSON", body.len());

        let properties = parse_catalogue(&body)?;
        info!("Loaded {} properties from {}", properties.len(), self.url);
        Ok(properties)
    }

    fn source_name(&self) -> String {
        self.url.clone()
    }
}

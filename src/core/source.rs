use crate::domain::model::FeatureCollection;
use crate::utils::error::{QuakeMapError, Result};
use reqwest::Client;

pub const USGS_ALL_WEEK_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const PB2002_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// A remote GeoJSON document fetched with a single GET.
#[derive(Debug, Clone)]
pub struct GeoJsonSource {
    client: Client,
    url: String,
}

impl GeoJsonSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<FeatureCollection> {
        tracing::debug!("Making API request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(QuakeMapError::HttpStatus {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let collection: FeatureCollection = response.json().await?;
        tracing::debug!(
            "Fetched {} features from {}",
            collection.features.len(),
            self.url
        );
        Ok(collection)
    }
}

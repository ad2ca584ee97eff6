pub mod cli;
pub mod toml_config;

use crate::core::source::{PB2002_BOUNDARIES_URL, USGS_ALL_WEEK_URL};
use crate::core::ConfigProvider;
use crate::domain::model::{LatLng, MapVariant, MapView, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const MAX_ZOOM: u8 = 18;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "quake-map")]
#[command(about = "Render the past week's earthquakes on a Leaflet map")]
pub struct CliConfig {
    #[arg(long, default_value = USGS_ALL_WEEK_URL)]
    pub earthquakes_url: String,

    #[arg(long, default_value = PB2002_BOUNDARIES_URL)]
    pub plates_url: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, default_value_t = MapVariant::Tectonic)]
    pub variant: MapVariant,

    #[arg(long, default_value_t = DEFAULT_CENTER.lat, allow_negative_numbers = true)]
    pub center_lat: f64,

    #[arg(long, default_value_t = DEFAULT_CENTER.lng, allow_negative_numbers = true)]
    pub center_lng: f64,

    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    #[arg(long, env = "THUNDERFOREST_API_KEY", hide_env_values = true)]
    pub thunderforest_api_key: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn earthquakes_url(&self) -> &str {
        &self.earthquakes_url
    }

    fn plates_url(&self) -> &str {
        &self.plates_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn variant(&self) -> MapVariant {
        self.variant
    }

    fn map_view(&self) -> MapView {
        MapView {
            center: LatLng::new(self.center_lat, self.center_lng),
            zoom: self.zoom,
        }
    }

    fn thunderforest_api_key(&self) -> Option<&str> {
        self.thunderforest_api_key.as_deref()
    }
}

/// Checks shared by every `ConfigProvider`.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_url("earthquakes_url", config.earthquakes_url())?;
    if config.variant().includes_plates() {
        validation::validate_url("plates_url", config.plates_url())?;
    }
    validation::validate_path("output_path", config.output_path())?;

    let view = config.map_view();
    validation::validate_range("center_lat", view.center.lat, -90.0, 90.0)?;
    validation::validate_range("center_lng", view.center.lng, -180.0, 180.0)?;
    validation::validate_range("zoom", view.zoom, 0, MAX_ZOOM)?;

    if let Some(key) = config.thunderforest_api_key() {
        validation::validate_non_empty_string("thunderforest_api_key", key)?;
    }
    Ok(())
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["quake-map"]);
        assert_eq!(config.earthquakes_url, USGS_ALL_WEEK_URL);
        assert_eq!(config.variant, MapVariant::Tectonic);
        assert_eq!(config.map_view(), MapView::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::parse_from([
            "quake-map",
            "--variant",
            "basic",
            "--center-lng",
            "-120.5",
            "--zoom",
            "6",
            "--output-path",
            "/tmp/map",
        ]);
        assert_eq!(config.variant(), MapVariant::Basic);
        assert_eq!(config.map_view().center.lng, -120.5);
        assert_eq!(config.map_view().zoom, 6);
        assert_eq!(config.output_path(), "/tmp/map");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CliConfig::parse_from(["quake-map"]);
        config.zoom = 30;
        assert!(config.validate().is_err());

        let mut config = CliConfig::parse_from(["quake-map"]);
        config.earthquakes_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::parse_from(["quake-map", "--variant", "basic"]);
        config.plates_url = String::new();
        assert!(config.validate().is_ok());
    }
}

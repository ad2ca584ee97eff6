use crate::config::validate_provider;
use crate::core::source::{PB2002_BOUNDARIES_URL, USGS_ALL_WEEK_URL};
use crate::core::ConfigProvider;
use crate::domain::model::{LatLng, MapVariant, MapView, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::utils::error::{QuakeMapError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub tiles: TilesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub variant: MapVariant,
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            variant: MapVariant::default(),
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_earthquakes_url")]
    pub earthquakes: String,
    #[serde(default = "default_plates_url")]
    pub plates: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            earthquakes: default_earthquakes_url(),
            plates: default_plates_url(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TilesConfig {
    pub thunderforest_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_center() -> [f64; 2] {
    [DEFAULT_CENTER.lat, DEFAULT_CENTER.lng]
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

fn default_earthquakes_url() -> String {
    USGS_ALL_WEEK_URL.to_string()
}

fn default_plates_url() -> String {
    PB2002_BOUNDARIES_URL.to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuakeMapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuakeMapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${THUNDERFOREST_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuakeMapError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn earthquakes_url(&self) -> &str {
        &self.sources.earthquakes
    }

    fn plates_url(&self) -> &str {
        &self.sources.plates
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn variant(&self) -> MapVariant {
        self.map.variant
    }

    fn map_view(&self) -> MapView {
        MapView {
            center: LatLng::new(self.map.center[0], self.map.center[1]),
            zoom: self.map.zoom,
        }
    }

    /// A `${VAR}` left unsubstituted means the variable was not set.
    fn thunderforest_api_key(&self) -> Option<&str> {
        self.tiles
            .thunderforest_api_key
            .as_deref()
            .filter(|key| !key.starts_with("${"))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

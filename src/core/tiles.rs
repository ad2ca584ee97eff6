use crate::domain::model::TileLayer;
use url::form_urlencoded::byte_serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileProvider {
    OpenStreetMap,
    CartoLight,
    ThunderforestOutdoors,
}

impl TileProvider {
    /// Name shown in the layer control.
    pub fn display_name(self) -> &'static str {
        match self {
            TileProvider::OpenStreetMap => "Satellite",
            TileProvider::CartoLight => "Grayscale",
            TileProvider::ThunderforestOutdoors => "Outdoors",
        }
    }

    pub fn url_template(self) -> &'static str {
        match self {
            TileProvider::OpenStreetMap => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            TileProvider::CartoLight => "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            TileProvider::ThunderforestOutdoors => {
                "https://{s}.tile.thunderforest.com/outdoors/{z}/{x}/{y}.png?apikey={apikey}"
            }
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            TileProvider::OpenStreetMap => {
                r#"Map data &copy; <a href="https://openstreetmap.org">OpenStreetMap</a> contributors"#
            }
            TileProvider::CartoLight => {
                r#"&copy; <a href="https://carto.com/attributions">CARTO</a> contributors"#
            }
            TileProvider::ThunderforestOutdoors => {
                r#"&copy; <a href="https://www.thunderforest.com/maps/outdoors/">Thunderforest</a>"#
            }
        }
    }

    pub fn requires_api_key(self) -> bool {
        matches!(self, TileProvider::ThunderforestOutdoors)
    }

    /// Without a key the `apikey` query is dropped; the provider then serves watermarked tiles.
    pub fn tile_layer(self, api_key: Option<&str>) -> TileLayer {
        let template = self.url_template();
        let url_template = match (self.requires_api_key(), api_key) {
            (false, _) => template.to_string(),
            (true, Some(key)) => {
                let encoded: String = byte_serialize(key.as_bytes()).collect();
                template.replace("{apikey}", &encoded)
            }
            (true, None) => {
                tracing::warn!(
                    "No API key configured for the '{}' tile layer; tiles will be watermarked",
                    self.display_name()
                );
                template.replace("?apikey={apikey}", "")
            }
        };

        TileLayer {
            name: self.display_name().to_string(),
            url_template,
            attribution: self.attribution().to_string(),
        }
    }
}

impl TileLayer {
    /// Concrete tile URL on the first subdomain, without the retina suffix.
    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        self.url_template
            .replace("{s}", "a")
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{r}", "")
    }
}

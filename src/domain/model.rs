use crate::utils::error::{QuakeMapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GeoJSON `FeatureCollection` as served by the earthquake and plate feeds.
///
/// Geometry coordinates and properties stay loosely typed here so that one bad
/// feature is reported against its index instead of failing the whole decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

pub const UNKNOWN_PLACE: &str = "Unknown location";

/// One earthquake event, validated out of a GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub position: LatLng,
    pub depth_km: f64,
    pub magnitude: f64,
    pub place: String,
    pub timestamp_millis: i64,
}

impl FeatureRecord {
    pub fn new(
        lat: f64,
        lng: f64,
        depth_km: f64,
        magnitude: f64,
        place: impl Into<String>,
        timestamp_millis: i64,
    ) -> Self {
        Self {
            position: LatLng::new(lat, lng),
            depth_km,
            magnitude,
            place: place.into(),
            timestamp_millis,
        }
    }

    /// Reads `geometry.coordinates = [lon, lat, depth]` and `properties.{mag, place, time}`.
    ///
    /// `index` is the feature's position in its collection and only used for error reporting.
    ///
    /// A `mag` of `null` is malformed, so one such event leaves the whole earthquake overlay
    /// empty. The browser version drew it as a radius-0 marker instead.
    pub fn from_feature(index: usize, feature: &Feature) -> Result<Self> {
        let malformed = |reason: &str| QuakeMapError::MalformedFeature {
            index,
            reason: reason.to_string(),
        };

        let coordinates = feature
            .geometry
            .as_ref()
            .and_then(|g| g.coordinates.as_array())
            .ok_or_else(|| malformed("missing coordinates"))?;

        if coordinates.len() < 3 {
            return Err(malformed("coordinates need longitude, latitude and depth"));
        }

        let number = |i: usize| coordinates[i].as_f64();
        let (lng, lat, depth_km) = match (number(0), number(1), number(2)) {
            (Some(lng), Some(lat), Some(depth)) => (lng, lat, depth),
            _ => return Err(malformed("non-numeric coordinate")),
        };

        let properties = feature
            .properties
            .as_ref()
            .and_then(Value::as_object)
            .ok_or_else(|| malformed("missing properties"))?;

        let magnitude = properties
            .get("mag")
            .and_then(Value::as_f64)
            .ok_or_else(|| malformed("missing or non-numeric magnitude"))?;

        let timestamp_millis = properties
            .get("time")
            .and_then(|t| t.as_i64().or_else(|| t.as_f64().map(|f| f as i64)))
            .ok_or_else(|| malformed("missing or non-numeric time"))?;

        let place = properties
            .get("place")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_PLACE)
            .to_string();

        Ok(Self {
            position: LatLng::new(lat, lng),
            depth_km,
            magnitude,
            place,
            timestamp_millis,
        })
    }
}

/// Depth range with its marker color. `lower` is exclusive except for the first bucket,
/// which also takes everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeverityBucket {
    pub lower: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub index: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDescriptor {
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_weight: f64,
    pub radius: f64,
    pub fill_opacity: f64,
    pub stroke_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    CircleMarker {
        position: LatLng,
        style: StyleDescriptor,
        popup: String,
    },
    Polyline {
        paths: Vec<Vec<LatLng>>,
        style: LineStyle,
    },
}

/// A named, toggleable collection of shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerGroup {
    pub name: String,
    pub shapes: Vec<Shape>,
    pub visible: bool,
}

impl LayerGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
            visible: true,
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub position: ControlPosition,
    pub rows: Vec<LegendRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 37.09,
    lng: -95.71,
};
pub const DEFAULT_ZOOM: u8 = 4;

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// `Basic`: one base layer and the earthquake overlay.
/// `Tectonic`: three base layers plus a plate-boundary overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MapVariant {
    Basic,
    #[default]
    Tectonic,
}

impl MapVariant {
    pub fn includes_plates(self) -> bool {
        matches!(self, MapVariant::Tectonic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerControl {
    pub base_layers: Vec<String>,
    pub overlays: Vec<String>,
    pub collapsed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: Value) -> Feature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_feature_reads_usgs_layout() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [-122.5, 38.1, 7.25]},
            "properties": {"mag": 2.5, "place": "10km N of Somewhere", "time": 1700000000000i64}
        }));

        let record = FeatureRecord::from_feature(0, &f).unwrap();
        assert_eq!(record.position, LatLng::new(38.1, -122.5));
        assert_eq!(record.depth_km, 7.25);
        assert_eq!(record.magnitude, 2.5);
        assert_eq!(record.place, "10km N of Somewhere");
        assert_eq!(record.timestamp_millis, 1_700_000_000_000);
    }

    #[test]
    fn test_from_feature_null_place_falls_back() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0, 1.0]},
            "properties": {"mag": 1.0, "place": null, "time": 0}
        }));

        let record = FeatureRecord::from_feature(0, &f).unwrap();
        assert_eq!(record.place, UNKNOWN_PLACE);
    }

    #[test]
    fn test_from_feature_rejects_missing_depth() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": {"mag": 1.0, "place": "X", "time": 0}
        }));

        let err = FeatureRecord::from_feature(4, &f).unwrap_err();
        assert!(matches!(err, QuakeMapError::MalformedFeature { index: 4, .. }));
    }

    #[test]
    fn test_from_feature_rejects_null_magnitude() {
        let f = feature(json!({
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0, 3.0]},
            "properties": {"mag": null, "place": "X", "time": 0}
        }));

        assert!(FeatureRecord::from_feature(0, &f).is_err());
    }

    #[test]
    fn test_from_feature_rejects_missing_geometry() {
        let f = feature(json!({"properties": {"mag": 1.0, "time": 0}}));
        assert!(FeatureRecord::from_feature(0, &f).is_err());
    }

    #[test]
    fn test_map_variant_deserializes_lowercase() {
        let variant: MapVariant = serde_json::from_value(json!("basic")).unwrap();
        assert_eq!(variant, MapVariant::Basic);
        assert!(!variant.includes_plates());
        assert!(MapVariant::default().includes_plates());
    }
}

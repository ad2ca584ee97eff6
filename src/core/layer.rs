use crate::core::stylist;
use crate::domain::model::{
    Feature, FeatureCollection, FeatureRecord, LatLng, LayerGroup, LineStyle, Shape,
};
use crate::utils::error::{QuakeMapError, Result};
use serde_json::Value;

pub const EARTHQUAKES_LAYER: &str = "Earthquakes";
pub const PLATES_LAYER: &str = "Tectonic Plates";

pub const PLATE_COLOR: &str = "orange";
pub const PLATE_WEIGHT: f64 = 2.0;

/// One circle marker per record, in input order.
pub fn build_point_layer(name: &str, records: &[FeatureRecord]) -> LayerGroup {
    let mut layer = LayerGroup::new(name);
    layer.shapes = records
        .iter()
        .map(|record| Shape::CircleMarker {
            position: record.position,
            style: stylist::style(record),
            popup: stylist::describe(record),
        })
        .collect();
    layer
}

/// Parses every feature before building anything: the first malformed feature fails the
/// whole layer.
pub fn build_point_layer_from_geojson(
    name: &str,
    collection: &FeatureCollection,
) -> Result<LayerGroup> {
    // 逐筆解析，遇到格式錯誤即中止
    let records = collection
        .features
        .iter()
        .enumerate()
        .map(|(i, f)| FeatureRecord::from_feature(i, f))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Parsed {} earthquake records for '{}'", records.len(), name);

    // 轉換為圓形標記
    Ok(build_point_layer(name, &records))
}

/// Plate boundaries as orange polylines. Only `LineString` and `MultiLineString` are drawn.
pub fn build_line_layer(name: &str, collection: &FeatureCollection) -> Result<LayerGroup> {
    let mut layer = LayerGroup::new(name);
    for (index, feature) in collection.features.iter().enumerate() {
        let paths = line_paths(index, feature)?;

        // 每個邊界一條折線
        layer.shapes.push(Shape::Polyline {
            paths,
            style: LineStyle {
                color: PLATE_COLOR.to_string(),
                weight: PLATE_WEIGHT,
            },
        });
    }
    Ok(layer)
}

fn line_paths(index: usize, feature: &Feature) -> Result<Vec<Vec<LatLng>>> {
    let malformed = |reason: String| QuakeMapError::MalformedFeature { index, reason };

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| malformed("missing geometry".to_string()))?;

    match geometry.kind.as_str() {
        "LineString" => Ok(vec![parse_path(&geometry.coordinates).map_err(malformed)?]),
        "MultiLineString" => geometry
            .coordinates
            .as_array()
            .ok_or_else(|| malformed("MultiLineString without coordinates".to_string()))?
            .iter()
            .map(|path| parse_path(path).map_err(malformed))
            .collect(),
        other => Err(malformed(format!("unsupported geometry type '{}'", other))),
    }
}

/// `[[lon, lat], ...]` to lat/lng pairs. A third (altitude) value is ignored.
fn parse_path(coordinates: &Value) -> std::result::Result<Vec<LatLng>, String> {
    let points = coordinates
        .as_array()
        .ok_or_else(|| "line without coordinates".to_string())?;

    // GeoJSON 座標順序為 [經度, 緯度]
    points
        .iter()
        .map(|point| {
            let pair = point.as_array().map(Vec::as_slice).unwrap_or_default();
            match pair {
                [lng, lat, ..] => match (lng.as_f64(), lat.as_f64()) {
                    (Some(lng), Some(lat)) => Ok(LatLng::new(lat, lng)),
                    _ => Err("non-numeric coordinate".to_string()),
                },
                _ => Err("position needs longitude and latitude".to_string()),
            }
        })
        .collect()
}

//! Turns a [`MapSession`] into a standalone Leaflet page.
//!
//! The session is embedded as JSON in a `<script type="application/json">` block and a small
//! bootstrap script builds the Leaflet objects from it. Leaflet itself is loaded from its CDN.

use crate::domain::model::{
    LatLng, LayerControl, Legend, LineStyle, MapView, Shape, StyleDescriptor, TileLayer,
};
use crate::domain::session::MapSession;
use crate::utils::error::Result;
use html_escape::encode_text;
use serde::Serialize;

const DATA_PLACEHOLDER: &str = "__MAP_DATA__";

pub const MAP_PAGE_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Earthquakes of the past week</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <style>
    html, body, #map { height: 100%; margin: 0; padding: 0; }
    .legend { background-color: white; padding: 10px; border: 2px solid #333; border-radius: 5px; line-height: 18px; }
    .legend h4 { margin: 0 0 6px; }
    .legend i { width: 18px; height: 18px; display: inline-block; margin-right: 8px; vertical-align: middle; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script type="application/json" id="map-data">__MAP_DATA__</script>
  <script>
    const data = JSON.parse(document.getElementById("map-data").textContent);

    const map = L.map("map", {
      center: [data.view.center.lat, data.view.center.lng],
      zoom: data.view.zoom,
    });

    const baseLayers = {};
    data.base_layers.forEach((tile, i) => {
      const layer = L.tileLayer(tile.url_template, { attribution: tile.attribution });
      baseLayers[tile.name] = layer;
      if (i === 0) {
        layer.addTo(map);
      }
    });

    const overlays = {};
    data.overlays.forEach(overlay => {
      const group = L.layerGroup();
      overlay.shapes.forEach(shape => {
        if (shape.kind === "circle_marker") {
          L.circleMarker([shape.position.lat, shape.position.lng], {
            fillColor: shape.style.fill_color,
            color: shape.style.stroke_color,
            weight: shape.style.stroke_weight,
            radius: shape.style.radius,
            fillOpacity: shape.style.fill_opacity,
            opacity: shape.style.stroke_opacity,
          }).bindPopup(shape.popup_html).addTo(group);
        } else if (shape.kind === "polyline") {
          const latlngs = shape.paths.map(path => path.map(p => [p.lat, p.lng]));
          L.polyline(latlngs, { color: shape.style.color, weight: shape.style.weight }).addTo(group);
        }
      });
      overlays[overlay.name] = group;
      if (overlay.visible) {
        group.addTo(map);
      }
    });

    if (data.layer_control) {
      const bases = {};
      data.layer_control.base_layers.forEach(name => { bases[name] = baseLayers[name]; });
      const toggles = {};
      data.layer_control.overlays.forEach(name => { toggles[name] = overlays[name]; });
      L.control.layers(bases, toggles, { collapsed: data.layer_control.collapsed }).addTo(map);
    }

    if (data.legend) {
      const legend = L.control({ position: data.legend.position });
      legend.onAdd = function () {
        const div = L.DomUtil.create("div", "info legend");
        const title = L.DomUtil.create("h4", "", div);
        title.textContent = data.legend.title;
        data.legend.rows.forEach(row => {
          const swatch = L.DomUtil.create("i", "", div);
          swatch.style.background = row.color;
          div.appendChild(document.createTextNode(row.label));
          L.DomUtil.create("br", "", div);
        });
        return div;
      };
      legend.addTo(map);
    }
  </script>
</body>
</html>
"##;

#[derive(Serialize)]
struct PageModel<'a> {
    view: MapView,
    base_layers: &'a [TileLayer],
    overlays: Vec<OverlayModel<'a>>,
    legend: Option<&'a Legend>,
    layer_control: Option<LayerControl>,
}

#[derive(Serialize)]
struct OverlayModel<'a> {
    name: &'a str,
    visible: bool,
    shapes: Vec<ShapeModel<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ShapeModel<'a> {
    CircleMarker {
        position: LatLng,
        style: &'a StyleDescriptor,
        popup_html: String,
    },
    Polyline {
        paths: &'a [Vec<LatLng>],
        style: &'a LineStyle,
    },
}

impl<'a> From<&'a Shape> for ShapeModel<'a> {
    fn from(shape: &'a Shape) -> Self {
        match shape {
            Shape::CircleMarker {
                position,
                style,
                popup,
            } => ShapeModel::CircleMarker {
                position: *position,
                style,
                popup_html: popup_html(popup),
            },
            Shape::Polyline { paths, style } => ShapeModel::Polyline { paths, style },
        }
    }
}

/// First popup line as a heading, the rest as paragraphs.
pub fn popup_html(popup: &str) -> String {
    popup
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let tag = if i == 0 { "h3" } else { "p" };
            format!("<{tag}>{}</{tag}>", encode_text(line))
        })
        .collect()
}

pub fn render_page(session: &MapSession) -> Result<String> {
    let model = PageModel {
        view: session.view(),
        base_layers: session.base_layers(),
        overlays: session
            .overlays()
            .iter()
            .map(|o| OverlayModel {
                name: &o.name,
                visible: o.visible,
                shapes: o.shapes.iter().map(ShapeModel::from).collect(),
            })
            .collect(),
        legend: session.legend(),
        layer_control: session.layer_control(),
    };

    // "</" only occurs inside JSON strings, where "<\/" is an equivalent escape
    let json = serde_json::to_string(&model)?.replace("</", "<\\/");
    Ok(MAP_PAGE_HTML.replace(DATA_PLACEHOLDER, &json))
}

pub fn render_session_json(session: &MapSession) -> Result<String> {
    Ok(serde_json::to_string_pretty(session)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layer::{build_point_layer, EARTHQUAKES_LAYER};
    use crate::core::legend::build_legend;
    use crate::core::tiles::TileProvider;
    use crate::domain::model::FeatureRecord;

    fn embedded_json(page: &str) -> serde_json::Value {
        let start = page.find(r#"id="map-data">"#).unwrap() + r#"id="map-data">"#.len();
        let end = start + page[start..].find("</script>").unwrap();
        serde_json::from_str(&page[start..end]).unwrap()
    }

    fn session_with(records: &[FeatureRecord]) -> MapSession {
        let mut session = MapSession::new(MapView::default());
        session.add_base_layer(TileProvider::OpenStreetMap.tile_layer(None));
        session.register_overlay(EARTHQUAKES_LAYER, true);
        session
            .mount(build_point_layer(EARTHQUAKES_LAYER, records))
            .unwrap();
        session.attach_legend(build_legend());
        session
    }

    #[test]
    fn test_popup_html_escapes() {
        assert_eq!(
            popup_html("Location: <b>&\nMagnitude: 1"),
            "<h3>Location: &lt;b&gt;&amp;</h3><p>Magnitude: 1</p>"
        );
    }

    #[test]
    fn test_render_page_embeds_session() {
        let session = session_with(&[FeatureRecord::new(10.0, 20.0, 95.0, 6.0, "X", 0)]);
        let page = render_page(&session).unwrap();

        assert!(!page.contains(DATA_PLACEHOLDER));
        let data = embedded_json(&page);
        assert_eq!(data["view"]["zoom"], 4);
        assert_eq!(data["view"]["center"]["lat"], 37.09);
        assert_eq!(data["base_layers"][0]["name"], "Satellite");
        assert!(data["layer_control"].is_null());
        assert_eq!(data["legend"]["position"], "bottomright");
        assert_eq!(data["legend"]["rows"][5]["label"], "90+");

        let marker = &data["overlays"][0]["shapes"][0];
        assert_eq!(marker["kind"], "circle_marker");
        assert_eq!(marker["style"]["fill_color"], "#ff5f65");
        assert_eq!(marker["style"]["radius"], 24.0);
        assert!(marker["popup_html"]
            .as_str()
            .unwrap()
            .starts_with("<h3>Location: X</h3><p>Magnitude: 6</p><p>Depth: 95 km</p>"));
    }

    #[test]
    fn test_script_closing_tag_in_data_is_escaped() {
        let hostile = FeatureRecord::new(0.0, 0.0, 1.0, 1.0, "</script><script>alert(1)", 0);
        let session = session_with(&[hostile]);
        let page = render_page(&session).unwrap();

        assert_eq!(
            page.matches("</script>").count(),
            MAP_PAGE_HTML.matches("</script>").count()
        );
        let data = embedded_json(&page);
        assert!(data["overlays"][0]["shapes"][0]["popup_html"]
            .as_str()
            .unwrap()
            .contains("&lt;/script&gt;"));
    }

    #[test]
    fn test_render_session_json() {
        let session = session_with(&[]);
        let json: serde_json::Value =
            serde_json::from_str(&render_session_json(&session).unwrap()).unwrap();
        assert_eq!(json["overlays"][0]["name"], "Earthquakes");
        assert_eq!(json["overlays"][0]["shapes"].as_array().unwrap().len(), 0);
    }
}

use crate::domain::model::{LayerControl, LayerGroup, Legend, MapView, TileLayer};
use crate::utils::error::{QuakeMapError, Result};
use serde::Serialize;

/// Everything that ends up on the map: view, base tiles, overlays and the legend.
///
/// Overlays are declared up front with [`MapSession::register_overlay`] and filled
/// later by [`MapSession::mount`], so the toggle control lists them in declaration
/// order no matter which fetch finishes first.
#[derive(Debug, Clone, Serialize)]
pub struct MapSession {
    view: MapView,
    base_layers: Vec<TileLayer>,
    overlays: Vec<LayerGroup>,
    legend: Option<Legend>,
}

impl MapSession {
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            base_layers: Vec::new(),
            overlays: Vec::new(),
            legend: None,
        }
    }

    pub fn view(&self) -> MapView {
        self.view
    }

    /// The first base layer added is the one shown initially.
    pub fn add_base_layer(&mut self, layer: TileLayer) {
        self.base_layers.push(layer);
    }

    pub fn active_base_layer(&self) -> Option<&TileLayer> {
        self.base_layers.first()
    }

    pub fn base_layers(&self) -> &[TileLayer] {
        &self.base_layers
    }

    pub fn register_overlay(&mut self, name: impl Into<String>, visible: bool) {
        let mut slot = LayerGroup::new(name);
        slot.visible = visible;
        self.overlays.push(slot);
    }

    /// Replaces the shapes of the overlay with the same name. Visibility stays as registered.
    pub fn mount(&mut self, layer: LayerGroup) -> Result<()> {
        let slot = self
            .overlays
            .iter_mut()
            .find(|o| o.name == layer.name)
            .ok_or_else(|| QuakeMapError::ProcessingError {
                message: format!("No overlay named '{}' is registered", layer.name),
            })?;
        slot.shapes = layer.shapes;
        Ok(())
    }

    pub fn overlays(&self) -> &[LayerGroup] {
        &self.overlays
    }

    pub fn overlay(&self, name: &str) -> Option<&LayerGroup> {
        self.overlays.iter().find(|o| o.name == name)
    }

    pub fn attach_legend(&mut self, legend: Legend) {
        self.legend = Some(legend);
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Only needed when there is something to toggle.
    pub fn layer_control(&self) -> Option<LayerControl> {
        if self.base_layers.len() <= 1 && self.overlays.len() <= 1 {
            return None;
        }
        Some(LayerControl {
            base_layers: self.base_layers.iter().map(|l| l.name.clone()).collect(),
            overlays: self.overlays.iter().map(|o| o.name.clone()).collect(),
            collapsed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{LatLng, LineStyle, Shape};

    fn tile(name: &str) -> TileLayer {
        TileLayer {
            name: name.to_string(),
            url_template: format!("https://{{s}}.{}.test/{{z}}/{{x}}/{{y}}.png", name),
            attribution: String::new(),
        }
    }

    fn line_layer(name: &str) -> LayerGroup {
        let mut layer = LayerGroup::new(name);
        layer.visible = true;
        layer.shapes.push(Shape::Polyline {
            paths: vec![vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]],
            style: LineStyle {
                color: "orange".to_string(),
                weight: 2.0,
            },
        });
        layer
    }

    #[test]
    fn test_mount_fills_registered_slot_and_keeps_visibility() {
        let mut session = MapSession::new(MapView::default());
        session.register_overlay("Tectonic Plates", false);

        session.mount(line_layer("Tectonic Plates")).unwrap();

        let overlay = session.overlay("Tectonic Plates").unwrap();
        assert_eq!(overlay.len(), 1);
        assert!(!overlay.visible);
    }

    #[test]
    fn test_mount_unknown_overlay_fails() {
        let mut session = MapSession::new(MapView::default());
        assert!(session.mount(line_layer("Nope")).is_err());
    }

    #[test]
    fn test_layer_control_only_when_something_to_toggle() {
        let mut session = MapSession::new(MapView::default());
        session.add_base_layer(tile("osm"));
        session.register_overlay("Earthquakes", true);
        assert!(session.layer_control().is_none());

        session.add_base_layer(tile("carto"));
        let control = session.layer_control().unwrap();
        assert_eq!(control.base_layers, vec!["osm", "carto"]);
        assert_eq!(control.overlays, vec!["Earthquakes"]);
        assert!(!control.collapsed);
        assert_eq!(session.active_base_layer().unwrap().name, "osm");
    }
}

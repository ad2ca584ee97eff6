use crate::core::layer::{EARTHQUAKES_LAYER, PLATES_LAYER};
use crate::core::legend::build_legend;
use crate::core::tiles::TileProvider;
use crate::domain::model::MapVariant;
use crate::domain::ports::ConfigProvider;
use crate::domain::session::MapSession;

pub fn base_providers(variant: MapVariant) -> &'static [TileProvider] {
    match variant {
        MapVariant::Basic => &[TileProvider::OpenStreetMap],
        MapVariant::Tectonic => &[
            TileProvider::OpenStreetMap,
            TileProvider::CartoLight,
            TileProvider::ThunderforestOutdoors,
        ],
    }
}

/// Startup wiring: view, base tiles, empty overlay slots and the legend.
///
/// The plate overlay starts hidden and is only reachable through the layer control.
pub fn compose_session<C: ConfigProvider + ?Sized>(config: &C) -> MapSession {
    let variant = config.variant();
    let mut session = MapSession::new(config.map_view());

    for provider in base_providers(variant) {
        session.add_base_layer(provider.tile_layer(config.thunderforest_api_key()));
    }

    if variant.includes_plates() {
        session.register_overlay(PLATES_LAYER, false);
    }
    session.register_overlay(EARTHQUAKES_LAYER, true);

    session.attach_legend(build_legend());

    tracing::debug!(
        "Composed {:?} map with {} base layers and {} overlays",
        variant,
        session.base_layers().len(),
        session.overlays().len()
    );
    session
}

use crate::core::composer::compose_session;
use crate::core::layer::{
    build_line_layer, build_point_layer_from_geojson, EARTHQUAKES_LAYER, PLATES_LAYER,
};
use crate::core::render::{render_page, render_session_json};
use crate::core::source::GeoJsonSource;
use crate::core::{ConfigProvider, MapPipeline, MapSession, Storage};
use crate::domain::model::{FeatureCollection, LayerGroup};
use crate::utils::error::Result;
use reqwest::Client;
use std::path::Path;
use tokio::task::JoinSet;

pub const PAGE_FILE: &str = "index.html";
pub const SESSION_FILE: &str = "map.json";

#[derive(Debug, Clone, Copy)]
enum LayerKind {
    Points,
    Lines,
}

/// Fetches the feeds, builds the overlays and writes the page through `Storage`.
pub struct QuakeMapPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> QuakeMapPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn overlay_sources(&self) -> Vec<(&'static str, LayerKind, String)> {
        let mut sources = vec![(
            EARTHQUAKES_LAYER,
            LayerKind::Points,
            self.config.earthquakes_url().to_string(),
        )];
        if self.config.variant().includes_plates() {
            sources.push((
                PLATES_LAYER,
                LayerKind::Lines,
                self.config.plates_url().to_string(),
            ));
        }
        sources
    }
}

async fn load_overlay(source: GeoJsonSource, name: &str, kind: LayerKind) -> Result<LayerGroup> {
    let collection: FeatureCollection = source.fetch().await?;
    match kind {
        LayerKind::Points => build_point_layer_from_geojson(name, &collection),
        LayerKind::Lines => build_line_layer(name, &collection),
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> MapPipeline for QuakeMapPipeline<S, C> {
    async fn compose(&self) -> Result<MapSession> {
        Ok(compose_session(&self.config))
    }

    /// Each overlay is fetched and built in its own task and mounted as soon as it is ready.
    /// A failed overlay is logged and stays empty; the rest of the map is still published.
    async fn populate(&self, session: &mut MapSession) -> Result<()> {
        let mut tasks = JoinSet::new();

        // 為每個疊加層建立獨立的抓取任務
        for (name, kind, url) in self.overlay_sources() {
            let source = GeoJsonSource::new(self.client.clone(), url);
            tasks.spawn(async move {
                tracing::info!("Fetching '{}' from {}", name, source.url());
                (name, load_overlay(source, name, kind).await)
            });
        }

        // 依完成順序掛載，失敗的圖層保持空白
        while let Some(joined) = tasks.join_next().await {
            let (name, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    tracing::error!("Overlay task did not complete: {}", e);
                    continue;
                }
            };

            match result {
                Ok(layer) => {
                    tracing::info!("Mounted '{}' with {} shapes", name, layer.len());
                    session.mount(layer)?;
                }
                Err(e) => {
                    tracing::error!(
                        "Overlay '{}' left empty: {} (Category: {:?})",
                        name,
                        e,
                        e.category()
                    );
                    tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
                }
            }
        }

        Ok(())
    }

    async fn publish(&self, session: &MapSession) -> Result<String> {
        // 產生頁面與地圖描述
        let page = render_page(session)?;
        let description = render_session_json(session)?;

        tracing::debug!("Writing {} ({} bytes) to storage", PAGE_FILE, page.len());
        self.storage.write_file(PAGE_FILE, page.as_bytes()).await?;
        self.storage
            .write_file(SESSION_FILE, description.as_bytes())
            .await?;

        let output_path = Path::new(self.config.output_path()).join(PAGE_FILE);
        Ok(output_path.to_string_lossy().into_owned())
    }
}

use crate::core::MapPipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct MapEngine<P: MapPipeline> {
    pipeline: P,
}

impl<P: MapPipeline> MapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting map build...");

        let mut session = self.pipeline.compose().await?;
        tracing::info!(
            "Composed map with {} base layers and {} overlays",
            session.base_layers().len(),
            session.overlays().len()
        );

        tracing::info!("Loading overlays...");
        self.pipeline.populate(&mut session).await?;
        for overlay in session.overlays() {
            tracing::info!("Overlay '{}': {} shapes", overlay.name, overlay.len());
        }

        tracing::info!("Publishing map...");
        let output_path = self.pipeline.publish(&session).await?;
        tracing::info!(
            "Map saved to: {} ({:?})",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}

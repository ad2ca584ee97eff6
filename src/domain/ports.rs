use crate::domain::model::{MapVariant, MapView};
use crate::domain::session::MapSession;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn earthquakes_url(&self) -> &str;
    fn plates_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn variant(&self) -> MapVariant;
    fn map_view(&self) -> MapView;
    fn thunderforest_api_key(&self) -> Option<&str>;
}

/// One fetch-and-render pass: wire the session, fill its overlays, write it out.
#[async_trait]
pub trait MapPipeline: Send + Sync {
    async fn compose(&self) -> Result<MapSession>;
    async fn populate(&self, session: &mut MapSession) -> Result<()>;
    async fn publish(&self, session: &MapSession) -> Result<String>;
}

pub mod composer;
pub mod depth;
pub mod engine;
pub mod layer;
pub mod legend;
pub mod magnitude;
pub mod pipeline;
pub mod render;
pub mod source;
pub mod stylist;
pub mod tiles;

pub use crate::domain::ports::{ConfigProvider, MapPipeline, Storage};
pub use crate::domain::session::MapSession;
pub use crate::utils::error::Result;

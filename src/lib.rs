pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{engine::MapEngine, pipeline::QuakeMapPipeline};
pub use domain::session::MapSession;
pub use utils::error::{QuakeMapError, Result};

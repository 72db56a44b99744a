#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{engine::LayoutEngine, pipeline::SorterPipeline};
pub use domain::model::{BinId, BinRecord, Manifest, Mapping, SlotRow, BIN_CAPACITY};
pub use utils::error::{LayoutError, Result};

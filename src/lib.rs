pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::memory_store::InMemoryPosStore;
pub use adapters::osm_http::HttpOsmDataService;
pub use config::AppConfig;
pub use core::{converter::OsmToPosConverter, pos_service::PosService};
pub use utils::error::{PosError, Result};

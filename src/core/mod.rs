pub mod campus;
pub mod converter;
pub mod pos_service;

pub use crate::domain::model::{CampusType, OsmNode, Pos, PosType};
pub use crate::domain::ports::{ConfigProvider, OsmDataService, PosDataService};
pub use crate::utils::error::Result;

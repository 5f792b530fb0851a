use crate::domain::model::{OsmNode, Pos};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of OpenStreetMap nodes.
///
/// Every failure on the fetch path is reported as `PosError::OsmNodeNotFound`.
#[async_trait]
pub trait OsmDataService: Send + Sync {
    async fn fetch_node(&self, node_id: u64) -> Result<OsmNode>;
}

/// Persistence collaborator for POS records.
///
/// Implementations assign identifiers and timestamps on create and enforce
/// name uniqueness (`PosError::DuplicatePosName`).
#[async_trait]
pub trait PosDataService: Send + Sync {
    async fn clear(&self) -> Result<()>;
    async fn get_all(&self) -> Result<Vec<Pos>>;
    async fn get_by_id(&self, id: u64) -> Result<Pos>;
    async fn upsert(&self, pos: Pos) -> Result<Pos>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn user_agent(&self) -> Option<&str>;
}

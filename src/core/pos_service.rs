use crate::core::converter::OsmToPosConverter;
use crate::domain::model::Pos;
use crate::domain::ports::{OsmDataService, PosDataService};
use crate::utils::error::{PosError, Result};

/// POS use cases, including the import of a POS from an OpenStreetMap node.
pub struct PosService<P: PosDataService, O: OsmDataService> {
    pos_data: P,
    osm_data: O,
    converter: OsmToPosConverter,
}

impl<P: PosDataService, O: OsmDataService> PosService<P, O> {
    pub fn new(pos_data: P, osm_data: O) -> Self {
        Self {
            pos_data,
            osm_data,
            converter: OsmToPosConverter::new(),
        }
    }

    pub async fn clear(&self) -> Result<()> {
        tracing::warn!("Clearing all POS data");
        self.pos_data.clear().await
    }

    pub async fn get_all(&self) -> Result<Vec<Pos>> {
        tracing::debug!("Retrieving all POS");
        self.pos_data.get_all().await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Pos> {
        tracing::debug!("Retrieving POS with ID: {}", id);
        self.pos_data.get_by_id(id).await
    }

    /// Creates `pos` when it has no ID, otherwise updates the existing record.
    pub async fn upsert(&self, pos: Pos) -> Result<Pos> {
        match pos.id {
            None => {
                tracing::info!("Creating new POS: {}", pos.name);
            }
            Some(id) => {
                tracing::info!("Updating POS with ID: {}", id);
                // 更新前必須已存在
                self.pos_data.get_by_id(id).await?;
            }
        }
        self.perform_upsert(pos).await
    }

    pub async fn import_from_osm_node(&self, node_id: u64) -> Result<Pos> {
        tracing::info!("Importing POS from OpenStreetMap node {}...", node_id);

        let osm_node = self.osm_data.fetch_node(node_id).await?;
        let pos = self.converter.convert(&osm_node)?;
        let saved = self.upsert(pos).await?;

        tracing::info!(
            "Successfully imported POS '{}' from OSM node {}",
            saved.name,
            node_id
        );
        Ok(saved)
    }

    async fn perform_upsert(&self, pos: Pos) -> Result<Pos> {
        let name = pos.name.clone();
        match self.pos_data.upsert(pos).await {
            Ok(saved) => {
                tracing::info!("Successfully upserted POS with ID: {:?}", saved.id);
                Ok(saved)
            }
            Err(e @ PosError::DuplicatePosName(_)) => {
                tracing::error!("Error upserting POS '{}': {}", name, e);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

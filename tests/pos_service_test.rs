use anyhow::Result;
use async_trait::async_trait;
use campus_coffee::domain::model::{CampusType, OsmNode, Pos, PosType};
use campus_coffee::domain::ports::OsmDataService;
use campus_coffee::{InMemoryPosStore, PosError, PosService};
use std::collections::HashMap;

/// Serves nodes from memory instead of the OSM API.
#[derive(Default)]
struct FixtureOsmDataService {
    nodes: HashMap<u64, OsmNode>,
}

impl FixtureOsmDataService {
    fn with_node(mut self, node: OsmNode) -> Self {
        self.nodes.insert(node.node_id, node);
        self
    }
}

#[async_trait]
impl OsmDataService for FixtureOsmDataService {
    async fn fetch_node(&self, node_id: u64) -> campus_coffee::Result<OsmNode> {
        self.nodes
            .get(&node_id)
            .cloned()
            .ok_or(PosError::OsmNodeNotFound(node_id))
    }
}

fn new_pos(name: &str) -> Pos {
    Pos {
        id: None,
        created_at: None,
        updated_at: None,
        name: name.to_string(),
        description: "Coffee and cake".to_string(),
        pos_type: PosType::Cafe,
        campus: CampusType::Inf,
        street: "Im Neuenheimer Feld".to_string(),
        house_number: "304".to_string(),
        postal_code: 69120,
        city: "Heidelberg".to_string(),
    }
}

fn pub_node() -> OsmNode {
    OsmNode::new(314)
        .with_coordinates(49.4102, 8.6945)
        .with_tag("name", "Destille")
        .with_tag("addr:street", "Untere Straße")
        .with_tag("addr:housenumber", "16")
        .with_tag("addr:city", "Heidelberg")
        .with_tag("addr:postcode", "69117")
        .with_tag("amenity", "PUB")
}

fn service() -> PosService<InMemoryPosStore, FixtureOsmDataService> {
    PosService::new(
        InMemoryPosStore::new(),
        FixtureOsmDataService::default().with_node(pub_node()),
    )
}

#[tokio::test]
async fn test_create_and_read_back() -> Result<()> {
    let service = service();

    let created = service.upsert(new_pos("Café Botanik")).await?;
    assert!(created.is_persisted());

    let loaded = service.get_by_id(created.id.unwrap_or_default()).await?;
    assert_eq!(loaded, created);
    assert_eq!(service.get_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_update_existing_pos() -> Result<()> {
    let service = service();
    let created = service.upsert(new_pos("Café Botanik")).await?;

    let mut changed = created.clone();
    changed.pos_type = PosType::Restaurant;
    let updated = service.upsert(changed).await?;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.pos_type, PosType::Restaurant);
    assert_eq!(updated.created_at, created.created_at);
    Ok(())
}

#[tokio::test]
async fn test_update_unknown_pos_fails() {
    let service = service();
    let mut ghost = new_pos("Ghost Café");
    ghost.id = Some(999);

    let result = service.upsert(ghost).await;
    assert!(matches!(result, Err(PosError::PosNotFound(999))));
}

#[tokio::test]
async fn test_duplicate_name_propagates() -> Result<()> {
    let service = service();
    service.upsert(new_pos("Café Botanik")).await?;

    let result = service.upsert(new_pos("Café Botanik")).await;
    assert!(matches!(result, Err(PosError::DuplicatePosName(_))));
    Ok(())
}

#[tokio::test]
async fn test_import_uses_fetched_node() -> Result<()> {
    let service = service();
    let pos = service.import_from_osm_node(314).await?;

    assert_eq!(pos.name, "Destille");
    assert_eq!(pos.pos_type, PosType::Bar);
    assert_eq!(pos.description, "PUB");
    assert_eq!(pos.campus, CampusType::Altstadt);
    assert_eq!(pos.postal_code, 69117);
    Ok(())
}

#[tokio::test]
async fn test_import_unknown_node_fails() {
    let result = service().import_from_osm_node(1).await;
    assert!(matches!(result, Err(PosError::OsmNodeNotFound(1))));
}

#[tokio::test]
async fn test_import_conflicting_with_manual_pos() -> Result<()> {
    let service = service();
    service.upsert(new_pos("Destille")).await?;

    let result = service.import_from_osm_node(314).await;
    assert!(matches!(result, Err(PosError::DuplicatePosName(name)) if name == "Destille"));
    Ok(())
}

#[tokio::test]
async fn test_clear_removes_everything() -> Result<()> {
    let service = service();
    service.upsert(new_pos("Café Botanik")).await?;
    service.import_from_osm_node(314).await?;
    assert_eq!(service.get_all().await?.len(), 2);

    service.clear().await?;
    assert!(service.get_all().await?.is_empty());
    Ok(())
}

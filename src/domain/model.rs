use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node fetched from OpenStreetMap, before it becomes a [`Pos`].
///
/// A node without any tags and a node whose tag map is empty are the same
/// thing here; both are rejected by the converter.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmNode {
    pub node_id: u64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tags: HashMap<String, String>,
}

impl OsmNode {
    pub fn new(node_id: u64) -> Self {
        Self {
            node_id,
            latitude: None,
            longitude: None,
            tags: HashMap::new(),
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosType {
    Cafe,
    Restaurant,
    Bar,
    FastFood,
    Bakery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampusType {
    Altstadt,
    Bergheim,
    Inf,
}

/// A point of sale. `id` and the timestamps stay `None` until the
/// persistence layer stores the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pos {
    pub id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub pos_type: PosType,
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
}

impl Pos {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// Adapters layer: concrete implementations of the domain ports.

pub mod memory_store;
pub mod osm_http;
pub mod osm_xml;

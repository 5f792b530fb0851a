use crate::domain::model::OsmNode;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use thiserror::Error;

/// Why an OSM XML document could not be turned into a node.
///
/// The HTTP adapter collapses all of these into `PosError::OsmNodeNotFound`.
#[derive(Error, Debug)]
pub enum OsmXmlError {
    #[error("XML parsing failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Document is empty")]
    EmptyDocument,

    #[error("No node element found in XML")]
    MissingNode,

    #[error("Invalid {attribute} coordinate: {value}")]
    InvalidCoordinate { attribute: &'static str, value: String },

    #[error("Document ended with {open} unclosed element(s)")]
    UnexpectedEof { open: usize },

    #[error("Content found outside the root element")]
    ContentOutsideRoot,
}

fn get_attr_value(event: &BytesStart<'_>, key: &[u8]) -> quick_xml::Result<Option<String>> {
    for attr in event.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn get_coordinate(
    event: &BytesStart<'_>,
    attribute: &'static str,
) -> Result<Option<f64>, OsmXmlError> {
    match get_attr_value(event, attribute.as_bytes())? {
        Some(value) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| OsmXmlError::InvalidCoordinate { attribute, value }),
        None => Ok(None),
    }
}

fn insert_tag(event: &BytesStart<'_>, tags: &mut HashMap<String, String>) -> quick_xml::Result<()> {
    let key = get_attr_value(event, b"k")?.unwrap_or_default();
    let value = get_attr_value(event, b"v")?.unwrap_or_default();
    tags.insert(key, value);
    Ok(())
}

/// Parses an OSM API document and returns the first `node` element in it.
///
/// Only `tag` elements nested inside that node are collected. The `id`
/// attribute of the element is ignored; the node is labelled with `node_id`.
/// The whole document is read, so a truncated body or anything after the
/// root element fails even when the node itself is complete.
pub fn parse_osm_node(xml: &str, node_id: u64) -> Result<OsmNode, OsmXmlError> {
    if xml.trim().is_empty() {
        return Err(OsmXmlError::EmptyDocument);
    }

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut node: Option<OsmNode> = None;
    // 第一個 node 開啟時的深度，結束後設回 None
    let mut node_depth: Option<usize> = None;
    let mut depth = 0usize;
    let mut root_closed = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => {
                if root_closed {
                    return Err(OsmXmlError::ContentOutsideRoot);
                }
                depth += 1;
                if node_depth.is_some() {
                    if let (Some(current), b"tag") = (node.as_mut(), e.name().as_ref()) {
                        insert_tag(&e, &mut current.tags)?;
                    }
                } else if node.is_none() && e.name().as_ref() == b"node" {
                    node = Some(start_node(&e, node_id)?);
                    node_depth = Some(depth);
                }
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err(OsmXmlError::ContentOutsideRoot);
                }
                if node_depth.is_some() {
                    if let (Some(current), b"tag") = (node.as_mut(), e.name().as_ref()) {
                        insert_tag(&e, &mut current.tags)?;
                    }
                } else if node.is_none() && e.name().as_ref() == b"node" {
                    // <node .../> 沒有子元素
                    node = Some(start_node(&e, node_id)?);
                }
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                if node_depth == Some(depth) {
                    node_depth = None;
                }
                depth = depth
                    .checked_sub(1)
                    .ok_or(OsmXmlError::ContentOutsideRoot)?;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(_) | Event::CData(_) => {
                if depth == 0 {
                    return Err(OsmXmlError::ContentOutsideRoot);
                }
            }
            _ => {}
        }
        buf.clear();
    }

    if depth > 0 {
        return Err(OsmXmlError::UnexpectedEof { open: depth });
    }

    node.ok_or(OsmXmlError::MissingNode)
}

fn start_node(event: &BytesStart<'_>, node_id: u64) -> Result<OsmNode, OsmXmlError> {
    let mut node = OsmNode::new(node_id);
    node.latitude = get_coordinate(event, "lat")?;
    node.longitude = get_coordinate(event, "lon")?;
    Ok(node)
}

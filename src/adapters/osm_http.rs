use crate::adapters::osm_xml::parse_osm_node;
use crate::domain::model::OsmNode;
use crate::domain::ports::{ConfigProvider, OsmDataService};
use crate::utils::error::{PosError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

pub const DEFAULT_OSM_API_URL: &str = "https://www.openstreetmap.org/api/0.6/node";

/// Transport-level reasons a node could not be fetched. Logged, then
/// reported as `PosError::OsmNodeNotFound`.
#[derive(Error, Debug)]
pub enum OsmFetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("remote reported not found")]
    NotFound,

    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("empty response body")]
    EmptyBody,
}

/// Fetches nodes from an OpenStreetMap-compatible XML API.
///
/// The `Client` is injected so callers can share one connection pool and
/// tests can point the adapter at a mock server.
#[derive(Debug, Clone)]
pub struct HttpOsmDataService {
    client: Client,
    base_url: String,
}

impl HttpOsmDataService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(client: Client, config: &C) -> Self {
        Self::new(client, config.api_endpoint())
    }

    /// Builds a client honouring the configured user agent.
    pub fn build_client<C: ConfigProvider>(config: &C) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent.to_string());
        }
        Ok(builder.build()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn node_url(&self, node_id: u64) -> String {
        format!("{}/{}", self.base_url, node_id)
    }

    async fn fetch_body(&self, node_id: u64) -> std::result::Result<String, OsmFetchError> {
        let url = self.node_url(node_id);
        tracing::debug!("Making OSM API request to: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        tracing::debug!("OSM API response status: {}", status);
        if status == StatusCode::NOT_FOUND {
            return Err(OsmFetchError::NotFound);
        }
        if !status.is_success() {
            return Err(OsmFetchError::UnexpectedStatus(status));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(OsmFetchError::EmptyBody);
        }
        Ok(body)
    }
}

#[async_trait]
impl OsmDataService for HttpOsmDataService {
    async fn fetch_node(&self, node_id: u64) -> Result<OsmNode> {
        tracing::info!("Fetching OSM node {} from OpenStreetMap API", node_id);

        let body = self.fetch_body(node_id).await.map_err(|e| {
            tracing::error!("Error fetching OSM node {}: {}", node_id, e);
            PosError::OsmNodeNotFound(node_id)
        })?;

        let node = parse_osm_node(&body, node_id).map_err(|e| {
            tracing::error!("Error parsing OSM XML for node {}: {}", node_id, e);
            PosError::OsmNodeNotFound(node_id)
        })?;

        tracing::info!(
            "Successfully fetched OSM node {}: {}",
            node_id,
            node.tag("name").unwrap_or("<unnamed>")
        );
        Ok(node)
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("OpenStreetMap node {0} not found")]
    OsmNodeNotFound(u64),

    #[error("OpenStreetMap node {0} is missing required fields")]
    OsmNodeMissingFields(u64),

    #[error("A POS named '{0}' already exists")]
    DuplicatePosName(String),

    #[error("POS with ID {0} not found")]
    PosNotFound(u64),

    #[error("HTTP client error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PosError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PosError::OsmNodeNotFound(_) | PosError::PosNotFound(_) => ErrorSeverity::Medium,
            PosError::OsmNodeMissingFields(_) | PosError::DuplicatePosName(_) => {
                ErrorSeverity::High
            }
            PosError::ConfigError { .. } | PosError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            PosError::ApiError(_)
            | PosError::IoError(_)
            | PosError::SerializationError(_)
            | PosError::StorageError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PosError::OsmNodeNotFound(node_id) => {
                format!("Could not load OpenStreetMap node {}", node_id)
            }
            PosError::OsmNodeMissingFields(node_id) => format!(
                "OpenStreetMap node {} lacks a name or a complete address",
                node_id
            ),
            PosError::DuplicatePosName(name) => {
                format!("The name '{}' is already taken by another POS", name)
            }
            PosError::PosNotFound(id) => format!("There is no POS with ID {}", id),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PosError::OsmNodeNotFound(_) => {
                "Check the node ID and that the OSM API endpoint is reachable"
            }
            PosError::OsmNodeMissingFields(_) => {
                "Add name, addr:street, addr:housenumber, addr:city and a numeric addr:postcode to the node"
            }
            PosError::DuplicatePosName(_) => "Rename or update the existing POS instead",
            PosError::PosNotFound(_) => "Create the POS first or use an existing ID",
            PosError::ConfigError { .. } | PosError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
            PosError::ApiError(_) => "Check TLS and proxy settings of the HTTP client",
            PosError::IoError(_) => "Check that the file exists and is readable",
            PosError::SerializationError(_) | PosError::StorageError { .. } => {
                "Retry the operation; report a bug if it keeps failing"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PosError>;

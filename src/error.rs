//! Error types for schema editing and the remote migration service.

use thiserror::Error;

/// Local validation failures. Raised before any remote call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Table name cannot be empty")]
    EmptyTableName,

    #[error("Column name and type cannot be empty")]
    InvalidColumn { index: usize },

    #[error("New table name cannot be empty")]
    EmptyNewTableName,

    #[error("Table name already exists. Please choose a different name.")]
    DuplicateTableName(String),

    #[error("There must be at least one column")]
    LastColumn,

    #[error("Column index {index} is out of range ({len} columns)")]
    ColumnIndexOutOfRange { index: usize, len: usize },

    #[error("No table selected")]
    NoTableSelected,

    #[error("Table not found: {0}")]
    UnknownTable(String),

    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Malformed column spec '{0}', expected name:type[:attr,attr]")]
    MalformedColumnSpec(String),
}

/// Failures talking to the migration service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error returned by every controller operation.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl SchemaError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SchemaError::Validation(_))
    }
}

/// Result type alias for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

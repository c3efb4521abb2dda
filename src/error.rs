use thiserror::Error;

/// Main error type for Relmap
#[derive(Error, Debug)]
pub enum RelmapError {
    /// Rejected mutation or malformed import (empty name, self-loop, bad shape)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Edge references a node id that does not exist at build time
    #[error("Integrity error: edge {edge_id} references missing node {node_id}")]
    Integrity { edge_id: String, node_id: String },

    /// Operation outside the store's contract (e.g. delete)
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing document (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient Result type using RelmapError
pub type Result<T> = std::result::Result<T, RelmapError>;

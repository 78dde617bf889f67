//! Error types for the document schema

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Block order references missing block: {0}")]
    DanglingBlock(String),

    #[error("Block is not listed in block order: {0}")]
    OrphanBlock(String),

    #[error("Block listed more than once in block order: {0}")]
    DuplicateOrderEntry(String),

    #[error("Block key {key} does not match block id {id}")]
    MismatchedKey { key: String, id: String },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

//! Storage error types

use bondweave_core::{ArticleId, BoardId, EdgeId};
use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors raised while loading or assembling a store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported fixture format: {0}")]
    UnsupportedFormat(String),

    #[error("Schema error: {0}")]
    Schema(#[from] bondweave_core::Error),

    #[error("Board not found: {0}")]
    BoardNotFound(BoardId),

    #[error("Duplicate board: {0}")]
    DuplicateBoard(BoardId),

    #[error("Duplicate article: {0}")]
    DuplicateArticle(ArticleId),

    #[error("Duplicate edge: {0}")]
    DuplicateEdge(EdgeId),

    #[error("Article {article} uses unknown category {category}")]
    UnknownCategory { article: ArticleId, category: String },

    #[error("Edge {edge} references missing article {article}")]
    DanglingEdge { edge: EdgeId, article: ArticleId },

    #[error("Lock error: {0}")]
    Lock(String),
}

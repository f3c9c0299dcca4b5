//! Error types for Bondweave Core

use crate::article::ArticleId;
use crate::limits::LimitError;
use crate::store::StoreError;
use thiserror::Error;

/// Result type alias using Bondweave's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Bondweave error types
///
/// These are faults, not validation outcomes. A value that merely fails its
/// schema is reported as a [`Rejection`](crate::validator::Rejection).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Family not found: {0}")]
    FamilyNotFound(String),

    #[error("Field not found: {category}.{field}")]
    FieldNotFound { category: String, field: String },

    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    #[error("Field already exists: {category}.{field}")]
    DuplicateField { category: String, field: String },

    #[error("Article not found: {0}")]
    ArticleNotFound(ArticleId),

    #[error("Ill-typed content: {0}")]
    IllTyped(String),

    #[error("Limit exceeded: {0}")]
    Limit(#[from] LimitError),

    #[error("Article store error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::FamilyNotFound(name) => Self::FamilyNotFound(name),
            other => Self::Store(other),
        }
    }
}

impl Error {
    /// Whether the failure came from the article store's transport and the
    /// operation may be retried as-is.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Store(StoreError::Transport(_)))
    }

    /// Whether the failure is a schema lookup miss (schema and caller out
    /// of sync).
    pub fn is_schema_desync(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound(_)
                | Self::FamilyNotFound(_)
                | Self::FieldNotFound { .. }
                | Self::Store(StoreError::FamilyNotFound(_))
        )
    }
}

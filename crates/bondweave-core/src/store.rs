//! Article store trait definition
//!
//! The engine never owns article data. Every cross-article fact comes from
//! an [`ArticleStore`], and every call on it is a suspension point.

use crate::article::{ArticleId, ArticleMeta};
use crate::bond::Edge;
use crate::error::Error;
use crate::filter::FamilyFilter;
use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures reported by an article store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Article not found: {0}")]
    NotFound(ArticleId),

    /// Store unreachable or timed out; the call may be retried
    #[error("Transport error: {0}")]
    Transport(String),

    /// The bonder query named a family the board does not define
    #[error("Family not found: {0}")]
    FamilyNotFound(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

impl StoreError {
    /// Classify a failure raised while applying a bond filter
    pub fn from_filter(err: Error) -> Self {
        match err {
            Error::FamilyNotFound(name) => Self::FamilyNotFound(name),
            Error::Store(err) => err,
            other => Self::InvalidFilter(other.to_string()),
        }
    }
}

/// Read-side collaborator consumed by the validators and the graph builder
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Fetch article metadata by id
    async fn get_article_meta(&self, id: ArticleId) -> StoreResult<ArticleMeta>;

    /// Fetch the outgoing bonds of an article together with their targets
    ///
    /// Only bonds whose target passes the filter are returned: a non-empty
    /// `category_set` restricts by category name and overrides
    /// `family_filter`. Results are ordered by edge id.
    async fn get_bonds(
        &self,
        id: ArticleId,
        category_set: Option<&BTreeSet<String>>,
        family_filter: &FamilyFilter,
    ) -> StoreResult<Vec<(Edge, ArticleMeta)>>;
}

#[async_trait]
impl<S: ArticleStore + ?Sized> ArticleStore for std::sync::Arc<S> {
    async fn get_article_meta(&self, id: ArticleId) -> StoreResult<ArticleMeta> {
        (**self).get_article_meta(id).await
    }

    async fn get_bonds(
        &self,
        id: ArticleId,
        category_set: Option<&BTreeSet<String>>,
        family_filter: &FamilyFilter,
    ) -> StoreResult<Vec<(Edge, ArticleMeta)>> {
        (**self).get_bonds(id, category_set, family_filter).await
    }
}

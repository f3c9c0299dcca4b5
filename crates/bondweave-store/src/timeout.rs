//! Per-call timeout wrapper for article stores

use async_trait::async_trait;
use bondweave_core::{
    ArticleId, ArticleMeta, ArticleStore, Edge, FamilyFilter, StoreError, StoreResult,
};
use std::collections::BTreeSet;
use std::time::Duration;

/// Turns slow store calls into transport errors
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: ArticleStore> ArticleStore for TimeoutStore<S> {
    async fn get_article_meta(&self, id: ArticleId) -> StoreResult<ArticleMeta> {
        match tokio::time::timeout(self.timeout, self.inner.get_article_meta(id)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Article meta lookup for {} timed out", id);
                Err(StoreError::Transport(format!(
                    "get_article_meta({}) timed out after {:?}",
                    id, self.timeout
                )))
            }
        }
    }

    async fn get_bonds(
        &self,
        id: ArticleId,
        category_set: Option<&BTreeSet<String>>,
        family_filter: &FamilyFilter,
    ) -> StoreResult<Vec<(Edge, ArticleMeta)>> {
        let call = self.inner.get_bonds(id, category_set, family_filter);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Bonder query for {} timed out", id);
                Err(StoreError::Transport(format!(
                    "get_bonds({}) timed out after {:?}",
                    id, self.timeout
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Board, MemoryArticleStore};
    use bondweave_core::{Category, GraphBuilder, GraphQuery, Schema};

    /// Store that never answers
    struct Stalled;

    #[async_trait]
    impl ArticleStore for Stalled {
        async fn get_article_meta(&self, _id: ArticleId) -> StoreResult<ArticleMeta> {
            std::future::pending().await
        }

        async fn get_bonds(
            &self,
            _id: ArticleId,
            _category_set: Option<&BTreeSet<String>>,
            _family_filter: &FamilyFilter,
        ) -> StoreResult<Vec<(Edge, ArticleMeta)>> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_store_becomes_transport_error() {
        let store = TimeoutStore::new(Stalled, Duration::from_millis(10));

        let result = store.get_article_meta(ArticleId(1)).await;
        assert!(matches!(result, Err(StoreError::Transport(_))));

        let err = GraphBuilder::build(&store, &GraphQuery::new(1))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_fast_store_passes_through() {
        let memory = MemoryArticleStore::new();
        let schema = Schema::new(vec![Category::new("News")]).unwrap();
        memory.save_board(Board::new(1, "b", schema)).unwrap();
        memory
            .save_article(ArticleMeta::new(1, 1, "News", "only"))
            .unwrap();

        let store = TimeoutStore::new(memory, Duration::from_secs(1));
        let meta = store.get_article_meta(ArticleId(1)).await.unwrap();
        assert_eq!(meta.title, "only");
    }
}

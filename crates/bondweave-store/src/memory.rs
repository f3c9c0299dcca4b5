//! In-memory article store

use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use bondweave_core::{
    ArticleId, ArticleMeta, ArticleStore, BoardId, BondFilter, Edge, FamilyFilter, Schema,
    StoreError, StoreResult,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

/// A board and its parsed schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub board_name: String,
    pub schema: Schema,
}

impl Board {
    pub fn new(id: impl Into<BoardId>, board_name: impl Into<String>, schema: Schema) -> Self {
        Self {
            id: id.into(),
            board_name: board_name.into(),
            schema,
        }
    }
}

/// In-memory article store
///
/// Useful for testing and for serving fixtures.
pub struct MemoryArticleStore {
    boards: RwLock<HashMap<BoardId, Board>>,
    articles: RwLock<HashMap<ArticleId, ArticleMeta>>,
    edges: RwLock<Vec<Edge>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self {
            boards: RwLock::new(HashMap::new()),
            articles: RwLock::new(HashMap::new()),
            edges: RwLock::new(Vec::new()),
        }
    }

    /// Register a board
    pub fn save_board(&self, board: Board) -> StorageResult<()> {
        let mut boards = self
            .boards
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        if boards.contains_key(&board.id) {
            return Err(StorageError::DuplicateBoard(board.id));
        }
        boards.insert(board.id, board);
        Ok(())
    }

    /// Add an article, filling in board name and category families from
    /// the board's schema
    pub fn save_article(&self, mut meta: ArticleMeta) -> StorageResult<()> {
        {
            let boards = self
                .boards
                .read()
                .map_err(|e| StorageError::Lock(e.to_string()))?;
            let board = boards
                .get(&meta.board_id)
                .ok_or(StorageError::BoardNotFound(meta.board_id))?;
            let category = board.schema.category(&meta.category_name).map_err(|_| {
                StorageError::UnknownCategory {
                    article: meta.id,
                    category: meta.category_name.clone(),
                }
            })?;
            meta.board_name = board.board_name.clone();
            meta.category_families = category.families.iter().cloned().collect();
        }

        let mut articles = self
            .articles
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        if articles.contains_key(&meta.id) {
            return Err(StorageError::DuplicateArticle(meta.id));
        }
        articles.insert(meta.id, meta);
        Ok(())
    }

    /// Add an edge between two stored articles
    pub fn save_edge(&self, edge: Edge) -> StorageResult<()> {
        {
            let articles = self
                .articles
                .read()
                .map_err(|e| StorageError::Lock(e.to_string()))?;
            for endpoint in [edge.from, edge.to] {
                if !articles.contains_key(&endpoint) {
                    return Err(StorageError::DanglingEdge {
                        edge: edge.id,
                        article: endpoint,
                    });
                }
            }
        }

        let mut edges = self
            .edges
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        if edges.iter().any(|e| e.id == edge.id) {
            return Err(StorageError::DuplicateEdge(edge.id));
        }
        edges.push(edge);
        Ok(())
    }

    /// Schema of a board
    pub fn schema(&self, board_id: BoardId) -> StorageResult<Schema> {
        let boards = self
            .boards
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        boards
            .get(&board_id)
            .map(|b| b.schema.clone())
            .ok_or(StorageError::BoardNotFound(board_id))
    }

    pub fn board_ids(&self) -> StorageResult<Vec<BoardId>> {
        let boards = self
            .boards
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        let mut ids: Vec<BoardId> = boards.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}

impl Default for MemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Transport(format!("Lock error: {}", e))
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn get_article_meta(&self, id: ArticleId) -> StoreResult<ArticleMeta> {
        let articles = self.articles.read().map_err(lock_error)?;
        articles.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn get_bonds(
        &self,
        id: ArticleId,
        category_set: Option<&BTreeSet<String>>,
        family_filter: &FamilyFilter,
    ) -> StoreResult<Vec<(Edge, ArticleMeta)>> {
        let articles = self.articles.read().map_err(lock_error)?;
        let source = articles.get(&id).ok_or(StoreError::NotFound(id))?;

        let boards = self.boards.read().map_err(lock_error)?;
        let families = boards
            .get(&source.board_id)
            .map(|b| b.schema.families())
            .ok_or_else(|| StoreError::Transport(format!("board {} missing", source.board_id)))?;

        let filter = BondFilter::new(category_set.cloned(), family_filter.clone());
        let edges = self.edges.read().map_err(lock_error)?;
        let mut outgoing: Vec<&Edge> = edges.iter().filter(|e| e.from == id).collect();
        outgoing.sort_by_key(|e| e.id);

        let mut bonds = Vec::with_capacity(outgoing.len());
        for edge in outgoing {
            let Some(target) = articles.get(&edge.to) else {
                continue;
            };
            let admitted = filter
                .admits(&target.category_name, families)
                .map_err(StoreError::from_filter)?;
            if admitted {
                bonds.push((edge.clone(), target.clone()));
            }
        }

        tracing::trace!("Bonder query for {} returned {} bonds", id, bonds.len());
        Ok(bonds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondweave_core::{Category, EdgeId};

    fn store() -> MemoryArticleStore {
        let schema = Schema::new(vec![
            Category::new("News").in_family("Reporting"),
            Category::new("Opinion").in_family("Reporting"),
            Category::new("Sports"),
        ])
        .unwrap();

        let store = MemoryArticleStore::new();
        store.save_board(Board::new(1, "town", schema)).unwrap();
        store.save_article(ArticleMeta::new(1, 1, "News", "root")).unwrap();
        store.save_article(ArticleMeta::new(2, 1, "Opinion", "take")).unwrap();
        store.save_article(ArticleMeta::new(3, 1, "Sports", "game")).unwrap();
        store.save_edge(Edge::new(12, 1, 3, "mentions")).unwrap();
        store.save_edge(Edge::new(11, 1, 2, "mentions")).unwrap();
        store
    }

    #[tokio::test]
    async fn test_article_meta_is_decorated() {
        let store = store();
        let meta = store.get_article_meta(ArticleId(2)).await.unwrap();

        assert_eq!(meta.board_name, "town");
        assert_eq!(meta.category_families, vec!["Reporting".to_string()]);
        assert_eq!(
            store.get_article_meta(ArticleId(9)).await,
            Err(StoreError::NotFound(ArticleId(9)))
        );
    }

    #[tokio::test]
    async fn test_bonds_sorted_and_filtered() {
        let store = store();

        let all = store
            .get_bonds(ArticleId(1), None, &FamilyFilter::None)
            .await
            .unwrap();
        let ids: Vec<EdgeId> = all.iter().map(|(e, _)| e.id).collect();
        assert_eq!(ids, vec![EdgeId(11), EdgeId(12)]);

        let reporting = store
            .get_bonds(ArticleId(1), None, &FamilyFilter::white_list(["Reporting"]))
            .await
            .unwrap();
        assert_eq!(reporting.len(), 1);
        assert_eq!(reporting[0].1.id, ArticleId(2));

        let sports: BTreeSet<String> = ["Sports".to_string()].into();
        let by_category = store
            .get_bonds(
                ArticleId(1),
                Some(&sports),
                &FamilyFilter::white_list(["Reporting"]),
            )
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].1.id, ArticleId(3));
    }

    #[tokio::test]
    async fn test_unknown_filter_family() {
        let store = store();
        let result = store
            .get_bonds(ArticleId(1), None, &FamilyFilter::black_list(["Nope"]))
            .await;
        assert_eq!(result, Err(StoreError::FamilyNotFound("Nope".to_string())));
    }

    #[test]
    fn test_consistency_checks() {
        let store = store();

        assert!(matches!(
            store.save_article(ArticleMeta::new(4, 1, "Weather", "rain")),
            Err(StorageError::UnknownCategory { .. })
        ));
        assert!(matches!(
            store.save_article(ArticleMeta::new(5, 7, "News", "lost")),
            Err(StorageError::BoardNotFound(BoardId(7)))
        ));
        assert!(matches!(
            store.save_edge(Edge::new(13, 1, 42, "x")),
            Err(StorageError::DanglingEdge { .. })
        ));
        assert!(matches!(
            store.save_edge(Edge::new(11, 2, 3, "x")),
            Err(StorageError::DuplicateEdge(EdgeId(11)))
        ));
    }
}

//! Board fixtures: boards, articles and edges loaded from JSON or TOML

use crate::error::{StorageError, StorageResult};
use crate::memory::{Board, MemoryArticleStore};
use bondweave_core::{ArticleMeta, Edge};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized store contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub boards: Vec<Board>,

    #[serde(default)]
    pub articles: Vec<ArticleMeta>,

    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Fixture {
    /// Read a fixture, picking the format from the file extension
    pub fn load(path: &Path) -> StorageResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        tracing::debug!("Loading {} fixture from {:?}", extension, path);

        match extension.as_str() {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            other => Err(StorageError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_json(content: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> StorageResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build a store, checking that every reference resolves
    pub fn into_store(self) -> StorageResult<MemoryArticleStore> {
        let store = MemoryArticleStore::new();
        let (boards, articles, edges) = (self.boards.len(), self.articles.len(), self.edges.len());

        for board in self.boards {
            store.save_board(board)?;
        }
        for article in self.articles {
            store.save_article(article)?;
        }
        for edge in self.edges {
            store.save_edge(edge)?;
        }

        tracing::info!(
            "Loaded fixture: {} boards, {} articles, {} edges",
            boards,
            articles,
            edges
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondweave_core::{ArticleId, ArticleStore, BoardId, FamilyFilter};
    use std::io::Write;

    const FIXTURE_JSON: &str = r#"{
        "boards": [{
            "id": 1,
            "board_name": "town",
            "schema": {"categories": [
                {"name": "News", "families": ["Reporting"], "fields": [
                    {"name": "see-also", "datatype": {"kind": "array", "t": {
                        "kind": "bond", "bondee": {"kind": "all"}
                    }}}
                ]}
            ]}
        }],
        "articles": [
            {"id": 1, "board_id": 1, "category_name": "News", "title": "first"},
            {"id": 2, "board_id": 1, "category_name": "News", "title": "second"}
        ],
        "edges": [
            {"id": 10, "from": 1, "to": 2, "energy": 5, "name": "see-also"}
        ]
    }"#;

    const FIXTURE_TOML: &str = r#"
[[boards]]
id = 3
board_name = "club"

[[boards.schema.categories]]
name = "Match"
fields = []

[[articles]]
id = 7
board_id = 3
category_name = "Match"
title = "final"
"#;

    #[tokio::test]
    async fn test_json_fixture() {
        let store = Fixture::from_json(FIXTURE_JSON).unwrap().into_store().unwrap();

        let bonds = store
            .get_bonds(ArticleId(1), None, &FamilyFilter::None)
            .await
            .unwrap();
        assert_eq!(bonds.len(), 1);
        assert_eq!(bonds[0].0.energy, 5);
        assert_eq!(bonds[0].1.title, "second");
        assert!(store.schema(BoardId(1)).unwrap().family("Reporting").is_ok());
    }

    #[tokio::test]
    async fn test_toml_fixture_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(FIXTURE_TOML.as_bytes()).unwrap();

        let store = Fixture::load(file.path()).unwrap().into_store().unwrap();
        let meta = store.get_article_meta(ArticleId(7)).await.unwrap();
        assert_eq!(meta.board_name, "club");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            Fixture::load(file.path()),
            Err(StorageError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut fixture = Fixture::from_json(FIXTURE_JSON).unwrap();
        fixture.articles.truncate(1);

        assert!(matches!(
            fixture.into_store(),
            Err(StorageError::DanglingEdge { .. })
        ));
    }
}

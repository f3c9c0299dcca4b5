//! Article and board identifiers, and the article metadata the engine reads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub i64);

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ArticleId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(pub i64);

impl std::fmt::Display for BoardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BoardId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Article metadata (a graph node)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleMeta {
    /// Unique identifier
    pub id: ArticleId,

    /// Board the article was posted on
    pub board_id: BoardId,

    /// Board name (for convenience)
    #[serde(default)]
    pub board_name: String,

    /// Category the article was written in
    pub category_name: String,

    /// Families of the category at posting time
    #[serde(default)]
    pub category_families: Vec<String>,

    pub title: String,

    #[serde(default)]
    pub author_name: String,

    /// Accumulated energy
    #[serde(default)]
    pub energy: i64,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub create_time: DateTime<Utc>,
}

impl ArticleMeta {
    /// Create article metadata with empty decorations
    pub fn new(
        id: impl Into<ArticleId>,
        board_id: impl Into<BoardId>,
        category_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            board_id: board_id.into(),
            board_name: String::new(),
            category_name: category_name.into(),
            category_families: Vec::new(),
            title: title.into(),
            author_name: String::new(),
            energy: 0,
            create_time: Utc::now(),
        }
    }
}

//! Bond values and the edges they materialize into

use crate::article::ArticleId;
use serde::{Deserialize, Serialize};

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub i64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EdgeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// The value stored in a bond field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    /// Weight of the bond, never negative once accepted
    pub energy: i64,

    /// Article the bond points to
    pub target_article: ArticleId,

    /// Optional free-form label
    #[serde(default)]
    pub tag: Option<String>,
}

impl Bond {
    /// Create an untagged bond with zero energy
    pub fn new(target: impl Into<ArticleId>) -> Self {
        Self {
            energy: 0,
            target_article: target.into(),
            tag: None,
        }
    }

    pub fn with_energy(mut self, energy: i64) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A persisted bond between two articles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier
    pub id: EdgeId,

    /// Source article
    pub from: ArticleId,

    /// Target article
    pub to: ArticleId,

    pub energy: i64,

    /// Name of the field the bond was declared in
    pub name: String,
}

impl Edge {
    pub fn new(
        id: impl Into<EdgeId>,
        from: impl Into<ArticleId>,
        to: impl Into<ArticleId>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            energy: 0,
            name: name.into(),
        }
    }

    /// Materialize a bond stored in `field` of article `from`
    pub fn from_bond(
        id: impl Into<EdgeId>,
        from: impl Into<ArticleId>,
        field: impl Into<String>,
        bond: &Bond,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: bond.target_article,
            energy: bond.energy,
            name: field.into(),
        }
    }

    pub fn with_energy(mut self, energy: i64) -> Self {
        self.energy = energy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_from_bond() {
        let bond = Bond::new(2).with_energy(5).with_tag("context");
        let edge = Edge::from_bond(10, 1, "see-also", &bond);

        assert_eq!(edge.id, EdgeId(10));
        assert_eq!(edge.from, ArticleId(1));
        assert_eq!(edge.to, ArticleId(2));
        assert_eq!(edge.energy, 5);
        assert_eq!(edge.name, "see-also");
    }

    #[test]
    fn test_bond_tag_defaults_to_none() {
        let bond: Bond = serde_json::from_str(r#"{"energy": 0, "target_article": 4}"#).unwrap();
        assert_eq!(bond, Bond::new(4));
    }
}

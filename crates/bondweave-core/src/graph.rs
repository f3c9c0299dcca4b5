//! Bond graph types and the breadth-first graph builder

use crate::article::{ArticleId, ArticleMeta};
use crate::bond::{Edge, EdgeId};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::filter::FamilyFilter;
use crate::limits::{self, DEFAULT_GRAPH_NODES};
use crate::store::{ArticleStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Articles reachable through bonds, with the bonds between them
///
/// Nodes are listed in discovery order and are unique by id; edges are
/// unique by id and only connect listed nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<ArticleMeta>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: ArticleId) -> Option<&ArticleMeta> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_ids(&self) -> Vec<ArticleId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.iter().map(|e| e.id).collect()
    }

    /// Whether ids are unique and no edge dangles
    pub fn is_consistent(&self) -> bool {
        let ids: HashSet<ArticleId> = self.nodes.iter().map(|n| n.id).collect();
        let edge_ids: HashSet<EdgeId> = self.edges.iter().map(|e| e.id).collect();
        ids.len() == self.nodes.len()
            && edge_ids.len() == self.edges.len()
            && self
                .edges
                .iter()
                .all(|e| ids.contains(&e.from) && ids.contains(&e.to))
    }
}

fn default_max_nodes() -> usize {
    DEFAULT_GRAPH_NODES
}

/// Graph query builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQuery {
    /// Article the traversal starts from
    pub root: ArticleId,

    /// Restrict targets to these categories (takes precedence over the
    /// family filter when non-empty)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_set: Option<BTreeSet<String>>,

    #[serde(default)]
    pub family_filter: FamilyFilter,

    /// Stop discovering nodes past this count
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
}

impl GraphQuery {
    pub fn new(root: impl Into<ArticleId>) -> Self {
        Self {
            root: root.into(),
            category_set: None,
            family_filter: FamilyFilter::None,
            max_nodes: default_max_nodes(),
        }
    }

    /// Only follow bonds into these categories
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_set = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_family_filter(mut self, filter: FamilyFilter) -> Self {
        self.family_filter = filter;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.max_nodes = config.max_graph_nodes;
        self
    }
}

/// Counters collected while building a graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes_expanded: usize,
    pub edges_seen: usize,
    pub edges_dropped: usize,
    /// The node cap stopped discovery
    pub truncated: bool,
}

/// Bond graph builder
pub struct GraphBuilder;

impl GraphBuilder {
    /// Build the graph for a query
    pub async fn build<S: ArticleStore + ?Sized>(store: &S, query: &GraphQuery) -> Result<Graph> {
        Self::build_with_stats(store, query)
            .await
            .map(|(graph, _)| graph)
    }

    /// Build the graph for a query, also returning traversal counters
    ///
    /// Any store failure aborts the whole build; no partial graph is
    /// returned.
    pub async fn build_with_stats<S: ArticleStore + ?Sized>(
        store: &S,
        query: &GraphQuery,
    ) -> Result<(Graph, GraphStats)> {
        limits::validate_graph_nodes(query.max_nodes)?;
        tracing::debug!(
            "Building bond graph: root={}, categories={:?}, filter={:?}, max_nodes={}",
            query.root,
            query.category_set,
            query.family_filter,
            query.max_nodes
        );

        let root = match store.get_article_meta(query.root).await {
            Ok(meta) => meta,
            Err(StoreError::NotFound(id)) => return Err(Error::ArticleNotFound(id)),
            Err(err) => return Err(err.into()),
        };

        let mut graph = Graph::new();
        let mut stats = GraphStats::default();
        let mut visited: HashSet<ArticleId> = HashSet::new();
        let mut seen_edges: HashSet<EdgeId> = HashSet::new();
        let mut queue: VecDeque<ArticleId> = VecDeque::new();

        visited.insert(root.id);
        queue.push_back(root.id);
        graph.nodes.push(root);

        while let Some(current) = queue.pop_front() {
            stats.nodes_expanded += 1;

            let bonds = store
                .get_bonds(current, query.category_set.as_ref(), &query.family_filter)
                .await?;

            for (edge, target) in bonds {
                stats.edges_seen += 1;

                if edge.from != current || edge.to != target.id {
                    tracing::warn!(
                        "Store returned edge {} ({} -> {}) with target {} while expanding {}",
                        edge.id,
                        edge.from,
                        edge.to,
                        target.id,
                        current
                    );
                    stats.edges_dropped += 1;
                    continue;
                }

                if !visited.contains(&target.id) {
                    if visited.len() >= query.max_nodes {
                        stats.truncated = true;
                        stats.edges_dropped += 1;
                        continue;
                    }
                    visited.insert(target.id);
                    queue.push_back(target.id);
                    graph.nodes.push(target);
                }

                if seen_edges.insert(edge.id) {
                    graph.edges.push(edge);
                }
            }
        }

        tracing::debug!(
            "Bond graph built: {} nodes, {} edges ({} expanded, {} dropped, truncated={})",
            graph.nodes.len(),
            graph.edges.len(),
            stats.nodes_expanded,
            stats.edges_dropped,
            stats.truncated
        );

        Ok((graph, stats))
    }
}

/// Build the bond graph around `root` with the default node cap
pub async fn build_graph<S: ArticleStore + ?Sized>(
    store: &S,
    root: ArticleId,
    category_set: Option<&BTreeSet<String>>,
    family_filter: &FamilyFilter,
) -> Result<Graph> {
    let query = GraphQuery {
        root,
        category_set: category_set.cloned(),
        family_filter: family_filter.clone(),
        max_nodes: default_max_nodes(),
    };
    GraphBuilder::build(store, &query).await
}

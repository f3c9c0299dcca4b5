//! In-crate article store double for unit tests

use crate::article::{ArticleId, ArticleMeta};
use crate::bond::Edge;
use crate::family::FamilyIndex;
use crate::filter::{BondFilter, FamilyFilter};
use crate::store::{ArticleStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct StubStore {
    metas: HashMap<ArticleId, ArticleMeta>,
    edges: Vec<Edge>,
    families: FamilyIndex,
    failing_meta: HashSet<ArticleId>,
    failing_bonds: HashSet<ArticleId>,
    meta_calls: AtomicUsize,
    bond_calls: AtomicUsize,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_article(mut self, meta: ArticleMeta) -> Self {
        self.metas.insert(meta.id, meta);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn with_families(mut self, families: FamilyIndex) -> Self {
        self.families = families;
        self
    }

    pub fn failing_meta(mut self, id: impl Into<ArticleId>) -> Self {
        self.failing_meta.insert(id.into());
        self
    }

    pub fn failing_bonds(mut self, id: impl Into<ArticleId>) -> Self {
        self.failing_bonds.insert(id.into());
        self
    }

    pub fn meta_calls(&self) -> usize {
        self.meta_calls.load(Ordering::SeqCst)
    }

    pub fn bond_calls(&self) -> usize {
        self.bond_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleStore for StubStore {
    async fn get_article_meta(&self, id: ArticleId) -> StoreResult<ArticleMeta> {
        self.meta_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_meta.contains(&id) {
            return Err(StoreError::Transport("connection reset".to_string()));
        }
        self.metas.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn get_bonds(
        &self,
        id: ArticleId,
        category_set: Option<&BTreeSet<String>>,
        family_filter: &FamilyFilter,
    ) -> StoreResult<Vec<(Edge, ArticleMeta)>> {
        self.bond_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_bonds.contains(&id) {
            return Err(StoreError::Transport("timed out".to_string()));
        }

        let filter = BondFilter::new(category_set.cloned(), family_filter.clone());
        let mut edges: Vec<&Edge> = self.edges.iter().filter(|e| e.from == id).collect();
        edges.sort_by_key(|e| e.id);

        let mut bonds = Vec::new();
        for edge in edges {
            let Some(target) = self.metas.get(&edge.to) else {
                continue;
            };
            let admitted = filter
                .admits(&target.category_name, &self.families)
                .map_err(StoreError::from_filter)?;
            if admitted {
                bonds.push((edge.clone(), target.clone()));
            }
        }
        Ok(bonds)
    }
}

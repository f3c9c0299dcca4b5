//! Query-time restrictions on bond targets

use crate::error::Result;
use crate::family::FamilyIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Restriction over category names, expressed through families
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyFilter {
    /// Only categories belonging to one of these families
    WhiteList(BTreeSet<String>),
    /// Every category except those belonging to one of these families
    BlackList(BTreeSet<String>),
    /// Unrestricted
    #[default]
    None,
}

impl FamilyFilter {
    pub fn white_list<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::WhiteList(families.into_iter().map(Into::into).collect())
    }

    pub fn black_list<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BlackList(families.into_iter().map(Into::into).collect())
    }

    /// Whether an article of `category` passes the filter
    ///
    /// Fails when a listed family is unknown to `index`.
    pub fn admits(&self, category: &str, index: &FamilyIndex) -> Result<bool> {
        match self {
            Self::WhiteList(families) => index.any_contains(families, category),
            Self::BlackList(families) => Ok(!index.any_contains(families, category)?),
            Self::None => Ok(true),
        }
    }
}

/// Filter applied by a store's bonder query
///
/// A non-empty `category_set` takes precedence and restricts by category
/// name directly; otherwise `family_filter` applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_set: Option<BTreeSet<String>>,

    #[serde(default)]
    pub family_filter: FamilyFilter,
}

impl BondFilter {
    pub fn new(category_set: Option<BTreeSet<String>>, family_filter: FamilyFilter) -> Self {
        Self {
            category_set,
            family_filter,
        }
    }

    pub fn admits(&self, category: &str, index: &FamilyIndex) -> Result<bool> {
        match &self.category_set {
            Some(set) if !set.is_empty() => Ok(set.contains(category)),
            _ => self.family_filter.admits(category, index),
        }
    }
}

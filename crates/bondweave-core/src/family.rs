//! Family index: family name to the categories declaring membership

use crate::error::{Error, Result};
use crate::schema::Category;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from family name to the set of category names it contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyIndex(BTreeMap<String, BTreeSet<String>>);

impl FamilyIndex {
    /// Derive the index from category declarations
    pub fn from_categories<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Self {
        let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for category in categories {
            for family in &category.families {
                index
                    .entry(family.clone())
                    .or_default()
                    .insert(category.name.clone());
            }
        }
        Self(index)
    }

    /// Categories of a family
    pub fn get(&self, family: &str) -> Result<&BTreeSet<String>> {
        self.0
            .get(family)
            .ok_or_else(|| Error::FamilyNotFound(family.to_string()))
    }

    /// Whether `category` belongs to `family`
    pub fn contains(&self, family: &str, category: &str) -> Result<bool> {
        Ok(self.get(family)?.contains(category))
    }

    /// Whether `category` belongs to any of `families`
    pub fn any_contains<'a>(
        &self,
        families: impl IntoIterator<Item = &'a String>,
        category: &str,
    ) -> Result<bool> {
        for family in families {
            if self.contains(family, category)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("News").in_family("Reporting"),
            Category::new("Opinion").in_family("Reporting").in_family("Debate"),
            Category::new("Sports"),
        ]
    }

    #[test]
    fn test_index_from_categories() {
        let cats = categories();
        let index = FamilyIndex::from_categories(&cats);

        assert_eq!(index.len(), 2);
        let reporting: Vec<_> = index.get("Reporting").unwrap().iter().cloned().collect();
        assert_eq!(reporting, vec!["News", "Opinion"]);
        assert!(index.contains("Debate", "Opinion").unwrap());
        assert!(!index.contains("Debate", "News").unwrap());
    }

    #[test]
    fn test_any_contains_is_union() {
        let cats = categories();
        let index = FamilyIndex::from_categories(&cats);
        let families: BTreeSet<String> = ["Debate".to_string(), "Reporting".to_string()].into();

        assert!(index.any_contains(&families, "News").unwrap());
        assert!(index.any_contains(&families, "Opinion").unwrap());
        assert!(!index.any_contains(&families, "Sports").unwrap());
    }

    #[test]
    fn test_unknown_family_is_an_error() {
        let cats = categories();
        let index = FamilyIndex::from_categories(&cats);
        let families = vec!["Gossip".to_string()];

        assert!(matches!(
            index.any_contains(&families, "News"),
            Err(Error::FamilyNotFound(name)) if name == "Gossip"
        ));
    }
}

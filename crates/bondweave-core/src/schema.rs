//! Board schema model: categories, fields and their datatypes
//!
//! A [`Schema`] is the in-memory form of a board's force definition. It is
//! produced once per definition version and only read afterwards; the
//! [`FamilyIndex`] is recomputed from it on construction.

use crate::error::{Error, Result};
use crate::family::FamilyIndex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Constraint on the legal targets of a bond field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Bondee {
    /// Any category on the same board
    All,
    /// One of the listed categories
    Category { categories: BTreeSet<String> },
    /// Any category belonging to one of the listed families
    Family { families: BTreeSet<String> },
}

impl Bondee {
    pub fn categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Category {
            categories: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn families<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Family {
            families: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// Scalar value kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BasicDataType {
    Text,
    Number,
    Bond { bondee: Bondee },
}

impl BasicDataType {
    pub fn bond(bondee: Bondee) -> Self {
        Self::Bond { bondee }
    }
}

impl std::fmt::Display for BasicDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Number => write!(f, "number"),
            Self::Bond { .. } => write!(f, "bond"),
        }
    }
}

/// Cardinality wrapper around a [`BasicDataType`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "t", rename_all = "lowercase")]
pub enum DataType {
    /// Exactly one value
    Single(BasicDataType),
    /// Zero or one value
    Optional(BasicDataType),
    /// Ordered, possibly empty sequence
    Array(BasicDataType),
}

impl DataType {
    pub fn basic(&self) -> &BasicDataType {
        match self {
            Self::Single(basic) | Self::Optional(basic) | Self::Array(basic) => basic,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(basic) => write!(f, "{}", basic),
            Self::Optional(basic) => write!(f, "{}?", basic),
            Self::Array(basic) => write!(f, "[{}]", basic),
        }
    }
}

/// A typed field of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub datatype: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            datatype,
        }
    }
}

/// A named article template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    /// Families this category belongs to
    #[serde(default)]
    pub families: BTreeSet<String>,

    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            families: BTreeSet::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, datatype: DataType) -> Self {
        self.fields.push(Field::new(name, datatype));
        self
    }

    pub fn in_family(mut self, family: impl Into<String>) -> Self {
        self.families.insert(family.into());
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Result<&Field> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::FieldNotFound {
                category: self.name.clone(),
                field: name.to_string(),
            })
    }

    fn check_unique_fields(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::DuplicateField {
                    category: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Serialized shape of a schema, as handed over by the definition parser
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemaDef {
    categories: Vec<Category>,
}

/// Categories of one board plus the family index derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef", into = "SchemaDef")]
pub struct Schema {
    categories: BTreeMap<String, Category>,
    families: FamilyIndex,
}

impl Schema {
    /// Build a schema from parsed categories
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Result<Self> {
        let mut by_name = BTreeMap::new();
        for category in categories {
            category.check_unique_fields()?;
            if by_name.contains_key(&category.name) {
                return Err(Error::DuplicateCategory(category.name));
            }
            by_name.insert(category.name.clone(), category);
        }

        let families = FamilyIndex::from_categories(by_name.values());
        tracing::debug!(
            "Built schema with {} categories, {} families",
            by_name.len(),
            families.len()
        );

        Ok(Self {
            categories: by_name,
            families,
        })
    }

    /// Look up a category by name
    pub fn category(&self, name: &str) -> Result<&Category> {
        self.categories
            .get(name)
            .ok_or_else(|| Error::CategoryNotFound(name.to_string()))
    }

    /// Category names belonging to a family
    pub fn family(&self, name: &str) -> Result<&BTreeSet<String>> {
        self.families.get(name)
    }

    pub fn families(&self) -> &FamilyIndex {
        &self.families
    }

    /// Categories ordered by name
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }
}

impl TryFrom<SchemaDef> for Schema {
    type Error = Error;

    fn try_from(def: SchemaDef) -> Result<Self> {
        Schema::new(def.categories)
    }
}

impl From<Schema> for SchemaDef {
    fn from(schema: Schema) -> Self {
        Self {
            categories: schema.categories.into_values().collect(),
        }
    }
}

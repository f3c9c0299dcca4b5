//! Bondweave Core - Schema validation and bond-graph engine
//!
//! This crate provides the board schema model, the field and category
//! validators (including asynchronous bond checks), family filters and the
//! bond-graph builder. Article data is reached only through the
//! [`ArticleStore`] trait.

pub mod api;
pub mod article;
pub mod bond;
pub mod config;
pub mod content;
pub mod error;
pub mod family;
pub mod filter;
pub mod graph;
pub mod limits;
pub mod schema;
pub mod store;
pub mod validator;

#[cfg(test)]
mod testing;

pub use api::{ApiError, BondError, DataKind, ErrorCode};
pub use article::{ArticleId, ArticleMeta, BoardId};
pub use bond::{Bond, Edge, EdgeId};
pub use config::EngineConfig;
pub use content::{Content, ContentBuilder, FieldValue, RawContent, RawValue};
pub use error::{Error, Result};
pub use family::FamilyIndex;
pub use filter::{BondFilter, FamilyFilter};
pub use graph::{build_graph, Graph, GraphBuilder, GraphQuery, GraphStats};
pub use schema::{BasicDataType, Bondee, Category, DataType, Field, Schema};
pub use store::{ArticleStore, StoreError, StoreResult};
pub use validator::{outcome_message, FieldRejection, Rejection, Validator};

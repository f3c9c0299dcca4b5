//! Bondweave Store - Article store implementations
//!
//! This crate provides the in-memory article store, fixture loading and a
//! timeout wrapper usable around any [`bondweave_core::ArticleStore`].

pub mod error;
pub mod fixture;
pub mod memory;
pub mod timeout;

pub use error::{StorageError, StorageResult};
pub use fixture::Fixture;
pub use memory::{Board, MemoryArticleStore};
pub use timeout::TimeoutStore;

//! `glovehub-core`: shared building blocks for the catalog browser.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod error;
pub mod id;

pub use error::{CatalogError, CatalogResult};
pub use id::ProductId;

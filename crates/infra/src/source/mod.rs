//! Relation source boundary.
//!
//! Production data access lives outside this workspace; this module defines the
//! seam the engine is fed through, plus in-memory and JSON-file implementations.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryRelationSource;
pub use json_file::JsonFileRelationSource;
pub use r#trait::{RelationSource, SourceError};

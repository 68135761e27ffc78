//! Infrastructure layer: relation sources and configuration.

pub mod config;
pub mod source;

pub use config::{ConfigError, EngineConfig};
pub use source::{InMemoryRelationSource, JsonFileRelationSource, RelationSource, SourceError};

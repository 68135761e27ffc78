use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use fleetops_records::FleetSnapshot;

/// Failure to produce a snapshot.
///
/// These are **infrastructure errors** (IO, decoding), as opposed to engine errors
/// such as a missing required relation, which surface later from the analytics
/// operations themselves.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no snapshot path configured")]
    NoPath,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode relations: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Supplies the full set of input relations for one engine invocation.
///
/// Implementations hand over already-typed records: dates parsed (unparsable →
/// `None`), absent relations left as `None`. Each call returns a fresh snapshot;
/// the engine never writes back through this interface.
pub trait RelationSource: Send + Sync {
    fn load(&self) -> Result<FleetSnapshot, SourceError>;
}

impl<S> RelationSource for Arc<S>
where
    S: RelationSource + ?Sized,
{
    fn load(&self) -> Result<FleetSnapshot, SourceError> {
        (**self).load()
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use fleetops_records::{FleetSnapshot, RelationName};

use super::r#trait::{RelationSource, SourceError};

/// Relation source reading one JSON document per invocation.
///
/// The document is an object keyed by relation name (`equipment`, `rentals`,
/// `usage`, `maintenance`, `alerts`, `financial`, `ai`, `sites`), each holding an
/// array of records. A key that is absent means the relation was not supplied.
#[derive(Debug, Clone)]
pub struct JsonFileRelationSource {
    path: PathBuf,
}

impl JsonFileRelationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decode a snapshot from a JSON document.
pub fn decode_snapshot(raw: &str) -> Result<FleetSnapshot, SourceError> {
    Ok(serde_json::from_str(raw)?)
}

impl RelationSource for JsonFileRelationSource {
    fn load(&self) -> Result<FleetSnapshot, SourceError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot = decode_snapshot(&raw)?;

        for name in RelationName::ALL {
            match snapshot.len_of(name) {
                Some(rows) => debug!(relation = %name, rows, "relation loaded"),
                None => debug!(relation = %name, "relation not supplied"),
            }
        }
        info!(path = %self.path.display(), "snapshot loaded");
        Ok(snapshot)
    }
}

use fleetops_records::FleetSnapshot;

use super::r#trait::{RelationSource, SourceError};

/// Relation source over an already-built snapshot.
///
/// Intended for tests and for embedding the engine behind a caller that does its
/// own data access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRelationSource {
    snapshot: FleetSnapshot,
}

impl InMemoryRelationSource {
    pub fn new(snapshot: FleetSnapshot) -> Self {
        Self { snapshot }
    }
}

impl RelationSource for InMemoryRelationSource {
    fn load(&self) -> Result<FleetSnapshot, SourceError> {
        Ok(self.snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetops_records::Equipment;

    #[test]
    fn returns_a_fresh_copy_each_time() {
        let source = InMemoryRelationSource::new(
            FleetSnapshot::new().with_equipment(vec![Equipment::new("EQ001", "Crane")]),
        );

        let mut first = source.load().unwrap();
        first.equipment = None;

        let second = source.load().unwrap();
        assert_eq!(second.equipment().unwrap().len(), 1);
    }
}

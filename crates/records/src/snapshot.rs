//! Snapshot of every input relation for one engine invocation.

use serde::{Deserialize, Serialize};

use fleetops_core::{FleetError, FleetResult};

use crate::{
    AiFeatureRecord, AlertRecord, Equipment, FinancialRecord, MaintenanceRecord,
    RentalTransaction, Site, UsageRecord,
};

/// Named input relations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RelationName {
    Equipment,
    Rentals,
    Usage,
    Maintenance,
    Alerts,
    Financial,
    Ai,
    Sites,
}

impl RelationName {
    pub const ALL: [RelationName; 8] = [
        RelationName::Equipment,
        RelationName::Rentals,
        RelationName::Usage,
        RelationName::Maintenance,
        RelationName::Alerts,
        RelationName::Financial,
        RelationName::Ai,
        RelationName::Sites,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationName::Equipment => "equipment",
            RelationName::Rentals => "rentals",
            RelationName::Usage => "usage",
            RelationName::Maintenance => "maintenance",
            RelationName::Alerts => "alerts",
            RelationName::Financial => "financial",
            RelationName::Ai => "ai",
            RelationName::Sites => "sites",
        }
    }

    /// Required relations fail the operation when absent; optional ones read as empty.
    pub fn is_required(self) -> bool {
        matches!(
            self,
            RelationName::Equipment | RelationName::Rentals | RelationName::Usage
        )
    }

    pub fn missing(self) -> FleetError {
        FleetError::missing_relation(self.as_str())
    }
}

impl core::fmt::Display for RelationName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All input relations as supplied by the relation source.
///
/// `None` means the relation was not supplied at all, which is different from an
/// empty relation: required relations (`equipment`, `rentals`, `usage`) fail with
/// `MissingRelation`, optional ones are read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<Equipment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rentals: Option<Vec<RentalTransaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Vec<UsageRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<Vec<MaintenanceRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Vec<AlertRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial: Option<Vec<FinancialRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<Vec<AiFeatureRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sites: Option<Vec<Site>>,
}

fn required<'a, T>(relation: &'a Option<Vec<T>>, name: RelationName) -> FleetResult<&'a [T]> {
    relation.as_deref().ok_or_else(|| name.missing())
}

fn optional<T>(relation: &Option<Vec<T>>) -> &[T] {
    relation.as_deref().unwrap_or(&[])
}

impl FleetSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equipment(mut self, rows: Vec<Equipment>) -> Self {
        self.equipment = Some(rows);
        self
    }

    pub fn with_rentals(mut self, rows: Vec<RentalTransaction>) -> Self {
        self.rentals = Some(rows);
        self
    }

    pub fn with_usage(mut self, rows: Vec<UsageRecord>) -> Self {
        self.usage = Some(rows);
        self
    }

    pub fn with_maintenance(mut self, rows: Vec<MaintenanceRecord>) -> Self {
        self.maintenance = Some(rows);
        self
    }

    pub fn with_alerts(mut self, rows: Vec<AlertRecord>) -> Self {
        self.alerts = Some(rows);
        self
    }

    pub fn with_financial(mut self, rows: Vec<FinancialRecord>) -> Self {
        self.financial = Some(rows);
        self
    }

    pub fn with_ai(mut self, rows: Vec<AiFeatureRecord>) -> Self {
        self.ai = Some(rows);
        self
    }

    pub fn with_sites(mut self, rows: Vec<Site>) -> Self {
        self.sites = Some(rows);
        self
    }

    pub fn equipment(&self) -> FleetResult<&[Equipment]> {
        required(&self.equipment, RelationName::Equipment)
    }

    pub fn rentals(&self) -> FleetResult<&[RentalTransaction]> {
        required(&self.rentals, RelationName::Rentals)
    }

    pub fn usage(&self) -> FleetResult<&[UsageRecord]> {
        required(&self.usage, RelationName::Usage)
    }

    pub fn maintenance(&self) -> &[MaintenanceRecord] {
        optional(&self.maintenance)
    }

    pub fn alerts(&self) -> &[AlertRecord] {
        optional(&self.alerts)
    }

    pub fn financial(&self) -> &[FinancialRecord] {
        optional(&self.financial)
    }

    pub fn ai(&self) -> &[AiFeatureRecord] {
        optional(&self.ai)
    }

    pub fn sites(&self) -> &[Site] {
        optional(&self.sites)
    }

    /// Row count of a relation, or `None` when it was not supplied.
    pub fn len_of(&self, name: RelationName) -> Option<usize> {
        match name {
            RelationName::Equipment => self.equipment.as_ref().map(Vec::len),
            RelationName::Rentals => self.rentals.as_ref().map(Vec::len),
            RelationName::Usage => self.usage.as_ref().map(Vec::len),
            RelationName::Maintenance => self.maintenance.as_ref().map(Vec::len),
            RelationName::Alerts => self.alerts.as_ref().map(Vec::len),
            RelationName::Financial => self.financial.as_ref().map(Vec::len),
            RelationName::Ai => self.ai.as_ref().map(Vec::len),
            RelationName::Sites => self.sites.as_ref().map(Vec::len),
        }
    }

    /// Relations that were not supplied at all.
    pub fn missing_relations(&self) -> Vec<RelationName> {
        RelationName::ALL
            .into_iter()
            .filter(|name| self.len_of(*name).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_relations_fail_when_absent() {
        let snapshot = FleetSnapshot::new().with_equipment(vec![Equipment::new("EQ001", "Crane")]);

        assert_eq!(snapshot.equipment().unwrap().len(), 1);
        assert_eq!(
            snapshot.rentals().unwrap_err(),
            FleetError::missing_relation("rentals")
        );
        assert_eq!(
            snapshot.usage().unwrap_err(),
            FleetError::missing_relation("usage")
        );
    }

    #[test]
    fn optional_relations_read_as_empty() {
        let snapshot = FleetSnapshot::new();
        assert!(snapshot.maintenance().is_empty());
        assert!(snapshot.alerts().is_empty());
        assert!(snapshot.financial().is_empty());
        assert!(snapshot.ai().is_empty());
        assert!(snapshot.sites().is_empty());
    }

    #[test]
    fn empty_is_not_missing() {
        let snapshot = FleetSnapshot::new().with_rentals(Vec::new());
        assert_eq!(snapshot.len_of(RelationName::Rentals), Some(0));
        assert!(snapshot.rentals().unwrap().is_empty());
        assert!(!snapshot.missing_relations().contains(&RelationName::Rentals));
        assert!(snapshot.missing_relations().contains(&RelationName::Equipment));
    }

    #[test]
    fn decodes_from_named_relations() {
        let snapshot: FleetSnapshot = serde_json::from_str(
            r#"{"equipment":[{"equipment_id":"EQ001","type":"Crane"}],
                "sites":[{"site_id":"S1","required_type":"Crane","location":"North"}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.len_of(RelationName::Equipment), Some(1));
        assert_eq!(snapshot.len_of(RelationName::Rentals), None);
        assert_eq!(snapshot.sites()[0].location.as_deref(), Some("North"));
    }
}

//! Aggregated alert feed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetops_core::EquipmentId;

use crate::allocation::Allocation;
use crate::detect::{AnomalyRow, MaintenanceAlert, OverdueAlert};
use crate::rollback::RollbackRecommendation;

/// Source of a feed entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    Contract,
    Maintenance,
    Anomaly,
    Rollback,
    Predictive,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Contract => "Contract",
            AlertKind::Maintenance => "Maintenance",
            AlertKind::Anomaly => "Anomaly",
            AlertKind::Rollback => "Rollback",
            AlertKind::Predictive => "Predictive",
        }
    }
}

impl core::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetAlert {
    pub equipment_id: EquipmentId,
    pub alert_type: AlertKind,
    pub message: String,
}

impl FleetAlert {
    fn new(equipment_id: &EquipmentId, alert_type: AlertKind, message: impl Into<String>) -> Self {
        Self {
            equipment_id: equipment_id.clone(),
            alert_type,
            message: message.into(),
        }
    }
}

/// Flatten detector outputs into one feed.
///
/// Order is fixed: contract (overdue), maintenance (flagged only), anomaly (flagged
/// only), rollback, then predictive for every allocation. No deduplication: one
/// piece of equipment may appear under several alert types.
pub fn alert_feed(
    overdue: &[OverdueAlert],
    maintenance: &[MaintenanceAlert],
    anomalies: &[AnomalyRow],
    rollback: &[RollbackRecommendation],
    allocations: &[Allocation],
) -> Vec<FleetAlert> {
    let contract = overdue
        .iter()
        .map(|o| FleetAlert::new(&o.equipment_id, AlertKind::Contract, o.message()));
    let service = maintenance
        .iter()
        .filter(|m| m.service_alert)
        .map(|m| FleetAlert::new(&m.equipment_id, AlertKind::Maintenance, MaintenanceAlert::MESSAGE));
    let anomaly = anomalies
        .iter()
        .filter(|a| a.anomaly)
        .map(|a| FleetAlert::new(&a.equipment_id, AlertKind::Anomaly, AnomalyRow::MESSAGE));
    let rollbacks = rollback
        .iter()
        .map(|r| FleetAlert::new(&r.equipment_id, AlertKind::Rollback, r.action.as_str()));
    let predictive = allocations
        .iter()
        .map(|a| FleetAlert::new(&a.equipment_id, AlertKind::Predictive, a.recommendation.as_str()));

    let feed: Vec<FleetAlert> = contract
        .chain(service)
        .chain(anomaly)
        .chain(rollbacks)
        .chain(predictive)
        .collect();

    debug!(alerts = feed.len(), "aggregated alert feed");
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleetops_core::SiteId;

    use crate::status::EquipmentStatus;

    fn id(s: &str) -> EquipmentId {
        EquipmentId::new(s)
    }

    #[test]
    fn concatenates_sources_in_fixed_order() {
        let due = NaiveDate::from_ymd_opt(2025, 7, 20).unwrap();
        let overdue = vec![OverdueAlert {
            equipment_id: id("EQ001"),
            site_id: Some(SiteId::new("S1")),
            expected_return_date: due,
            overdue_days: 12,
        }];
        let maintenance = vec![
            MaintenanceAlert {
                equipment_id: id("EQ001"),
                last_service_date: None,
                engine_hours: 250.0,
                days_since_service: None,
                service_due_hours: true,
                service_due_days: false,
                service_alert: true,
            },
            MaintenanceAlert {
                equipment_id: id("EQ002"),
                last_service_date: None,
                engine_hours: 5.0,
                days_since_service: None,
                service_due_hours: false,
                service_due_days: false,
                service_alert: false,
            },
        ];
        let anomalies = vec![AnomalyRow {
            equipment_id: id("EQ001"),
            status: EquipmentStatus::Overdue,
            site_id: Some(SiteId::new("S1")),
            no_site: false,
            low_utilization: false,
            anomaly: true,
            utilization_pct: None,
        }];
        let rollback = vec![RollbackRecommendation {
            equipment_id: id("EQ001"),
            site_id: Some(SiteId::new("S1")),
            expected_return_date: due,
            action: "Return to warehouse".to_string(),
        }];
        let allocations = vec![Allocation {
            equipment_id: id("EQ002"),
            recommended_site_id: None,
            recommendation: "No matching site".to_string(),
            score: None,
        }];

        let feed = alert_feed(&overdue, &maintenance, &anomalies, &rollback, &allocations);
        let summary: Vec<(&str, AlertKind, &str)> = feed
            .iter()
            .map(|a| (a.equipment_id.as_str(), a.alert_type, a.message.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("EQ001", AlertKind::Contract, "Overdue by 12 days"),
                ("EQ001", AlertKind::Maintenance, "Service due (hours/days exceeded)"),
                ("EQ001", AlertKind::Anomaly, "Operational anomaly detected"),
                ("EQ001", AlertKind::Rollback, "Return to warehouse"),
                ("EQ002", AlertKind::Predictive, "No matching site"),
            ]
        );
    }

    #[test]
    fn empty_inputs_give_empty_feed() {
        assert!(alert_feed(&[], &[], &[], &[], &[]).is_empty());
    }
}

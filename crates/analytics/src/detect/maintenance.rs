use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetops_core::EquipmentId;
use fleetops_records::{MaintenanceRecord, UsageRecord};

use crate::context::AnalysisContext;

/// Service-due evaluation for one piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceAlert {
    pub equipment_id: EquipmentId,
    /// Most recent service date across all maintenance records.
    pub last_service_date: Option<NaiveDate>,
    /// Engine hours summed over every usage record.
    pub engine_hours: f64,
    pub days_since_service: Option<i64>,
    pub service_due_hours: bool,
    pub service_due_days: bool,
    /// `service_due_hours || service_due_days`.
    pub service_alert: bool,
}

impl MaintenanceAlert {
    pub const MESSAGE: &'static str = "Service due (hours/days exceeded)";
}

#[derive(Default)]
struct ServiceInputs {
    last_service_date: Option<NaiveDate>,
    engine_hours: f64,
}

/// Evaluate service-due conditions for every equipment id seen in the maintenance
/// or usage relations, ordered by equipment id.
///
/// Equipment with no recorded service date can only be flagged on hours.
pub fn maintenance_alerts(
    maintenance: &[MaintenanceRecord],
    usage: &[UsageRecord],
    ctx: &AnalysisContext,
) -> Vec<MaintenanceAlert> {
    let mut inputs: BTreeMap<&EquipmentId, ServiceInputs> = BTreeMap::new();

    for record in maintenance {
        let entry = inputs.entry(&record.equipment_id).or_default();
        entry.last_service_date = entry.last_service_date.max(record.last_service_date);
    }
    for record in usage {
        let entry = inputs.entry(&record.equipment_id).or_default();
        entry.engine_hours += record.engine_hours_per_day.unwrap_or(0.0);
    }

    let thresholds = &ctx.thresholds;
    let alerts: Vec<MaintenanceAlert> = inputs
        .into_iter()
        .map(|(equipment_id, i)| {
            let days_since_service = i
                .last_service_date
                .map(|last| (ctx.as_of - last).num_days());
            let service_due_hours = i.engine_hours >= thresholds.service_hours;
            let service_due_days =
                days_since_service.is_some_and(|days| days >= thresholds.service_days);
            MaintenanceAlert {
                equipment_id: equipment_id.clone(),
                last_service_date: i.last_service_date,
                engine_hours: i.engine_hours,
                days_since_service,
                service_due_hours,
                service_due_days,
                service_alert: service_due_hours || service_due_days,
            }
        })
        .collect();

    debug!(
        evaluated = alerts.len(),
        flagged = alerts.iter().filter(|a| a.service_alert).count(),
        "evaluated maintenance alerts"
    );
    alerts
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetops_core::{EquipmentId, SiteId};

use crate::profile::EquipmentProfile;
use crate::status::EquipmentStatus;
use crate::usage::UsageMetrics;

/// Operational anomaly evaluation for one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRow {
    pub equipment_id: EquipmentId,
    pub status: EquipmentStatus,
    pub site_id: Option<SiteId>,
    /// Latest rental has no site (or there is no rental at all).
    pub no_site: bool,
    /// Usage aggregate marks the equipment as underutilized.
    pub low_utilization: bool,
    /// `status == Overdue || no_site || low_utilization`.
    pub anomaly: bool,
    pub utilization_pct: Option<f64>,
}

impl AnomalyRow {
    pub const MESSAGE: &'static str = "Operational anomaly detected";
}

/// Evaluate every profile, in profile order.
///
/// Equipment without a usage aggregate is never low-utilization.
pub fn anomalies(profiles: &[EquipmentProfile], usage: &[UsageMetrics]) -> Vec<AnomalyRow> {
    let by_equipment: HashMap<&EquipmentId, &UsageMetrics> =
        usage.iter().map(|m| (&m.equipment_id, m)).collect();

    let rows: Vec<AnomalyRow> = profiles
        .iter()
        .map(|p| {
            let metrics = by_equipment.get(&p.equipment_id);
            let no_site = p.site_id.is_none();
            let low_utilization = metrics.is_some_and(|m| m.underutilized);
            AnomalyRow {
                equipment_id: p.equipment_id.clone(),
                status: p.status,
                site_id: p.site_id.clone(),
                no_site,
                low_utilization,
                anomaly: p.status == EquipmentStatus::Overdue || no_site || low_utilization,
                utilization_pct: metrics.and_then(|m| m.utilization_pct),
            }
        })
        .collect();

    debug!(
        profiles = profiles.len(),
        flagged = rows.iter().filter(|r| r.anomaly).count(),
        "evaluated anomalies"
    );
    rows
}

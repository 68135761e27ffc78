//! Usage aggregation: cumulative hours and utilization per equipment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetops_core::EquipmentId;
use fleetops_records::UsageRecord;

use crate::context::Thresholds;

/// Per-equipment utilization summary over all usage records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageMetrics {
    pub equipment_id: EquipmentId,
    /// Sum of engine hours across all records.
    pub engine_hours_per_day: f64,
    /// Sum of idle hours across all records.
    pub idle_hours_per_day: f64,
    /// Sum of engine + idle over records that report both.
    pub total_hours: f64,
    /// `engine / total * 100`; `None` when `total_hours` is zero.
    pub utilization_pct: Option<f64>,
    /// Utilization below the configured threshold. `false` when utilization is `None`.
    pub underutilized: bool,
}

/// `engine / (engine + idle) * 100`, or `None` when an operand is missing or the
/// denominator is zero. Never yields NaN or infinity.
pub fn utilization_pct(engine: Option<f64>, total: Option<f64>) -> Option<f64> {
    let (engine, total) = (engine?, total?);
    if total == 0.0 {
        return None;
    }
    let pct = engine / total * 100.0;
    pct.is_finite().then_some(pct)
}

#[derive(Default)]
struct Sums {
    engine: f64,
    idle: f64,
    total: f64,
}

/// Aggregate usage per equipment, ordered by equipment id.
///
/// Null hour values are skipped. A record contributes to `total_hours` only when
/// both engine and idle hours are reported.
pub fn usage_metrics(usage: &[UsageRecord], thresholds: &Thresholds) -> Vec<UsageMetrics> {
    let mut sums: BTreeMap<&EquipmentId, Sums> = BTreeMap::new();
    for record in usage {
        let entry = sums.entry(&record.equipment_id).or_default();
        entry.engine += record.engine_hours_per_day.unwrap_or(0.0);
        entry.idle += record.idle_hours_per_day.unwrap_or(0.0);
        entry.total += record.total_hours().unwrap_or(0.0);
    }

    let metrics: Vec<UsageMetrics> = sums
        .into_iter()
        .map(|(equipment_id, s)| {
            let utilization_pct = utilization_pct(Some(s.engine), Some(s.total));
            UsageMetrics {
                equipment_id: equipment_id.clone(),
                engine_hours_per_day: s.engine,
                idle_hours_per_day: s.idle,
                total_hours: s.total,
                utilization_pct,
                underutilized: utilization_pct
                    .is_some_and(|pct| pct < thresholds.underutilized_pct),
            }
        })
        .collect();

    debug!(
        records = usage.len(),
        equipment = metrics.len(),
        "aggregated usage metrics"
    );
    metrics
}

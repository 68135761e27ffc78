//! Rollback recommendations for rentals whose term has lapsed.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetops_core::{EquipmentId, SiteId};
use fleetops_records::RentalTransaction;

use crate::allocation::Allocation;

/// What to do with equipment from an overdue rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackRecommendation {
    pub equipment_id: EquipmentId,
    pub site_id: Option<SiteId>,
    pub expected_return_date: NaiveDate,
    pub action: String,
}

impl RollbackRecommendation {
    pub const DEFAULT_ACTION: &'static str = "Return to warehouse";
}

/// One recommendation per overdue rental, in rental order.
///
/// The action is the equipment's predictive allocation recommendation when there
/// is one (including "No matching site"), otherwise a return to the warehouse.
pub fn rollback_with_allocation(
    rentals: &[RentalTransaction],
    allocations: &[Allocation],
    as_of: NaiveDate,
) -> Vec<RollbackRecommendation> {
    let by_equipment: HashMap<&EquipmentId, &Allocation> = allocations
        .iter()
        .rev()
        .map(|a| (&a.equipment_id, a))
        .collect();

    let rows: Vec<RollbackRecommendation> = rentals
        .iter()
        .filter(|r| r.is_overdue(as_of))
        .filter_map(|r| {
            let action = by_equipment
                .get(&r.equipment_id)
                .map(|a| a.recommendation.clone())
                .unwrap_or_else(|| RollbackRecommendation::DEFAULT_ACTION.to_string());
            Some(RollbackRecommendation {
                equipment_id: r.equipment_id.clone(),
                site_id: r.site_id.clone(),
                expected_return_date: r.expected_return_date?,
                action,
            })
        })
        .collect();

    debug!(rollbacks = rows.len(), %as_of, "computed rollback recommendations");
    rows
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetops_core::{EquipmentId, SiteId};
use fleetops_records::RentalTransaction;

/// A rental past its expected return date with no check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdueAlert {
    pub equipment_id: EquipmentId,
    pub site_id: Option<SiteId>,
    pub expected_return_date: NaiveDate,
    pub overdue_days: i64,
}

impl OverdueAlert {
    pub fn message(&self) -> String {
        format!("Overdue by {} days", self.overdue_days)
    }
}

/// Every overdue rental transaction, in input order.
///
/// Looks at all transactions, not only the latest per equipment: an older rental
/// that was never checked in is still overdue.
pub fn detect_overdue(rentals: &[RentalTransaction], as_of: NaiveDate) -> Vec<OverdueAlert> {
    let alerts: Vec<OverdueAlert> = rentals
        .iter()
        .filter_map(|r| {
            let overdue_days = r.overdue_days(as_of)?;
            Some(OverdueAlert {
                equipment_id: r.equipment_id.clone(),
                site_id: r.site_id.clone(),
                expected_return_date: r.expected_return_date?,
                overdue_days,
            })
        })
        .collect();

    debug!(rentals = rentals.len(), overdue = alerts.len(), %as_of, "detected overdue rentals");
    alerts
}

//! Live status of a piece of equipment, derived from its latest rental.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fleetops_records::RentalTransaction;

/// Equipment status. Exactly one applies to every profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentStatus {
    /// No open rental (also the state for equipment that was never rented).
    Idle,
    /// Checked out, not yet checked in, not past due.
    Active,
    /// Checked back in.
    Returned,
    /// Past its expected return date with no check-in.
    Overdue,
}

impl EquipmentStatus {
    /// Classify the latest rental of a piece of equipment as of a given date.
    ///
    /// Rules apply in order, later ones overriding earlier ones:
    /// 1. `Idle`
    /// 2. checked out and not checked in → `Active`
    /// 3. checked in → `Returned`
    /// 4. expected return strictly before `as_of` and not checked in → `Overdue`
    pub fn classify(rental: Option<&RentalTransaction>, as_of: NaiveDate) -> Self {
        let Some(rental) = rental else {
            return EquipmentStatus::Idle;
        };

        let mut status = EquipmentStatus::Idle;
        if rental.check_out_date.is_some() && rental.check_in_date.is_none() {
            status = EquipmentStatus::Active;
        }
        if rental.check_in_date.is_some() {
            status = EquipmentStatus::Returned;
        }
        if rental.is_overdue(as_of) {
            status = EquipmentStatus::Overdue;
        }
        status
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentStatus::Idle => "Idle",
            EquipmentStatus::Active => "Active",
            EquipmentStatus::Returned => "Returned",
            EquipmentStatus::Overdue => "Overdue",
        }
    }
}

impl core::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

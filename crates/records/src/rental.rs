use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fleetops_core::{EquipmentId, EquipmentKeyed, SiteId};

use crate::coerce::lenient_date;

/// Rental transaction (check-out/check-in of equipment to a site).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalTransaction {
    #[serde(default)]
    pub transaction_id: Option<i64>,
    pub equipment_id: EquipmentId,
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub check_out_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expected_return_date: Option<NaiveDate>,
    #[serde(default)]
    pub operator_id: Option<String>,
    #[serde(default)]
    pub purpose_job_type: Option<String>,
}

impl RentalTransaction {
    pub fn new(equipment_id: impl Into<EquipmentId>) -> Self {
        Self {
            transaction_id: None,
            equipment_id: equipment_id.into(),
            site_id: None,
            check_out_date: None,
            check_in_date: None,
            expected_return_date: None,
            operator_id: None,
            purpose_job_type: None,
        }
    }

    pub fn with_id(mut self, transaction_id: i64) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn at_site(mut self, site_id: impl Into<SiteId>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    pub fn checked_out(mut self, date: NaiveDate) -> Self {
        self.check_out_date = Some(date);
        self
    }

    pub fn checked_in(mut self, date: NaiveDate) -> Self {
        self.check_in_date = Some(date);
        self
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.expected_return_date = Some(date);
        self
    }

    /// Expected return date has passed (strictly before `as_of`) with no check-in.
    ///
    /// A null expected return date can never be overdue.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.check_in_date.is_none()
            && self
                .expected_return_date
                .is_some_and(|expected| expected < as_of)
    }

    /// Whole days past the expected return date, if overdue.
    pub fn overdue_days(&self, as_of: NaiveDate) -> Option<i64> {
        if !self.is_overdue(as_of) {
            return None;
        }
        self.expected_return_date
            .map(|expected| (as_of - expected).num_days())
    }
}

impl EquipmentKeyed for RentalTransaction {
    fn equipment_id(&self) -> &EquipmentId {
        &self.equipment_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn overdue_requires_past_due_date_and_no_check_in() {
        let as_of = d(2025, 8, 1);
        let open = RentalTransaction::new("EQ001")
            .checked_out(d(2025, 7, 1))
            .due(d(2025, 7, 20));
        assert!(open.is_overdue(as_of));
        assert_eq!(open.overdue_days(as_of), Some(12));

        let returned = open.clone().checked_in(d(2025, 7, 25));
        assert!(!returned.is_overdue(as_of));
        assert_eq!(returned.overdue_days(as_of), None);

        // Due today is not overdue yet.
        let due_today = RentalTransaction::new("EQ002").due(as_of);
        assert!(!due_today.is_overdue(as_of));

        let no_due = RentalTransaction::new("EQ003").checked_out(d(2025, 1, 1));
        assert!(!no_due.is_overdue(as_of));
    }

    #[test]
    fn unparsable_dates_decode_as_null() {
        let r: RentalTransaction = serde_json::from_str(
            r#"{"equipment_id":"EQ001","site_id":"S1","check_out_date":"2025-07-01",
                "check_in_date":"","expected_return_date":"soon"}"#,
        )
        .unwrap();
        assert_eq!(r.check_out_date, Some(d(2025, 7, 1)));
        assert_eq!(r.check_in_date, None);
        assert_eq!(r.expected_return_date, None);
        assert_eq!(r.site_id, Some(SiteId::new("S1")));
    }
}

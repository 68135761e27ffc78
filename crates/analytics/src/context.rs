use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use fleetops_core::{FleetError, FleetResult};

/// Tunable limits used by the detectors and the allocation scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Cumulative engine hours at which service becomes due.
    pub service_hours: f64,
    /// Days since the last service at which service becomes due.
    pub service_days: i64,
    /// Utilization (percent) below which equipment counts as underutilized.
    pub underutilized_pct: f64,
    /// Score bonus when a candidate site sits at the equipment's last known location.
    pub location_bonus: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            service_hours: 200.0,
            service_days: 180,
            underutilized_pct: 50.0,
            location_bonus: 20.0,
        }
    }
}

impl Thresholds {
    pub fn with_service_hours(mut self, service_hours: f64) -> Self {
        self.service_hours = service_hours;
        self
    }

    pub fn with_service_days(mut self, service_days: i64) -> Self {
        self.service_days = service_days;
        self
    }

    pub fn with_underutilized_pct(mut self, underutilized_pct: f64) -> Self {
        self.underutilized_pct = underutilized_pct;
        self
    }

    pub fn with_location_bonus(mut self, location_bonus: f64) -> Self {
        self.location_bonus = location_bonus;
        self
    }

    pub fn validate(&self) -> FleetResult<()> {
        if !(self.service_hours.is_finite() && self.service_hours >= 0.0) {
            return Err(FleetError::validation(
                "service_hours must be a finite non-negative number",
            ));
        }
        if self.service_days < 0 {
            return Err(FleetError::validation("service_days must be >= 0"));
        }
        if !self.underutilized_pct.is_finite() {
            return Err(FleetError::validation("underutilized_pct must be finite"));
        }
        if !self.location_bonus.is_finite() {
            return Err(FleetError::validation("location_bonus must be finite"));
        }
        Ok(())
    }
}

/// Everything an engine invocation depends on besides the relations themselves.
///
/// `as_of` stands in for "today": status, overdue and service-age checks compare
/// against it, so a run is fully reproducible from (snapshot, context).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisContext {
    pub as_of: NaiveDate,
    pub thresholds: Thresholds,
}

impl AnalysisContext {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            thresholds: Thresholds::default(),
        }
    }

    /// Context anchored at the local calendar date.
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fleet_policy() {
        let t = Thresholds::default();
        assert_eq!(t.service_hours, 200.0);
        assert_eq!(t.service_days, 180);
        assert_eq!(t.underutilized_pct, 50.0);
        assert_eq!(t.location_bonus, 20.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn rejects_nonsense_thresholds() {
        let err = Thresholds::default()
            .with_service_hours(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, FleetError::Validation(msg) if msg.contains("service_hours")));

        assert!(Thresholds::default().with_service_days(-1).validate().is_err());
    }
}

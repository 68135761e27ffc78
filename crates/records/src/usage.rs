use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fleetops_core::{EquipmentId, EquipmentKeyed};

use crate::coerce::lenient_date;

/// Daily usage telemetry for one piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(default)]
    pub usage_id: Option<i64>,
    pub equipment_id: EquipmentId,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub engine_hours_per_day: Option<f64>,
    #[serde(default)]
    pub idle_hours_per_day: Option<f64>,
    #[serde(default)]
    pub operating_days: Option<i64>,
    #[serde(default)]
    pub fuel_consumption_per_day: Option<f64>,
    /// Last reported position (free-form; matched verbatim against site locations).
    #[serde(default, alias = "location_coordinates")]
    pub location: Option<String>,
    #[serde(default)]
    pub downtime_hours: Option<f64>,
}

impl UsageRecord {
    pub fn new(equipment_id: impl Into<EquipmentId>, date: NaiveDate) -> Self {
        Self {
            usage_id: None,
            equipment_id: equipment_id.into(),
            date: Some(date),
            engine_hours_per_day: None,
            idle_hours_per_day: None,
            operating_days: None,
            fuel_consumption_per_day: None,
            location: None,
            downtime_hours: None,
        }
    }

    pub fn with_id(mut self, usage_id: i64) -> Self {
        self.usage_id = Some(usage_id);
        self
    }

    pub fn with_hours(mut self, engine: f64, idle: f64) -> Self {
        self.engine_hours_per_day = Some(engine);
        self.idle_hours_per_day = Some(idle);
        self
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Engine + idle hours, only when both are reported.
    pub fn total_hours(&self) -> Option<f64> {
        match (self.engine_hours_per_day, self.idle_hours_per_day) {
            (Some(engine), Some(idle)) => Some(engine + idle),
            _ => None,
        }
    }
}

impl EquipmentKeyed for UsageRecord {
    fn equipment_id(&self) -> &EquipmentId {
        &self.equipment_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_location_column() {
        let u: UsageRecord = serde_json::from_str(
            r#"{"equipment_id":"EQ001","date":"2025-07-02","engine_hours_per_day":6.5,
                "idle_hours_per_day":1.5,"location_coordinates":"12.97,77.59"}"#,
        )
        .unwrap();
        assert_eq!(u.location.as_deref(), Some("12.97,77.59"));
        assert_eq!(u.total_hours(), Some(8.0));
    }

    #[test]
    fn total_hours_needs_both_operands() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 2).unwrap();
        let mut u = UsageRecord::new("EQ001", date);
        u.engine_hours_per_day = Some(4.0);
        assert_eq!(u.total_hours(), None);
    }
}

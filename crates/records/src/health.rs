use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fleetops_core::{EquipmentId, EquipmentKeyed};

use crate::coerce::{lenient_date, lenient_flag};

/// Maintenance and health record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    #[serde(default)]
    pub record_id: Option<i64>,
    pub equipment_id: EquipmentId,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_service_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub next_service_due: Option<NaiveDate>,
    #[serde(default)]
    pub breakdowns_reported: Option<i64>,
    /// `Good`, `Needs Repair` or `Critical` upstream; passed through unchanged.
    #[serde(default)]
    pub condition_status: Option<String>,
    #[serde(default)]
    pub maintenance_costs: Option<f64>,
}

impl MaintenanceRecord {
    pub fn new(equipment_id: impl Into<EquipmentId>) -> Self {
        Self {
            record_id: None,
            equipment_id: equipment_id.into(),
            last_service_date: None,
            next_service_due: None,
            breakdowns_reported: None,
            condition_status: None,
            maintenance_costs: None,
        }
    }

    pub fn with_id(mut self, record_id: i64) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn serviced(mut self, date: NaiveDate) -> Self {
        self.last_service_date = Some(date);
        self
    }
}

impl EquipmentKeyed for MaintenanceRecord {
    fn equipment_id(&self) -> &EquipmentId {
        &self.equipment_id
    }
}

/// Upstream alert/notification flag for a piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub alert_id: Option<i64>,
    pub equipment_id: EquipmentId,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub overdue_status: Option<bool>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub reminder_sent_date: Option<NaiveDate>,
}

impl AlertRecord {
    pub fn new(equipment_id: impl Into<EquipmentId>, alert_type: impl Into<String>) -> Self {
        Self {
            alert_id: None,
            equipment_id: equipment_id.into(),
            alert_type: Some(alert_type.into()),
            overdue_status: None,
            reminder_sent_date: None,
        }
    }

    pub fn with_id(mut self, alert_id: i64) -> Self {
        self.alert_id = Some(alert_id);
        self
    }
}

impl EquipmentKeyed for AlertRecord {
    fn equipment_id(&self) -> &EquipmentId {
        &self.equipment_id
    }
}

use serde::{Deserialize, Serialize};

use fleetops_core::{EquipmentId, EquipmentKeyed};

/// Financial figures for a piece of equipment (currency-agnostic amounts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    #[serde(default)]
    pub financial_id: Option<i64>,
    pub equipment_id: EquipmentId,
    #[serde(default)]
    pub rental_rate_per_day: Option<f64>,
    #[serde(default)]
    pub total_rental_cost: Option<f64>,
    #[serde(default)]
    pub penalty_cost: Option<f64>,
    #[serde(default)]
    pub fuel_cost: Option<f64>,
    #[serde(default)]
    pub maintenance_cost: Option<f64>,
}

impl FinancialRecord {
    pub fn new(equipment_id: impl Into<EquipmentId>) -> Self {
        Self {
            financial_id: None,
            equipment_id: equipment_id.into(),
            rental_rate_per_day: None,
            total_rental_cost: None,
            penalty_cost: None,
            fuel_cost: None,
            maintenance_cost: None,
        }
    }
}

impl EquipmentKeyed for FinancialRecord {
    fn equipment_id(&self) -> &EquipmentId {
        &self.equipment_id
    }
}

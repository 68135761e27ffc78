use serde::{Deserialize, Serialize};

use fleetops_core::{EquipmentId, EquipmentKeyed};

use crate::coerce::lenient_flag;

/// Model-derived features for a piece of equipment.
///
/// Produced by an upstream scoring job; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiFeatureRecord {
    #[serde(default)]
    pub ai_id: Option<i64>,
    pub equipment_id: EquipmentId,
    #[serde(default)]
    pub utilization_rate: Option<f64>,
    #[serde(default)]
    pub idle_ratio: Option<f64>,
    #[serde(default)]
    pub predicted_demand_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub anomaly_flag: Option<bool>,
    #[serde(default)]
    pub recommended_site: Option<String>,
}

impl AiFeatureRecord {
    pub fn new(equipment_id: impl Into<EquipmentId>, predicted_demand_score: f64) -> Self {
        Self {
            ai_id: None,
            equipment_id: equipment_id.into(),
            utilization_rate: None,
            idle_ratio: None,
            predicted_demand_score: Some(predicted_demand_score),
            anomaly_flag: None,
            recommended_site: None,
        }
    }

    pub fn with_id(mut self, ai_id: i64) -> Self {
        self.ai_id = Some(ai_id);
        self
    }
}

impl EquipmentKeyed for AiFeatureRecord {
    fn equipment_id(&self) -> &EquipmentId {
        &self.equipment_id
    }
}

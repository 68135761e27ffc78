use serde::{Deserialize, Serialize};

use crate::coerce::lenient_text;

use fleetops_core::{EquipmentId, EquipmentKeyed, SiteId};

/// Equipment registry entry: exactly one per piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub equipment_id: EquipmentId,
    /// Empty when the upstream cell was missing or unreadable.
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub equipment_type: String,
    #[serde(default, alias = "qr_tag_id", alias = "rfid_qr_tag_id")]
    pub tag_id: Option<String>,
}

impl Equipment {
    pub fn new(equipment_id: impl Into<EquipmentId>, equipment_type: impl Into<String>) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            equipment_type: equipment_type.into(),
            tag_id: None,
        }
    }

    pub fn with_tag(mut self, tag_id: impl Into<String>) -> Self {
        self.tag_id = Some(tag_id.into());
        self
    }
}

impl EquipmentKeyed for Equipment {
    fn equipment_id(&self) -> &EquipmentId {
        &self.equipment_id
    }
}

/// Site catalog entry: a job site and the equipment type it asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub site_id: SiteId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub required_type: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl Site {
    pub fn new(
        site_id: impl Into<SiteId>,
        required_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            required_type: required_type.into(),
            location: Some(location.into()),
        }
    }
}

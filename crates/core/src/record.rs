//! Record trait: membership in the per-equipment join.

use crate::id::EquipmentId;

/// A record that belongs to exactly one piece of equipment.
///
/// Every relation the engine consumes is keyed by `equipment_id`; this trait lets
/// the grouping and selection helpers stay generic over the record type.
pub trait EquipmentKeyed {
    /// The equipment this record describes.
    fn equipment_id(&self) -> &EquipmentId;
}

impl<T: EquipmentKeyed + ?Sized> EquipmentKeyed for &T {
    fn equipment_id(&self) -> &EquipmentId {
        (**self).equipment_id()
    }
}

//! Per-equipment record selection.
//!
//! Upstream relations may carry several rows per equipment. Every join in the
//! engine picks exactly one, deterministically: greatest sort key, and among
//! equal keys the row that appears last in the input.

use std::collections::HashMap;

use fleetops_core::{EquipmentId, EquipmentKeyed};

/// Pick one record per equipment: the one with the greatest `key`.
///
/// Ties on `key` resolve to the later input position.
pub(crate) fn pick_per_equipment<'a, T, K, F>(rows: &'a [T], key: F) -> HashMap<&'a EquipmentId, &'a T>
where
    T: EquipmentKeyed,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut picked: HashMap<&'a EquipmentId, &'a T> = HashMap::new();
    for row in rows {
        picked
            .entry(row.equipment_id())
            .and_modify(|current| {
                if key(row) >= key(*current) {
                    *current = row;
                }
            })
            .or_insert(row);
    }
    picked
}

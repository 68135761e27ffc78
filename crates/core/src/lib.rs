//! `fleetops-core`: shared building blocks for the fleet analytics workspace.
//!
//! This crate contains **pure** primitives (no IO, no clock, no storage).

pub mod error;
pub mod id;
pub mod record;

pub use error::{FleetError, FleetResult};
pub use id::{EquipmentId, SiteId};
pub use record::EquipmentKeyed;

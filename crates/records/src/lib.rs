//! Fleet input records.
//!
//! One typed record per source relation, already parsed at the boundary: dates
//! are `Option<NaiveDate>` (unparsable → `None`), numeric columns are `Option<f64>`.
//! The engine never writes these back.

pub mod coerce;
pub mod equipment;
pub mod features;
pub mod financial;
pub mod health;
pub mod rental;
pub mod snapshot;
pub mod usage;

pub use equipment::{Equipment, Site};
pub use features::AiFeatureRecord;
pub use financial::FinancialRecord;
pub use health::{AlertRecord, MaintenanceRecord};
pub use rental::RentalTransaction;
pub use snapshot::{FleetSnapshot, RelationName};
pub use usage::UsageRecord;

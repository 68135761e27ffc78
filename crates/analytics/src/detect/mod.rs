//! Alert detectors.
//!
//! Each detector is a pure, total function over the input relations or the derived
//! profile/usage relations. Detectors report; they never mutate.

pub mod anomaly;
pub mod maintenance;
pub mod overdue;

pub use anomaly::{AnomalyRow, anomalies};
pub use maintenance::{MaintenanceAlert, maintenance_alerts};
pub use overdue::{OverdueAlert, detect_overdue};

//! `fleetops-analytics`
//!
//! **Responsibility:** the fleet analytics engine.
//!
//! Every operation here is a pure function of an input [`FleetSnapshot`] and an
//! [`AnalysisContext`] (as-of date + thresholds):
//! - It never reads the wall clock (except [`AnalysisContext::today`]).
//! - It never mutates or persists its inputs.
//! - It emits derived relations (profiles, alerts, recommendations), nothing else.
//!
//! [`FleetSnapshot`]: fleetops_records::FleetSnapshot

pub mod allocation;
pub mod context;
pub mod detect;
pub mod feed;
pub mod profile;
pub mod report;
pub mod rollback;
pub mod status;
pub mod usage;

mod select;

pub use allocation::{Allocation, predictive_allocation};
pub use context::{AnalysisContext, Thresholds};
pub use detect::{
    AnomalyRow, MaintenanceAlert, OverdueAlert, anomalies, detect_overdue, maintenance_alerts,
};
pub use feed::{AlertKind, FleetAlert, alert_feed};
pub use profile::{AssetDashboardRow, EquipmentProfile, asset_dashboard, build_profiles};
pub use report::{FleetReport, OutputName, ReportOutput, run_output};
pub use rollback::{RollbackRecommendation, rollback_with_allocation};
pub use status::EquipmentStatus;
pub use usage::{UsageMetrics, usage_metrics};

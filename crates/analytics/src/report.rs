//! Report orchestration: every derived relation for one snapshot.

use core::str::FromStr;

use serde::Serialize;
use tracing::{info, warn};

use fleetops_core::{FleetError, FleetResult};
use fleetops_records::FleetSnapshot;

use crate::allocation::{Allocation, predictive_allocation};
use crate::context::AnalysisContext;
use crate::detect::{
    AnomalyRow, MaintenanceAlert, OverdueAlert, anomalies, detect_overdue, maintenance_alerts,
};
use crate::feed::{FleetAlert, alert_feed};
use crate::profile::{AssetDashboardRow, EquipmentProfile, asset_dashboard, build_profiles};
use crate::rollback::{RollbackRecommendation, rollback_with_allocation};
use crate::usage::{UsageMetrics, usage_metrics};

/// Names of the derived relations handed to the presentation layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OutputName {
    EquipmentProfile,
    AssetDashboard,
    UsageMetrics,
    OverdueAlerts,
    MaintenanceAlerts,
    Anomalies,
    PredictiveAllocation,
    RollbackWithAllocation,
    Alerts,
}

impl OutputName {
    pub const ALL: [OutputName; 9] = [
        OutputName::EquipmentProfile,
        OutputName::AssetDashboard,
        OutputName::UsageMetrics,
        OutputName::OverdueAlerts,
        OutputName::MaintenanceAlerts,
        OutputName::Anomalies,
        OutputName::PredictiveAllocation,
        OutputName::RollbackWithAllocation,
        OutputName::Alerts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputName::EquipmentProfile => "equipment_profile",
            OutputName::AssetDashboard => "asset_dashboard",
            OutputName::UsageMetrics => "usage_metrics",
            OutputName::OverdueAlerts => "overdue_alerts",
            OutputName::MaintenanceAlerts => "maintenance_alerts",
            OutputName::Anomalies => "anomalies",
            OutputName::PredictiveAllocation => "predictive_allocation",
            OutputName::RollbackWithAllocation => "rollback_with_allocation",
            OutputName::Alerts => "alerts",
        }
    }
}

impl core::fmt::Display for OutputName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputName {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        OutputName::ALL
            .into_iter()
            .find(|name| name.as_str() == wanted)
            .ok_or_else(|| FleetError::validation(format!("unknown output: {s}")))
    }
}

/// All derived relations for one snapshot, each computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetReport {
    pub equipment_profile: Vec<EquipmentProfile>,
    pub asset_dashboard: Vec<AssetDashboardRow>,
    pub usage_metrics: Vec<UsageMetrics>,
    pub overdue_alerts: Vec<OverdueAlert>,
    pub maintenance_alerts: Vec<MaintenanceAlert>,
    pub anomalies: Vec<AnomalyRow>,
    pub predictive_allocation: Vec<Allocation>,
    pub rollback_with_allocation: Vec<RollbackRecommendation>,
    pub alerts: Vec<FleetAlert>,
}

impl FleetReport {
    /// Run the whole engine. Requires `equipment`, `rentals` and `usage`.
    pub fn run(snapshot: &FleetSnapshot, ctx: &AnalysisContext) -> FleetResult<Self> {
        ctx.thresholds.validate()?;
        let equipment = snapshot.equipment()?;
        let rentals = snapshot.rentals()?;
        let usage = snapshot.usage()?;

        let absent: Vec<&str> = snapshot
            .missing_relations()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        if !absent.is_empty() {
            warn!(relations = ?absent, "optional relations not supplied; treating as empty");
        }

        let equipment_profile = build_profiles(snapshot, ctx)?;
        let asset_dashboard = asset_dashboard(&equipment_profile);
        let usage_metrics = usage_metrics(usage, &ctx.thresholds);
        let overdue_alerts = detect_overdue(rentals, ctx.as_of);
        let maintenance_alerts = maintenance_alerts(snapshot.maintenance(), usage, ctx);
        let anomalies = anomalies(&equipment_profile, &usage_metrics);
        let predictive_allocation =
            predictive_allocation(equipment, snapshot.ai(), snapshot.sites(), usage, ctx);
        let rollback_with_allocation =
            rollback_with_allocation(rentals, &predictive_allocation, ctx.as_of);
        let alerts = alert_feed(
            &overdue_alerts,
            &maintenance_alerts,
            &anomalies,
            &rollback_with_allocation,
            &predictive_allocation,
        );

        info!(
            as_of = %ctx.as_of,
            equipment = equipment_profile.len(),
            overdue = overdue_alerts.len(),
            alerts = alerts.len(),
            "fleet report complete"
        );

        Ok(Self {
            equipment_profile,
            asset_dashboard,
            usage_metrics,
            overdue_alerts,
            maintenance_alerts,
            anomalies,
            predictive_allocation,
            rollback_with_allocation,
            alerts,
        })
    }
}

/// A single derived relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    EquipmentProfile(Vec<EquipmentProfile>),
    AssetDashboard(Vec<AssetDashboardRow>),
    UsageMetrics(Vec<UsageMetrics>),
    OverdueAlerts(Vec<OverdueAlert>),
    MaintenanceAlerts(Vec<MaintenanceAlert>),
    Anomalies(Vec<AnomalyRow>),
    PredictiveAllocation(Vec<Allocation>),
    RollbackWithAllocation(Vec<RollbackRecommendation>),
    Alerts(Vec<FleetAlert>),
}

impl ReportOutput {
    pub fn len(&self) -> usize {
        match self {
            ReportOutput::EquipmentProfile(rows) => rows.len(),
            ReportOutput::AssetDashboard(rows) => rows.len(),
            ReportOutput::UsageMetrics(rows) => rows.len(),
            ReportOutput::OverdueAlerts(rows) => rows.len(),
            ReportOutput::MaintenanceAlerts(rows) => rows.len(),
            ReportOutput::Anomalies(rows) => rows.len(),
            ReportOutput::PredictiveAllocation(rows) => rows.len(),
            ReportOutput::RollbackWithAllocation(rows) => rows.len(),
            ReportOutput::Alerts(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute one named output, touching only the relations it depends on.
///
/// | output | required relations |
/// |---|---|
/// | `equipment_profile`, `asset_dashboard` | equipment, rentals |
/// | `usage_metrics` | usage |
/// | `overdue_alerts` | rentals |
/// | `maintenance_alerts` | usage |
/// | `anomalies` | equipment, rentals, usage |
/// | `predictive_allocation` | equipment |
/// | `rollback_with_allocation` | equipment, rentals |
/// | `alerts` | equipment, rentals, usage |
pub fn run_output(
    name: OutputName,
    snapshot: &FleetSnapshot,
    ctx: &AnalysisContext,
) -> FleetResult<ReportOutput> {
    ctx.thresholds.validate()?;
    let optional_usage = snapshot.usage.as_deref().unwrap_or_default();

    let allocate = || -> FleetResult<Vec<Allocation>> {
        Ok(predictive_allocation(
            snapshot.equipment()?,
            snapshot.ai(),
            snapshot.sites(),
            optional_usage,
            ctx,
        ))
    };

    let output = match name {
        OutputName::EquipmentProfile => ReportOutput::EquipmentProfile(build_profiles(snapshot, ctx)?),
        OutputName::AssetDashboard => {
            ReportOutput::AssetDashboard(asset_dashboard(&build_profiles(snapshot, ctx)?))
        }
        OutputName::UsageMetrics => {
            ReportOutput::UsageMetrics(usage_metrics(snapshot.usage()?, &ctx.thresholds))
        }
        OutputName::OverdueAlerts => {
            ReportOutput::OverdueAlerts(detect_overdue(snapshot.rentals()?, ctx.as_of))
        }
        OutputName::MaintenanceAlerts => ReportOutput::MaintenanceAlerts(maintenance_alerts(
            snapshot.maintenance(),
            snapshot.usage()?,
            ctx,
        )),
        OutputName::Anomalies => {
            let usage = snapshot.usage()?;
            let profiles = build_profiles(snapshot, ctx)?;
            ReportOutput::Anomalies(anomalies(&profiles, &usage_metrics(usage, &ctx.thresholds)))
        }
        OutputName::PredictiveAllocation => ReportOutput::PredictiveAllocation(allocate()?),
        OutputName::RollbackWithAllocation => {
            let rentals = snapshot.rentals()?;
            ReportOutput::RollbackWithAllocation(rollback_with_allocation(
                rentals,
                &allocate()?,
                ctx.as_of,
            ))
        }
        OutputName::Alerts => ReportOutput::Alerts(FleetReport::run(snapshot, ctx)?.alerts),
    };

    info!(output = %name, rows = output.len(), as_of = %ctx.as_of, "computed output");
    Ok(output)
}

//! Equipment profile: one row per registered piece of equipment, joining every
//! source relation onto the registry.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetops_core::{EquipmentId, FleetResult, SiteId};
use fleetops_records::{
    AiFeatureRecord, AlertRecord, Equipment, FinancialRecord, FleetSnapshot, MaintenanceRecord,
    RentalTransaction, UsageRecord,
};

use crate::context::AnalysisContext;
use crate::select::pick_per_equipment;
use crate::status::EquipmentStatus;
use crate::usage::utilization_pct;

/// Unified per-equipment view.
///
/// Rental fields come from the latest rental (by check-out date), usage fields from
/// the latest usage record (by date); every other group from the single matching
/// record of its relation. Fields of a relation with no matching record are `None`.
/// The column set is fixed regardless of which optional relations were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentProfile {
    pub equipment_id: EquipmentId,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub tag_id: Option<String>,

    // Latest rental.
    pub site_id: Option<SiteId>,
    pub status: EquipmentStatus,
    pub check_out_date: Option<NaiveDate>,
    pub expected_return_date: Option<NaiveDate>,
    pub check_in_date: Option<NaiveDate>,

    // Latest usage.
    pub usage_date: Option<NaiveDate>,
    pub engine_hours_per_day: Option<f64>,
    pub idle_hours_per_day: Option<f64>,
    pub utilization_pct_snapshot: Option<f64>,
    pub location: Option<String>,

    // Upstream alert flags.
    pub alert_type: Option<String>,
    pub overdue_status: Option<bool>,
    pub reminder_sent_date: Option<NaiveDate>,

    // Model features.
    pub utilization_rate: Option<f64>,
    pub idle_ratio: Option<f64>,
    pub predicted_demand_score: Option<f64>,
    pub anomaly_flag: Option<bool>,
    pub recommended_site: Option<String>,

    // Maintenance.
    pub last_service_date: Option<NaiveDate>,
    pub next_service_due: Option<NaiveDate>,
    pub breakdowns_reported: Option<i64>,
    pub condition_status: Option<String>,
    pub maintenance_costs: Option<f64>,

    // Financials.
    pub rental_rate_per_day: Option<f64>,
    pub total_rental_cost: Option<f64>,
    pub penalty_cost: Option<f64>,
    pub fuel_cost: Option<f64>,
    pub maintenance_cost: Option<f64>,
}

/// Records joined onto one registry row.
struct Joined<'a> {
    rental: Option<&'a RentalTransaction>,
    usage: Option<&'a UsageRecord>,
    alert: Option<&'a AlertRecord>,
    ai: Option<&'a AiFeatureRecord>,
    maintenance: Option<&'a MaintenanceRecord>,
    financial: Option<&'a FinancialRecord>,
}

impl EquipmentProfile {
    fn assemble(equipment: &Equipment, joined: Joined<'_>, as_of: NaiveDate) -> Self {
        let Joined {
            rental,
            usage,
            alert,
            ai,
            maintenance,
            financial,
        } = joined;

        let engine = usage.and_then(|u| u.engine_hours_per_day);
        let snapshot_pct = utilization_pct(engine, usage.and_then(UsageRecord::total_hours));

        Self {
            equipment_id: equipment.equipment_id.clone(),
            equipment_type: equipment.equipment_type.clone(),
            tag_id: equipment.tag_id.clone(),

            site_id: rental.and_then(|r| r.site_id.clone()),
            status: EquipmentStatus::classify(rental, as_of),
            check_out_date: rental.and_then(|r| r.check_out_date),
            expected_return_date: rental.and_then(|r| r.expected_return_date),
            check_in_date: rental.and_then(|r| r.check_in_date),

            usage_date: usage.and_then(|u| u.date),
            engine_hours_per_day: engine,
            idle_hours_per_day: usage.and_then(|u| u.idle_hours_per_day),
            utilization_pct_snapshot: snapshot_pct,
            location: usage.and_then(|u| u.location.clone()),

            alert_type: alert.and_then(|a| a.alert_type.clone()),
            overdue_status: alert.and_then(|a| a.overdue_status),
            reminder_sent_date: alert.and_then(|a| a.reminder_sent_date),

            utilization_rate: ai.and_then(|a| a.utilization_rate),
            idle_ratio: ai.and_then(|a| a.idle_ratio),
            predicted_demand_score: ai.and_then(|a| a.predicted_demand_score),
            anomaly_flag: ai.and_then(|a| a.anomaly_flag),
            recommended_site: ai.and_then(|a| a.recommended_site.clone()),

            last_service_date: maintenance.and_then(|m| m.last_service_date),
            next_service_due: maintenance.and_then(|m| m.next_service_due),
            breakdowns_reported: maintenance.and_then(|m| m.breakdowns_reported),
            condition_status: maintenance.and_then(|m| m.condition_status.clone()),
            maintenance_costs: maintenance.and_then(|m| m.maintenance_costs),

            rental_rate_per_day: financial.and_then(|f| f.rental_rate_per_day),
            total_rental_cost: financial.and_then(|f| f.total_rental_cost),
            penalty_cost: financial.and_then(|f| f.penalty_cost),
            fuel_cost: financial.and_then(|f| f.fuel_cost),
            maintenance_cost: financial.and_then(|f| f.maintenance_cost),
        }
    }
}

/// Build one profile per distinct equipment id in the registry, in registry order.
///
/// Requires `equipment` and `rentals`. Usage and every other relation are joined
/// when present and read as empty when absent.
pub fn build_profiles(
    snapshot: &FleetSnapshot,
    ctx: &AnalysisContext,
) -> FleetResult<Vec<EquipmentProfile>> {
    let equipment = snapshot.equipment()?;
    let rentals = snapshot.rentals()?;
    let usage = snapshot.usage.as_deref().unwrap_or_default();

    let latest_rental = pick_per_equipment(rentals, |r| (r.check_out_date, r.transaction_id));
    let latest_usage = pick_per_equipment(usage, |u| (u.date, u.usage_id));
    let alerts = pick_per_equipment(snapshot.alerts(), |a| a.alert_id);
    let ai = pick_per_equipment(snapshot.ai(), |a| a.ai_id);
    let maintenance = pick_per_equipment(snapshot.maintenance(), |m| m.record_id);
    let financial = pick_per_equipment(snapshot.financial(), |f| f.financial_id);

    let mut seen: HashSet<&EquipmentId> = HashSet::with_capacity(equipment.len());
    let profiles: Vec<EquipmentProfile> = equipment
        .iter()
        .filter(|e| seen.insert(&e.equipment_id))
        .map(|e| {
            let id = &e.equipment_id;
            let joined = Joined {
                rental: latest_rental.get(id).copied(),
                usage: latest_usage.get(id).copied(),
                alert: alerts.get(id).copied(),
                ai: ai.get(id).copied(),
                maintenance: maintenance.get(id).copied(),
                financial: financial.get(id).copied(),
            };
            EquipmentProfile::assemble(e, joined, ctx.as_of)
        })
        .collect();

    debug!(
        equipment = equipment.len(),
        profiles = profiles.len(),
        as_of = %ctx.as_of,
        "built equipment profiles"
    );
    Ok(profiles)
}

/// Dashboard projection of a profile: every profile column, with the latest usage
/// columns named after what they mean on a dashboard (`last_seen`,
/// `last_engine_hpd`, `last_idle_hpd`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDashboardRow {
    pub equipment_id: EquipmentId,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub tag_id: Option<String>,

    pub site_id: Option<SiteId>,
    pub status: EquipmentStatus,
    pub check_out_date: Option<NaiveDate>,
    pub expected_return_date: Option<NaiveDate>,
    pub check_in_date: Option<NaiveDate>,

    pub last_seen: Option<NaiveDate>,
    pub last_engine_hpd: Option<f64>,
    pub last_idle_hpd: Option<f64>,
    pub utilization_pct_snapshot: Option<f64>,
    pub location: Option<String>,

    pub alert_type: Option<String>,
    pub overdue_status: Option<bool>,
    pub reminder_sent_date: Option<NaiveDate>,

    pub utilization_rate: Option<f64>,
    pub idle_ratio: Option<f64>,
    pub predicted_demand_score: Option<f64>,
    pub anomaly_flag: Option<bool>,
    pub recommended_site: Option<String>,

    pub last_service_date: Option<NaiveDate>,
    pub next_service_due: Option<NaiveDate>,
    pub breakdowns_reported: Option<i64>,
    pub condition_status: Option<String>,
    pub maintenance_costs: Option<f64>,

    pub rental_rate_per_day: Option<f64>,
    pub total_rental_cost: Option<f64>,
    pub penalty_cost: Option<f64>,
    pub fuel_cost: Option<f64>,
    pub maintenance_cost: Option<f64>,
}

impl From<&EquipmentProfile> for AssetDashboardRow {
    fn from(p: &EquipmentProfile) -> Self {
        Self {
            equipment_id: p.equipment_id.clone(),
            equipment_type: p.equipment_type.clone(),
            tag_id: p.tag_id.clone(),

            site_id: p.site_id.clone(),
            status: p.status,
            check_out_date: p.check_out_date,
            expected_return_date: p.expected_return_date,
            check_in_date: p.check_in_date,

            last_seen: p.usage_date,
            last_engine_hpd: p.engine_hours_per_day,
            last_idle_hpd: p.idle_hours_per_day,
            utilization_pct_snapshot: p.utilization_pct_snapshot,
            location: p.location.clone(),

            alert_type: p.alert_type.clone(),
            overdue_status: p.overdue_status,
            reminder_sent_date: p.reminder_sent_date,

            utilization_rate: p.utilization_rate,
            idle_ratio: p.idle_ratio,
            predicted_demand_score: p.predicted_demand_score,
            anomaly_flag: p.anomaly_flag,
            recommended_site: p.recommended_site.clone(),

            last_service_date: p.last_service_date,
            next_service_due: p.next_service_due,
            breakdowns_reported: p.breakdowns_reported,
            condition_status: p.condition_status.clone(),
            maintenance_costs: p.maintenance_costs,

            rental_rate_per_day: p.rental_rate_per_day,
            total_rental_cost: p.total_rental_cost,
            penalty_cost: p.penalty_cost,
            fuel_cost: p.fuel_cost,
            maintenance_cost: p.maintenance_cost,
        }
    }
}

pub fn asset_dashboard(profiles: &[EquipmentProfile]) -> Vec<AssetDashboardRow> {
    profiles.iter().map(AssetDashboardRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetops_core::FleetError;
    use proptest::prelude::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn ctx() -> AnalysisContext {
        AnalysisContext::new(d(8, 1))
    }

    fn test_snapshot() -> FleetSnapshot {
        FleetSnapshot::new()
            .with_equipment(vec![
                Equipment::new("EQ001", "Excavator").with_tag("QR-001"),
                Equipment::new("EQ002", "Crane"),
                Equipment::new("EQ003", "Loader"),
            ])
            .with_rentals(vec![
                RentalTransaction::new("EQ001")
                    .with_id(1)
                    .at_site("S-OLD")
                    .checked_out(d(5, 1))
                    .checked_in(d(5, 20)),
                RentalTransaction::new("EQ001")
                    .with_id(2)
                    .at_site("S-NEW")
                    .checked_out(d(7, 1))
                    .due(d(7, 20)),
                RentalTransaction::new("EQ002")
                    .with_id(3)
                    .at_site("S-2")
                    .checked_out(d(7, 28))
                    .due(d(8, 15)),
            ])
            .with_usage(vec![
                UsageRecord::new("EQ001", d(7, 30)).with_hours(6.0, 2.0).at("North"),
                UsageRecord::new("EQ001", d(7, 10)).with_hours(1.0, 7.0).at("South"),
                UsageRecord::new("EQ002", d(7, 30)).with_hours(0.0, 0.0),
            ])
    }

    #[test]
    fn one_profile_per_registered_equipment() {
        let profiles = build_profiles(&test_snapshot(), &ctx()).unwrap();
        let ids: Vec<&str> = profiles.iter().map(|p| p.equipment_id.as_str()).collect();
        assert_eq!(ids, vec!["EQ001", "EQ002", "EQ003"]);
    }

    #[test]
    fn joins_latest_rental_and_usage() {
        let profiles = build_profiles(&test_snapshot(), &ctx()).unwrap();
        let eq1 = &profiles[0];

        assert_eq!(eq1.site_id, Some(SiteId::new("S-NEW")));
        assert_eq!(eq1.status, EquipmentStatus::Overdue);
        assert_eq!(eq1.usage_date, Some(d(7, 30)));
        assert_eq!(eq1.location.as_deref(), Some("North"));
        assert_eq!(eq1.utilization_pct_snapshot, Some(75.0));
        assert_eq!(eq1.tag_id.as_deref(), Some("QR-001"));

        let eq2 = &profiles[1];
        assert_eq!(eq2.status, EquipmentStatus::Active);
        assert_eq!(eq2.utilization_pct_snapshot, None);

        let eq3 = &profiles[2];
        assert_eq!(eq3.status, EquipmentStatus::Idle);
        assert_eq!(eq3.site_id, None);
        assert_eq!(eq3.usage_date, None);
    }

    #[test]
    fn missing_optional_relations_yield_null_columns() {
        let profiles = build_profiles(&test_snapshot(), &ctx()).unwrap();
        for p in &profiles {
            assert_eq!(p.alert_type, None);
            assert_eq!(p.predicted_demand_score, None);
            assert_eq!(p.last_service_date, None);
            assert_eq!(p.rental_rate_per_day, None);
        }
    }

    #[test]
    fn one_to_one_relations_keep_highest_record_id() {
        let snapshot = test_snapshot().with_maintenance(vec![
            MaintenanceRecord::new("EQ001").with_id(9).serviced(d(6, 1)),
            MaintenanceRecord::new("EQ001").with_id(4).serviced(d(7, 1)),
        ]);
        let profiles = build_profiles(&snapshot, &ctx()).unwrap();
        assert_eq!(profiles[0].last_service_date, Some(d(6, 1)));
    }

    #[test]
    fn duplicate_registry_rows_collapse_to_first() {
        let mut snapshot = test_snapshot();
        if let Some(equipment) = snapshot.equipment.as_mut() {
            equipment.push(Equipment::new("EQ001", "Duplicate"));
        }
        let profiles = build_profiles(&snapshot, &ctx()).unwrap();
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0].equipment_type, "Excavator");
    }

    #[test]
    fn requires_equipment_and_rentals() {
        let err = build_profiles(&FleetSnapshot::new(), &ctx()).unwrap_err();
        assert_eq!(err, FleetError::missing_relation("equipment"));

        let only_equipment =
            FleetSnapshot::new().with_equipment(vec![Equipment::new("EQ001", "Crane")]);
        let err = build_profiles(&only_equipment, &ctx()).unwrap_err();
        assert_eq!(err, FleetError::missing_relation("rentals"));
    }

    #[test]
    fn dashboard_renames_usage_columns() {
        let profiles = build_profiles(&test_snapshot(), &ctx()).unwrap();
        let dash = asset_dashboard(&profiles);
        assert_eq!(dash.len(), profiles.len());
        assert_eq!(dash[0].last_seen, Some(d(7, 30)));
        assert_eq!(dash[0].last_engine_hpd, Some(6.0));
        assert_eq!(dash[0].last_idle_hpd, Some(2.0));

        let json = serde_json::to_value(&dash[0]).unwrap();
        assert_eq!(json["last_seen"], "2025-07-30");
        assert_eq!(json["type"], "Excavator");
        assert_eq!(json["status"], "Overdue");
    }

    #[test]
    fn dashboard_carries_feature_and_financial_columns() {
        let mut financial = FinancialRecord::new("EQ001");
        financial.rental_rate_per_day = Some(450.0);
        financial.total_rental_cost = Some(9000.0);
        let mut features = AiFeatureRecord::new("EQ001", 82.0);
        features.recommended_site = Some("S010".to_string());
        features.utilization_rate = Some(0.71);

        let snapshot = test_snapshot()
            .with_ai(vec![features])
            .with_financial(vec![financial])
            .with_maintenance(vec![MaintenanceRecord::new("EQ001").serviced(d(6, 1))]);
        let profiles = build_profiles(&snapshot, &ctx()).unwrap();
        let json = serde_json::to_value(&asset_dashboard(&profiles)[0]).unwrap();

        assert_eq!(json["predicted_demand_score"], 82.0);
        assert_eq!(json["recommended_site"], "S010");
        assert_eq!(json["utilization_rate"], 0.71);
        assert_eq!(json["rental_rate_per_day"], 450.0);
        assert_eq!(json["total_rental_cost"], 9000.0);
        assert_eq!(json["last_service_date"], "2025-06-01");
        assert!(json.get("usage_date").is_none());
        assert!(json.get("engine_hours_per_day").is_none());

        let eq2 = serde_json::to_value(&asset_dashboard(&profiles)[1]).unwrap();
        assert_eq!(eq2["predicted_demand_score"], serde_json::Value::Null);
        assert_eq!(eq2["fuel_cost"], serde_json::Value::Null);
    }

    #[test]
    fn same_day_rentals_resolve_by_transaction_id() {
        let snapshot = test_snapshot().with_rentals(vec![
            RentalTransaction::new("EQ001")
                .with_id(8)
                .at_site("S-HIGH")
                .checked_out(d(7, 1))
                .due(d(9, 1)),
            RentalTransaction::new("EQ001")
                .with_id(2)
                .at_site("S-LOW")
                .checked_out(d(7, 1))
                .due(d(9, 1)),
        ]);
        let profiles = build_profiles(&snapshot, &ctx()).unwrap();
        assert_eq!(profiles[0].site_id, Some(SiteId::new("S-HIGH")));
        assert_eq!(profiles[0].status, EquipmentStatus::Active);
    }

    #[test]
    fn same_day_usage_resolves_by_usage_id() {
        let snapshot = test_snapshot().with_usage(vec![
            UsageRecord::new("EQ001", d(7, 30))
                .with_id(5)
                .with_hours(4.0, 4.0)
                .at("East"),
            UsageRecord::new("EQ001", d(7, 30))
                .with_id(3)
                .with_hours(8.0, 0.0)
                .at("West"),
        ]);
        let profiles = build_profiles(&snapshot, &ctx()).unwrap();
        assert_eq!(profiles[0].location.as_deref(), Some("East"));
        assert_eq!(profiles[0].utilization_pct_snapshot, Some(50.0));
    }

    proptest! {
        /// Every registered id gets exactly one profile, whatever the rentals look like.
        #[test]
        fn profiles_are_complete(
            equipment_count in 1usize..15,
            rentals in prop::collection::vec((0usize..20, 0u32..60, prop::option::of(0u32..60), prop::option::of(0u32..60)), 0..40)
        ) {
            let base = d(6, 1);
            let equipment: Vec<Equipment> = (0..equipment_count)
                .map(|i| Equipment::new(format!("EQ{i:03}"), "Crane"))
                .collect();
            let rentals: Vec<RentalTransaction> = rentals
                .into_iter()
                .map(|(eq, out, back, due)| {
                    let mut r = RentalTransaction::new(format!("EQ{eq:03}"))
                        .checked_out(base + chrono::Days::new(out as u64));
                    r.check_in_date = back.map(|b| base + chrono::Days::new(b as u64));
                    r.expected_return_date = due.map(|x| base + chrono::Days::new(x as u64));
                    r
                })
                .collect();
            let snapshot = FleetSnapshot::new()
                .with_equipment(equipment)
                .with_rentals(rentals);

            let profiles = build_profiles(&snapshot, &ctx()).unwrap();
            prop_assert_eq!(profiles.len(), equipment_count);
            let distinct: HashSet<_> = profiles.iter().map(|p| p.equipment_id.clone()).collect();
            prop_assert_eq!(distinct.len(), equipment_count);
        }
    }
}

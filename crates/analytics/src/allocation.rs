//! Predictive site allocation.
//!
//! Model:
//! - Candidate sites are those whose `required_type` equals the equipment type.
//! - `score = predicted_demand_score + location_bonus` when the site sits at the
//!   equipment's last known location, `predicted_demand_score` otherwise.
//! - The best candidate wins; ties go to the smallest `site_id`.
//!
//! Each piece of equipment is scored independently. Two pieces of equipment can
//! be sent to the same site; there is no load balancing across the fleet.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use fleetops_core::{EquipmentId, SiteId};
use fleetops_records::{AiFeatureRecord, Equipment, Site, UsageRecord};

use crate::context::AnalysisContext;
use crate::select::pick_per_equipment;

/// One site recommendation per equipment with model features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub equipment_id: EquipmentId,
    pub recommended_site_id: Option<SiteId>,
    pub recommendation: String,
    /// Score of the chosen site; `None` when there was no candidate.
    pub score: Option<f64>,
}

impl Allocation {
    pub const NO_MATCH: &'static str = "No matching site";
}

/// Render a score the way upstream reports print them: integral values keep one
/// decimal (`85.0`), everything else uses the shortest exact form.
fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}

fn score_site(
    site: &Site,
    demand: f64,
    last_location: Option<&str>,
    ctx: &AnalysisContext,
) -> f64 {
    let co_located = matches!(
        (site.location.as_deref(), last_location),
        (Some(site_loc), Some(eq_loc)) if site_loc == eq_loc
    );
    if co_located {
        demand + ctx.thresholds.location_bonus
    } else {
        demand
    }
}

/// Recommend a site for every equipment that has a model feature record.
///
/// Output follows the first appearance of each equipment in `ai`; when an
/// equipment has several feature records, the one with the highest `ai_id` is
/// scored. A feature record for equipment missing from the registry (or with no
/// type) has no candidates. A missing demand score counts as `0.0`. Last known
/// location is the location of the latest usage record.
pub fn predictive_allocation(
    equipment: &[Equipment],
    ai: &[AiFeatureRecord],
    sites: &[Site],
    usage: &[UsageRecord],
    ctx: &AnalysisContext,
) -> Vec<Allocation> {
    let types: HashMap<&EquipmentId, &str> = equipment
        .iter()
        .rev()
        .map(|e| (&e.equipment_id, e.equipment_type.as_str()))
        .filter(|(_, eq_type)| !eq_type.is_empty())
        .collect();
    let latest_usage = pick_per_equipment(usage, |u| (u.date, u.usage_id));
    let features = pick_per_equipment(ai, |a| a.ai_id);

    let mut emitted: HashSet<&EquipmentId> = HashSet::with_capacity(features.len());
    let mut allocations: Vec<Allocation> = Vec::with_capacity(features.len());
    for first in ai {
        let equipment_id = &first.equipment_id;
        if !emitted.insert(equipment_id) {
            continue;
        }
        let record = features.get(equipment_id).copied().unwrap_or(first);

        let demand = record.predicted_demand_score.unwrap_or(0.0);
        let last_location = latest_usage
            .get(equipment_id)
            .and_then(|u| u.location.as_deref());

        let best = types.get(equipment_id).and_then(|eq_type| {
            sites
                .iter()
                .filter(|s| s.required_type == *eq_type)
                .map(|s| (s, score_site(s, demand, last_location, ctx)))
                .max_by(|(a, sa), (b, sb)| sa.total_cmp(sb).then_with(|| b.site_id.cmp(&a.site_id)))
        });

        allocations.push(match best {
            Some((site, score)) => Allocation {
                equipment_id: equipment_id.clone(),
                recommended_site_id: Some(site.site_id.clone()),
                recommendation: format!(
                    "Allocate to {} (score={})",
                    site.location.as_deref().unwrap_or("unknown location"),
                    format_score(score)
                ),
                score: Some(score),
            },
            None => Allocation {
                equipment_id: equipment_id.clone(),
                recommended_site_id: None,
                recommendation: Allocation::NO_MATCH.to_string(),
                score: None,
            },
        });
    }

    debug!(
        candidates = ai.len(),
        sites = sites.len(),
        allocated = allocations.iter().filter(|a| a.recommended_site_id.is_some()).count(),
        "computed predictive allocation"
    );
    allocations
}

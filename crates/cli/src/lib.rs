//! `fleetops-report`: load a snapshot, run the engine, print JSON.
//!
//! Usage:
//!   fleetops-report --snapshot fleet.json [--as-of 2025-08-01] [--output alerts] [--compact]

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use fleetops_analytics::{FleetReport, OutputName, run_output};
use fleetops_core::FleetError;
use fleetops_infra::{EngineConfig, RelationSource};
use fleetops_records::coerce::parse_date;

#[derive(Parser, Debug)]
#[command(name = "fleetops-report")]
#[command(about = "Compute fleet analytics outputs from a relation snapshot", long_about = None)]
pub struct Args {
    /// JSON document holding the input relations
    #[arg(long, env = "FLEETOPS_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Date treated as "today" (YYYY-MM-DD); defaults to the local date
    #[arg(long, env = "FLEETOPS_AS_OF", value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    /// Emit a single derived relation instead of the full report
    #[arg(long, value_parser = parse_output)]
    pub output: Option<OutputName>,

    /// Print JSON on one line
    #[arg(long)]
    pub compact: bool,
}

fn parse_as_of(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))
}

fn parse_output(raw: &str) -> Result<OutputName, FleetError> {
    raw.parse()
}

/// Run with configuration read from the environment.
pub fn run(args: Args) -> anyhow::Result<String> {
    let config = EngineConfig::from_env().context("reading FLEETOPS_* configuration")?;
    run_with(args, config)
}

/// Run with an explicit base configuration; command-line values take precedence.
pub fn run_with(args: Args, mut config: EngineConfig) -> anyhow::Result<String> {
    if let Some(path) = args.snapshot {
        config.snapshot_path = Some(path);
    }
    if let Some(as_of) = args.as_of {
        config.as_of = Some(as_of);
    }

    let ctx = config.context();
    let source = config.source().context("no snapshot given (--snapshot or FLEETOPS_SNAPSHOT)")?;
    let snapshot = source
        .load()
        .with_context(|| format!("loading {}", source.path().display()))?;

    let value = match args.output {
        Some(name) => {
            let out = run_output(name, &snapshot, &ctx)
                .with_context(|| format!("computing {name}"))?;
            serde_json::to_value(out)?
        }
        None => {
            let report = FleetReport::run(&snapshot, &ctx).context("computing fleet report")?;
            info!(
                equipment = report.equipment_profile.len(),
                alerts = report.alerts.len(),
                as_of = %ctx.as_of,
                "fleet report computed"
            );
            serde_json::to_value(report)?
        }
    };

    let rendered = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Write;

    const FLEET: &str = r#"{
        "equipment": [{"equipment_id": "EQ001", "type": "Excavator"}],
        "rentals": [{"transaction_id": 1, "equipment_id": "EQ001", "site_id": "S001",
                     "check_out_date": "2025-07-01", "expected_return_date": "2025-07-20"}],
        "usage": [{"usage_id": 1, "equipment_id": "EQ001", "date": "2025-07-30",
                   "engine_hours_per_day": 6.0, "idle_hours_per_day": 2.0}]
    }"#;

    fn fleet_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FLEET.as_bytes()).unwrap();
        file
    }

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fleetops-report").chain(extra.iter().copied()))
            .unwrap()
    }

    #[test]
    fn full_report_lists_every_output() {
        let file = fleet_file();
        let path = file.path().to_str().unwrap();
        let out = run_with(
            args(&["--snapshot", path, "--as-of", "2025-08-01", "--compact"]),
            EngineConfig::default(),
        )
        .unwrap();

        assert!(!out.contains('\n'));
        let value: Value = serde_json::from_str(&out).unwrap();
        for name in OutputName::ALL {
            assert!(value.get(name.as_str()).is_some(), "missing {name}");
        }
        assert_eq!(value["overdue_alerts"][0]["overdue_days"], 12);
    }

    #[test]
    fn single_output_accepts_dashed_names() {
        let file = fleet_file();
        let path = file.path().to_str().unwrap();
        let out = run_with(
            args(&["--snapshot", path, "--as-of", "2025-08-01", "--output", "usage-metrics"]),
            EngineConfig::default(),
        )
        .unwrap();

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["equipment_id"], "EQ001");
        assert_eq!(value[0]["utilization_pct"], 75.0);
    }

    #[test]
    fn flags_override_configuration() {
        let file = fleet_file();
        let config = EngineConfig {
            snapshot_path: Some(PathBuf::from("/nonexistent/fleet.json")),
            as_of: NaiveDate::from_ymd_opt(2025, 7, 10),
            ..EngineConfig::default()
        };
        let path = file.path().to_str().unwrap();
        let out = run_with(
            args(&["--snapshot", path, "--as-of", "2025-07-25", "--output", "overdue_alerts"]),
            config,
        )
        .unwrap();

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["overdue_days"], 5);
    }

    #[test]
    fn missing_snapshot_path_is_reported() {
        let err = run_with(args(&["--as-of", "2025-08-01"]), EngineConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no snapshot given"));
    }

    #[test]
    fn rejects_unknown_output_and_bad_dates() {
        let bad_output = ["fleetops-report", "--output", "everything"];
        assert!(Args::try_parse_from(bad_output).is_err());
        let bad_date = ["fleetops-report", "--as-of", "soon"];
        assert!(Args::try_parse_from(bad_date).is_err());
    }
}

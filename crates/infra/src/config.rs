//! Engine configuration loaded from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use fleetops_analytics::{AnalysisContext, Thresholds};
use fleetops_records::coerce::parse_date;

use crate::source::{JsonFileRelationSource, SourceError};

pub const SNAPSHOT_ENV: &str = "FLEETOPS_SNAPSHOT";
pub const AS_OF_ENV: &str = "FLEETOPS_AS_OF";
pub const SERVICE_HOURS_ENV: &str = "FLEETOPS_SERVICE_HOURS";
pub const SERVICE_DAYS_ENV: &str = "FLEETOPS_SERVICE_DAYS";
pub const UNDERUTILIZED_PCT_ENV: &str = "FLEETOPS_UNDERUTILIZED_PCT";
pub const LOCATION_BONUS_ENV: &str = "FLEETOPS_LOCATION_BONUS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for one engine invocation.
///
/// Unset variables fall back to defaults; a variable that is set but does not
/// parse is an error rather than a silent default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub snapshot_path: Option<PathBuf>,
    /// Fixed as-of date; `None` means the current local date.
    pub as_of: Option<NaiveDate>,
    pub thresholds: Thresholds,
}

fn parse_number<T: FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T::Err: core::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig {
            snapshot_path: lookup(SNAPSHOT_ENV)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            ..EngineConfig::default()
        };

        if let Some(raw) = lookup(AS_OF_ENV) {
            let date = parse_date(&raw).ok_or_else(|| ConfigError::InvalidValue {
                key: AS_OF_ENV,
                value: raw.clone(),
                reason: "expected YYYY-MM-DD".to_string(),
            })?;
            config.as_of = Some(date);
        }

        let mut thresholds = Thresholds::default();
        if let Some(raw) = lookup(SERVICE_HOURS_ENV) {
            thresholds = thresholds.with_service_hours(parse_number(SERVICE_HOURS_ENV, raw)?);
        }
        if let Some(raw) = lookup(SERVICE_DAYS_ENV) {
            thresholds = thresholds.with_service_days(parse_number(SERVICE_DAYS_ENV, raw)?);
        }
        if let Some(raw) = lookup(UNDERUTILIZED_PCT_ENV) {
            thresholds =
                thresholds.with_underutilized_pct(parse_number(UNDERUTILIZED_PCT_ENV, raw)?);
        }
        if let Some(raw) = lookup(LOCATION_BONUS_ENV) {
            thresholds = thresholds.with_location_bonus(parse_number(LOCATION_BONUS_ENV, raw)?);
        }
        config.thresholds = thresholds;

        if config.thresholds != Thresholds::default() {
            info!(thresholds = ?config.thresholds, "threshold overrides applied");
        }
        Ok(config)
    }

    /// Analysis context for this run. Reads the clock only when no as-of date is set.
    pub fn context(&self) -> AnalysisContext {
        let ctx = match self.as_of {
            Some(as_of) => AnalysisContext::new(as_of),
            None => AnalysisContext::today(),
        };
        ctx.with_thresholds(self.thresholds)
    }

    pub fn source(&self) -> Result<JsonFileRelationSource, SourceError> {
        self.snapshot_path
            .as_ref()
            .map(JsonFileRelationSource::new)
            .ok_or(SourceError::NoPath)
    }
}

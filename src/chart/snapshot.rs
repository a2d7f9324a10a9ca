//! A `ChartProvider` backed by pre-computed provider output.
//!
//! The placement algorithm runs elsewhere; its answers for one birth (natal
//! chart, natal flights, and per-date horoscopes) are captured as JSON and
//! replayed through the same trait the live provider implements.

use super::provider::{
    BirthParameters, ChartProvider, FlowRow, Horoscope, ScopeSelector,
};
use super::sector::Chart;
use crate::error::{AnalysisError, ConfigError};
use crate::layers::Scope;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Provider answers for one target date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoroscopeSnapshot {
    #[serde(flatten)]
    pub horoscope: Horoscope,
    /// Flight rows per scope; a missing key means the scope is unavailable.
    #[serde(default)]
    pub flows: BTreeMap<Scope, Vec<FlowRow>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotProvider {
    pub birth: BirthParameters,
    pub chart: Chart,
    #[serde(default)]
    pub natal_flows: Vec<FlowRow>,
    #[serde(default)]
    pub horoscopes: BTreeMap<NaiveDate, HoroscopeSnapshot>,
}

impl SnapshotProvider {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    fn snapshot_at(&self, target: NaiveDate) -> Option<&HoroscopeSnapshot> {
        let snap = self.horoscopes.get(&target);
        if snap.is_none() {
            warn!(%target, "no horoscope snapshot recorded for target date");
        }
        snap
    }
}

impl ChartProvider for SnapshotProvider {
    fn build_chart(&self, birth: &BirthParameters) -> Result<Chart, AnalysisError> {
        birth.validate()?;

        if birth.birth_date != self.birth.birth_date {
            return Err(AnalysisError::invalid_birth(
                "birth_date",
                format!(
                    "snapshot was recorded for {}, requested {}",
                    self.birth.birth_date, birth.birth_date
                ),
            ));
        }
        if birth.birth_time_slot != self.birth.birth_time_slot {
            return Err(AnalysisError::invalid_birth(
                "birth_time_slot",
                format!(
                    "snapshot was recorded for slot {}, requested {}",
                    self.birth.birth_time_slot, birth.birth_time_slot
                ),
            ));
        }
        if birth.sex != self.birth.sex {
            return Err(AnalysisError::invalid_birth(
                "sex",
                format!("snapshot was recorded for {:?}, requested {:?}", self.birth.sex, birth.sex),
            ));
        }

        Ok(self.chart.clone())
    }

    fn overlay(&self, _chart: &Chart, target: NaiveDate) -> Horoscope {
        self.snapshot_at(target)
            .map(|s| s.horoscope.clone())
            .unwrap_or_default()
    }

    fn flow_rows(
        &self,
        _chart: &Chart,
        selector: ScopeSelector,
        sector_names: &[String],
    ) -> Option<Vec<FlowRow>> {
        let rows: &[FlowRow] = match (selector.scope, selector.target) {
            (Scope::Natal, _) => self.natal_flows.as_slice(),
            (scope, Some(target)) => self.snapshot_at(target)?.flows.get(&scope)?.as_slice(),
            (scope, None) => {
                debug!(%scope, "flow rows requested without a target date");
                return None;
            }
        };

        // Rows come back in the caller's sector order.
        Some(
            sector_names
                .iter()
                .filter_map(|name| rows.iter().find(|r| &r.sector == name).cloned())
                .collect(),
        )
    }
}

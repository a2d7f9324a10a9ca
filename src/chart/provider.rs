//! The Chart Provider boundary: the placement algorithm is an external
//! capability, consumed through the [`ChartProvider`] trait.
//!
//! Every per-scope answer is option-typed. A provider that cannot answer for a
//! scope returns `None`, and consumers carry that absence forward explicitly.

use super::sector::Chart;
use crate::error::AnalysisError;
use crate::graph::Transformation;
use crate::layers::Scope;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel a provider uses for "this sector flies nowhere for this kind".
pub const NO_TARGET: &str = "（無）";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "男")]
    Male,
    #[serde(alias = "女")]
    Female,
}

/// Raw birth data handed to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthParameters {
    pub birth_date: NaiveDate,
    /// Two-hour time slot, 0..=11.
    pub birth_time_slot: u8,
    pub sex: Sex,
}

impl BirthParameters {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.birth_time_slot > 11 {
            return Err(AnalysisError::invalid_birth(
                "birth_time_slot",
                format!("must be within 0..=11, got {}", self.birth_time_slot),
            ));
        }
        Ok(())
    }
}

/// Ordered `[禄, 权, 科, 忌]` star names activated by one scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformationStars(pub [String; 4]);

impl TransformationStars {
    pub fn new(lu: &str, quan: &str, ke: &str, ji: &str) -> Self {
        Self([lu.into(), quan.into(), ke.into(), ji.into()])
    }

    pub fn star(&self, kind: Transformation) -> &str {
        &self.0[kind.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Transformation, &str)> {
        Transformation::ALL.into_iter().map(move |k| (k, self.star(k)))
    }
}

/// The scope-specific stars (流耀) a provider places in one natal sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStars {
    pub sector: String,
    #[serde(default)]
    pub stars: Vec<String>,
}

/// One scope's reading of the chart at a target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeOverlay {
    /// Chart-sector index acting as "self" for this scope.
    pub self_index: usize,
    #[serde(default)]
    pub transformation_stars: Option<TransformationStars>,
    /// Per-sector 流耀, in chart order; `None` when the provider lists none.
    #[serde(default)]
    pub flow_stars: Option<Vec<FlowStars>>,
}

/// Per-scope overlays for one target date. Any scope may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horoscope {
    #[serde(default)]
    pub solar_date: Option<String>,
    #[serde(default)]
    pub lunar_date: Option<String>,
    #[serde(default)]
    pub decadal: Option<ScopeOverlay>,
    #[serde(default)]
    pub yearly: Option<ScopeOverlay>,
    #[serde(default)]
    pub monthly: Option<ScopeOverlay>,
    #[serde(default)]
    pub daily: Option<ScopeOverlay>,
}

impl Horoscope {
    pub fn scope(&self, scope: Scope) -> Option<&ScopeOverlay> {
        match scope {
            Scope::Natal => None,
            Scope::Decadal => self.decadal.as_ref(),
            Scope::Yearly => self.yearly.as_ref(),
            Scope::Monthly => self.monthly.as_ref(),
            Scope::Daily => self.daily.as_ref(),
        }
    }
}

/// Which reading a flow-row request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeSelector {
    pub scope: Scope,
    pub target: Option<NaiveDate>,
}

impl ScopeSelector {
    pub fn natal() -> Self {
        Self { scope: Scope::Natal, target: None }
    }

    pub fn at(scope: Scope, target: NaiveDate) -> Self {
        Self { scope, target: Some(target) }
    }
}

/// For one sector, the sector each transformation kind flies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRow {
    pub sector: String,
    #[serde(default)]
    pub flies: BTreeMap<Transformation, String>,
}

impl FlowRow {
    pub fn new(sector: impl Into<String>) -> Self {
        Self { sector: sector.into(), flies: BTreeMap::new() }
    }

    pub fn with(mut self, kind: Transformation, target: impl Into<String>) -> Self {
        self.flies.insert(kind, target.into());
        self
    }

    /// The target for `kind`, with absent, empty and sentinel values filtered out.
    pub fn target(&self, kind: Transformation) -> Option<&str> {
        self.flies
            .get(&kind)
            .map(String::as_str)
            .filter(|t| !t.is_empty() && *t != NO_TARGET && !t.eq_ignore_ascii_case("none"))
    }
}

/// The external placement capability.
pub trait ChartProvider {
    /// Builds the natal chart, or reports which birth parameter was unusable.
    fn build_chart(&self, birth: &BirthParameters) -> Result<Chart, AnalysisError>;

    /// Reads every scope the provider supports at `target`.
    fn overlay(&self, chart: &Chart, target: NaiveDate) -> Horoscope;

    /// Per-sector flight targets for one scope; `None` when the scope is unavailable.
    fn flow_rows(
        &self,
        chart: &Chart,
        selector: ScopeSelector,
        sector_names: &[String],
    ) -> Option<Vec<FlowRow>>;
}

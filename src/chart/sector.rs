//! Defines the `Sector` and `Chart` types: the immutable natal placements a
//! Chart Provider hands to the analysis core.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of sectors on the ring.
pub const SECTOR_COUNT: usize = 12;

/// The twelve canonical sector names, in the order a chart lists them from the
/// life sector onwards.
pub const CANONICAL_SECTORS: [&str; SECTOR_COUNT] = [
    "命宫", "兄弟", "夫妻", "子女", "财帛", "疾厄", "迁移", "仆役", "官禄", "田宅", "福德", "父母",
];

/// The life sector, used as the natal reference sector and the focus fallback.
pub const LIFE_SECTOR: &str = "命宫";

/// Placeholder used wherever a star cannot be located in any sector.
pub const NOT_FOUND: &str = "（未找到）";

pub fn is_canonical(name: &str) -> bool {
    CANONICAL_SECTORS.contains(&name)
}

/// The three star categories a sector carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarCategory {
    Major,
    Minor,
    Adjective,
}

/// One of the twelve fixed slots of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    /// Canonical sector name (e.g. "命宫").
    pub name: String,
    /// Ordinal position on the ring, 0..=11.
    pub index: usize,
    /// Heavenly-stem / earthly-branch label of the slot (e.g. "甲寅").
    #[serde(default)]
    pub stem_branch: String,
    #[serde(default)]
    pub major: Vec<String>,
    #[serde(default)]
    pub minor: Vec<String>,
    #[serde(default)]
    pub adjective: Vec<String>,
    /// Age range `[start, end]` of the decade this sector governs.
    #[serde(default)]
    pub decade_range: Option<(u32, u32)>,
}

impl Sector {
    pub fn stars(&self, category: StarCategory) -> &[String] {
        match category {
            StarCategory::Major => &self.major,
            StarCategory::Minor => &self.minor,
            StarCategory::Adjective => &self.adjective,
        }
    }

    pub fn has(&self, category: StarCategory, star: &str) -> bool {
        self.stars(category).iter().any(|s| s == star)
    }

    /// True if the star sits in any of the three categories.
    pub fn hosts(&self, star: &str) -> bool {
        self.major
            .iter()
            .chain(&self.minor)
            .chain(&self.adjective)
            .any(|s| s == star)
    }
}

/// An ordered sequence of 12 sectors for one birth.
///
/// Charts are rebuilt, never mutated, when birth parameters change; the only
/// way to obtain one is through [`Chart::new`], which enforces the ring shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sector>", into = "Vec<Sector>")]
pub struct Chart {
    sectors: Vec<Sector>,
}

impl Chart {
    /// Validates the 12-sector contract: indices 0..=11 in order, canonical and
    /// unique names.
    pub fn new(sectors: Vec<Sector>) -> Result<Self, AnalysisError> {
        if sectors.len() != SECTOR_COUNT {
            return Err(AnalysisError::MalformedChart(format!(
                "expected {} sectors, got {}",
                SECTOR_COUNT,
                sectors.len()
            )));
        }

        let mut seen = HashSet::with_capacity(SECTOR_COUNT);
        for (i, sector) in sectors.iter().enumerate() {
            if sector.index != i {
                return Err(AnalysisError::MalformedChart(format!(
                    "sector '{}' has index {} at position {}",
                    sector.name, sector.index, i
                )));
            }
            if !is_canonical(&sector.name) {
                return Err(AnalysisError::MalformedChart(format!(
                    "'{}' is not a canonical sector name",
                    sector.name
                )));
            }
            if !seen.insert(sector.name.as_str()) {
                return Err(AnalysisError::MalformedChart(format!(
                    "sector '{}' appears twice",
                    sector.name
                )));
            }
        }

        Ok(Self { sectors })
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Sector names in chart order.
    pub fn sector_names(&self) -> Vec<String> {
        self.sectors.iter().map(|s| s.name.clone()).collect()
    }

    pub fn sector(&self, index: usize) -> Option<&Sector> {
        self.sectors.get(index)
    }

    /// Name of the sector at a ring index.
    pub fn name_at(&self, index: usize) -> &str {
        &self.sectors[index % SECTOR_COUNT].name
    }

    pub fn sector_by_name(&self, name: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.name == name)
    }

    pub fn contains_sector(&self, name: &str) -> bool {
        self.sector_by_name(name).is_some()
    }

    /// Ring index of the life sector.
    pub fn life_index(&self) -> usize {
        // `Chart::new` guarantees all 12 canonical names are present.
        self.sectors
            .iter()
            .position(|s| s.name == LIFE_SECTOR)
            .unwrap_or(0)
    }

    /// The sector currently hosting a star, scanning all three categories.
    pub fn locate_star(&self, star: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.hosts(star))
    }

    /// Name of the sector hosting `star`, or [`NOT_FOUND`].
    pub fn host_of(&self, star: &str) -> &str {
        self.locate_star(star).map_or(NOT_FOUND, |s| s.name.as_str())
    }
}

impl TryFrom<Vec<Sector>> for Chart {
    type Error = AnalysisError;

    fn try_from(sectors: Vec<Sector>) -> Result<Self, Self::Error> {
        Chart::new(sectors)
    }
}

impl From<Chart> for Vec<Sector> {
    fn from(chart: Chart) -> Self {
        chart.sectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_chart_rejects_wrong_length() {
        let mut sectors = fixtures::sample_sectors();
        sectors.pop();
        let err = Chart::new(sectors).unwrap_err();
        assert!(err.to_string().contains("expected 12 sectors"), "Msg: {}", err);
    }

    #[test]
    fn test_chart_rejects_duplicate_name() {
        let mut sectors = fixtures::sample_sectors();
        sectors[3].name = "命宫".into();
        let err = Chart::new(sectors).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedChart(_)));
    }

    #[test]
    fn test_chart_rejects_non_canonical_name() {
        let mut sectors = fixtures::sample_sectors();
        sectors[5].name = "宮位#5".into();
        assert!(Chart::new(sectors).is_err());
    }

    #[test]
    fn test_host_of_scans_all_categories() {
        let chart = fixtures::sample_chart();
        // Major, minor and adjective placements all resolve.
        assert_eq!(chart.host_of("紫微"), "命宫");
        assert_eq!(chart.host_of("禄存"), "迁移");
        assert_eq!(chart.host_of("天空"), "疾厄");
    }

    #[test]
    fn test_host_of_missing_star_is_sentinel() {
        let chart = fixtures::sample_chart();
        assert_eq!(chart.host_of("不存在"), NOT_FOUND);
    }

    #[test]
    fn test_life_index_follows_name_not_position() {
        let chart = fixtures::sample_chart();
        assert_eq!(chart.name_at(chart.life_index()), LIFE_SECTOR);
    }

    #[test]
    fn test_chart_serde_validates_on_load() {
        let chart = fixtures::sample_chart();
        let json = serde_json::to_string(&chart).unwrap();
        let back: Chart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chart);

        let mut sectors = fixtures::sample_sectors();
        sectors.truncate(3);
        let bad = serde_json::to_string(&sectors).unwrap();
        assert!(serde_json::from_str::<Chart>(&bad).is_err());
    }
}

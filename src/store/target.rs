//! Time targets: the calendar date a timed mode is read at.
use crate::chart::{BirthParameters, Chart};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// The selected target of a timed reading.
///
/// `label` is what the user picked ("2026", "2026-03", "34–43｜官禄"), `date`
/// the calendar date the provider is queried at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTarget {
    pub label: String,
    pub date: NaiveDate,
}

impl TimeTarget {
    /// The birthday (month/day) in `year`; Feb 29 births fall back to Feb 28.
    pub fn year(birth_date: NaiveDate, year: i32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, birth_date.month(), 28))?;
        Some(Self { label: year.to_string(), date })
    }

    /// Mid-month, away from lunar-month boundaries.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, 15)?;
        Some(Self { label: format!("{}-{:02}", year, month), date })
    }

    pub fn date(date: NaiveDate) -> Self {
        Self { label: date.format("%Y-%m-%d").to_string(), date }
    }
}

/// A decade the user can pick, taken from a sector's age range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeOption {
    pub sector_index: usize,
    pub sector: String,
    pub start_age: u32,
    pub end_age: u32,
    pub target: TimeTarget,
}

/// Decades in chart order, represented by the date the person reaches the
/// decade's starting (nominal) age.
pub fn decade_targets(chart: &Chart, birth: &BirthParameters) -> Vec<DecadeOption> {
    chart
        .sectors()
        .iter()
        .filter_map(|sector| {
            let (start_age, end_age) = sector.decade_range?;
            if end_age < start_age {
                return None;
            }
            let offset = Months::new(start_age.saturating_sub(1).checked_mul(12)?);
            let date = birth.birth_date.checked_add_months(offset)?;
            Some(DecadeOption {
                sector_index: sector.index,
                sector: sector.name.clone(),
                start_age,
                end_age,
                target: TimeTarget {
                    label: format!("{}–{}｜{}", start_age, end_age, sector.name),
                    date,
                },
            })
        })
        .collect()
}

/// One target per year of life, from the birth year up to `years_forward` later.
///
/// Stops at the last year the calendar can represent.
pub fn year_targets(birth: &BirthParameters, years_forward: u32) -> Vec<(u32, TimeTarget)> {
    let birth_year = birth.birth_date.year();
    (0..=years_forward)
        .map_while(|age| {
            let year = i32::try_from(age).ok().and_then(|a| birth_year.checked_add(a))?;
            let target = TimeTarget::year(birth.birth_date, year)?;
            Some((age, target))
        })
        .collect()
}

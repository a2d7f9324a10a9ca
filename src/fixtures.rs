//! Hand-built chart and snapshot provider shared by the unit tests.
//!
//! Ring layout (index: sector): 0 夫妻, 1 兄弟, 2 命宫, 3 父母, 4 福德, 5 田宅,
//! 6 官禄, 7 仆役, 8 迁移, 9 疾厄, 10 财帛, 11 子女.

use crate::chart::{
    BirthParameters, Chart, FlowRow, FlowStars, Horoscope, HoroscopeSnapshot, ScopeOverlay, Sector, Sex,
    SnapshotProvider, TransformationStars, NO_TARGET,
};
use crate::graph::Transformation;
use crate::layers::Scope;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const STEM_BRANCHES: [&str; 12] = [
    "戊寅", "己卯", "庚辰", "辛巳", "壬午", "癸未", "甲申", "乙酉", "丙戌", "丁亥", "戊子", "己丑",
];

type Placement = (&'static str, &'static [&'static str], &'static [&'static str], &'static [&'static str]);

const PLACEMENTS: [Placement; 12] = [
    ("夫妻", &["天机"], &["文曲"], &[]),
    ("兄弟", &["太阴"], &[], &[]),
    ("命宫", &["紫微", "天府"], &["文昌", "左辅"], &["天姚"]),
    ("父母", &["天同"], &["地劫"], &[]),
    ("福德", &["天梁"], &["铃星"], &[]),
    ("田宅", &["廉贞"], &["天钺"], &[]),
    ("官禄", &["武曲", "破军"], &["右弼", "天魁"], &[]),
    ("仆役", &["巨门"], &["地空"], &[]),
    ("迁移", &["七杀"], &["禄存", "天马", "擎羊"], &[]),
    ("疾厄", &["贪狼"], &["火星"], &["天空"]),
    ("财帛", &["太阳"], &["陀罗"], &["红鸾"]),
    ("子女", &["天相"], &[], &["天刑"]),
];

const LIFE_RING_INDEX: usize = 2;

fn owned(stars: &[&str]) -> Vec<String> {
    stars.iter().map(|s| s.to_string()).collect()
}

pub fn sample_sectors() -> Vec<Sector> {
    PLACEMENTS
        .iter()
        .enumerate()
        .map(|(index, (name, major, minor, adjective))| {
            // Decades run forward from the life sector, starting at age 4.
            let step = ((index + 12 - LIFE_RING_INDEX) % 12) as u32;
            let start = 4 + 10 * step;
            Sector {
                name: name.to_string(),
                index,
                stem_branch: STEM_BRANCHES[index].to_string(),
                major: owned(major),
                minor: owned(minor),
                adjective: owned(adjective),
                decade_range: Some((start, start + 9)),
            }
        })
        .collect()
}

pub fn sample_chart() -> Chart {
    Chart::new(sample_sectors()).unwrap()
}

pub fn sample_birth() -> BirthParameters {
    BirthParameters {
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        birth_time_slot: 6,
        sex: Sex::Female,
    }
}

pub fn yearly_stars() -> TransformationStars {
    TransformationStars::new("武曲", "破军", "文昌", "太阳")
}

pub fn decadal_stars() -> TransformationStars {
    TransformationStars::new("太阳", "武曲", "天机", "文曲")
}

pub fn monthly_stars() -> TransformationStars {
    TransformationStars::new("天机", "天梁", "紫微", "太阴")
}

pub fn daily_stars() -> TransformationStars {
    TransformationStars::new("天同", "天机", "文昌", "廉贞")
}

/// 流耀 of the yearly scope, one entry per sector in chart order.
pub fn yearly_flow_stars() -> Vec<FlowStars> {
    PLACEMENTS
        .iter()
        .map(|(name, ..)| {
            let stars: &[&str] = match *name {
                "命宫" => &["流昌"],
                "迁移" => &["流禄", "流马"],
                "仆役" => &["流羊"],
                _ => &[],
            };
            FlowStars { sector: name.to_string(), stars: owned(stars) }
        })
        .collect()
}

/// Target of the "year" fixture: the 2026 birthday.
pub fn year_target() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 17).unwrap()
}

/// Target of the "month" fixture: monthly data present, daily data missing.
pub fn month_target() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

/// Target of the "date" fixture: every scope present.
pub fn date_target() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()
}

/// Rows where each sector flies by fixed ring offsets; `None` writes the sentinel.
fn shifted_rows(chart: &Chart, offsets: [Option<usize>; 4]) -> Vec<FlowRow> {
    (0..12)
        .map(|i| {
            Transformation::ALL
                .into_iter()
                .zip(offsets)
                .fold(FlowRow::new(chart.name_at(i)), |row, (kind, offset)| match offset {
                    Some(o) => row.with(kind, chart.name_at(i + o)),
                    None => row.with(kind, NO_TARGET),
                })
        })
        .collect()
}

pub fn natal_rows(chart: &Chart) -> Vec<FlowRow> {
    shifted_rows(chart, [Some(3), None, Some(9), Some(6)])
}

/// 禄 +8, 权 +4, 科 onto itself, 忌 +6: every sector is touched.
pub fn yearly_rows(chart: &Chart) -> Vec<FlowRow> {
    shifted_rows(chart, [Some(8), Some(4), Some(0), Some(6)])
}

pub fn decadal_rows(chart: &Chart) -> Vec<FlowRow> {
    shifted_rows(chart, [Some(2), Some(10), Some(4), Some(3)])
}

pub fn monthly_rows(chart: &Chart) -> Vec<FlowRow> {
    shifted_rows(chart, [Some(1), None, None, Some(5)])
}

pub fn daily_rows(chart: &Chart) -> Vec<FlowRow> {
    shifted_rows(chart, [None, None, Some(11), None])
}

/// Decadal self at 田宅 (ages 34–43), yearly self at 财帛 with 流耀 listed.
pub fn year_horoscope() -> Horoscope {
    Horoscope {
        solar_date: Some("2026-5-17".into()),
        lunar_date: Some("二〇二六年四月初一".into()),
        decadal: Some(ScopeOverlay {
            self_index: 5,
            transformation_stars: Some(decadal_stars()),
            flow_stars: None,
        }),
        yearly: Some(ScopeOverlay {
            self_index: 10,
            transformation_stars: Some(yearly_stars()),
            flow_stars: Some(yearly_flow_stars()),
        }),
        monthly: None,
        daily: None,
    }
}

fn month_horoscope() -> Horoscope {
    Horoscope {
        solar_date: Some("2026-3-15".into()),
        lunar_date: Some("二〇二六年正月廿七".into()),
        monthly: Some(ScopeOverlay { self_index: 0, transformation_stars: Some(monthly_stars()), flow_stars: None }),
        ..year_horoscope()
    }
}

fn date_horoscope() -> Horoscope {
    Horoscope {
        solar_date: Some("2026-3-20".into()),
        lunar_date: Some("二〇二六年二月初二".into()),
        daily: Some(ScopeOverlay { self_index: 7, transformation_stars: Some(daily_stars()), flow_stars: None }),
        ..month_horoscope()
    }
}

pub fn sample_provider() -> SnapshotProvider {
    let chart = sample_chart();

    let mut year_flows = BTreeMap::new();
    year_flows.insert(Scope::Decadal, decadal_rows(&chart));
    year_flows.insert(Scope::Yearly, yearly_rows(&chart));

    let mut month_flows = year_flows.clone();
    month_flows.insert(Scope::Monthly, monthly_rows(&chart));

    let mut date_flows = month_flows.clone();
    date_flows.insert(Scope::Daily, daily_rows(&chart));

    let mut horoscopes = BTreeMap::new();
    horoscopes.insert(year_target(), HoroscopeSnapshot { horoscope: year_horoscope(), flows: year_flows });
    horoscopes.insert(month_target(), HoroscopeSnapshot { horoscope: month_horoscope(), flows: month_flows });
    horoscopes.insert(date_target(), HoroscopeSnapshot { horoscope: date_horoscope(), flows: date_flows });

    SnapshotProvider {
        birth: sample_birth(),
        natal_flows: natal_rows(&chart),
        chart,
        horoscopes,
    }
}

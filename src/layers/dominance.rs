//! Decides which scope is authoritative for a mode and builds the
//! natal-to-dominant overlay narrative.

use super::scope::{Mode, Scope};
use crate::analysis::topology;
use crate::chart::{Chart, Horoscope};
use crate::graph::FlowGraph;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Scope selection for one mode.
///
/// At most one of decadal / yearly is dominant; monthly and daily only ever
/// appear as timing references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerPlan {
    pub dominant: Option<Scope>,
    pub background: Option<Scope>,
    pub timing: &'static [Scope],
}

impl LayerPlan {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Life => Self { dominant: None, background: None, timing: &[] },
            Mode::Decadal => Self { dominant: Some(Scope::Decadal), background: None, timing: &[] },
            Mode::Year => Self {
                dominant: Some(Scope::Yearly),
                background: Some(Scope::Decadal),
                timing: &[],
            },
            Mode::Month => Self {
                dominant: Some(Scope::Yearly),
                background: Some(Scope::Decadal),
                timing: &[Scope::Monthly],
            },
            Mode::Date => Self {
                dominant: Some(Scope::Yearly),
                background: Some(Scope::Decadal),
                timing: &[Scope::Monthly, Scope::Daily],
            },
        }
    }

    /// Label of the dominant layer ("大限" / "流年").
    pub fn dominant_label(&self) -> Option<&'static str> {
        self.dominant.map(Scope::layer_name)
    }

    pub fn is_timing(&self, scope: Scope) -> bool {
        self.timing.contains(&scope)
    }
}

/// How the dominant layer re-centres the natal chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverlayNarrative {
    /// The mode names no point in time, so nothing overlays the natal chart.
    NotApplicable,
    /// The dominant scope has no provider data.
    Unavailable { scope: Scope },
    Overlay {
        scope: Scope,
        /// Natal sector acting as "self" for the dominant scope.
        self_sector: String,
        window: Vec<String>,
        /// The window united with every sector the scope's flights touch.
        focus_sectors: Vec<String>,
    },
}

impl OverlayNarrative {
    /// Builds the overlay for the plan's dominant scope.
    ///
    /// `graph` is the dominant scope's flow graph, or `None` when the provider
    /// had no flight rows for it. A self index outside the chart makes the
    /// scope unavailable.
    pub fn resolve(
        plan: &LayerPlan,
        chart: &Chart,
        horoscope: Option<&Horoscope>,
        graph: Option<&FlowGraph>,
    ) -> Self {
        let Some(scope) = plan.dominant else {
            return Self::NotApplicable;
        };
        let (Some(overlay), Some(graph)) = (horoscope.and_then(|h| h.scope(scope)), graph) else {
            return Self::Unavailable { scope };
        };
        let Some(self_sector) = chart.sector(overlay.self_index) else {
            warn!(%scope, self_index = overlay.self_index, "overlay self index outside the chart");
            return Self::Unavailable { scope };
        };

        let window = topology::window_names(chart, overlay.self_index);
        let mut focus_sectors = window.clone();
        for name in graph.sectors() {
            if !focus_sectors.contains(&name) {
                focus_sectors.push(name);
            }
        }

        Self::Overlay {
            scope,
            self_sector: self_sector.name.clone(),
            window,
            focus_sectors,
        }
    }
}

impl fmt::Display for OverlayNarrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable => write!(f, "（此模式不指定時間點；無層級重疊）"),
            Self::Unavailable { scope } => write!(f, "（{}：無資料；無法建立層級重疊）", scope.layer_name()),
            Self::Overlay { scope, self_sector, window, focus_sectors } => {
                writeln!(f, "【本命 → {}】", scope.layer_name())?;
                writeln!(f, "此層命宫落點：{}", self_sector)?;
                writeln!(f, "命宫三方四正：{}", window.join("、"))?;
                write!(f, "此層四化/焦點宮位（合併）：{}", focus_sectors.join("、"))
            }
        }
    }
}

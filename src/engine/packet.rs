//! The structured output of one analysis run.
use crate::analysis::CausalReading;
use crate::chart::{Chart, FlowRow, FlowStars, TransformationStars};
use crate::graph::{CausalEdge, Transformation};
use crate::layers::{Mode, OverlayNarrative, Scope};
use crate::leverage::AdjustabilityPacket;
use crate::store::{Profile, TimeTarget};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tells downstream readers how to resolve "this year", "today" and the like.
pub const TIME_ANCHOR_NOTE: &str = "使用者若說「今年/this year」→ 指本次選定的【流年】；說「這個大限/this 大限」→ 指本次選定的【大限】；說「本月」→ 指選定的【流月】；說「今天」→ 指選定的【流日】。除非使用者明確說真實日曆當下（例如：2026/now/current year），否則不得混用。";

/// Label used for the target of a life-mode reading.
pub const LIFE_TARGET: &str = "life";

/// Where one of a scope's transformation stars sits in the natal chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarHost {
    pub kind: Transformation,
    pub star: String,
    /// Host sector, or `（未找到）`.
    pub sector: String,
}

/// Everything computed for one layer whose scope had provider data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerReport {
    pub label: String,
    pub scope: Scope,
    /// Natal sector acting as "self" for this scope.
    pub self_sector: String,
    pub window: Vec<String>,
    pub transformation_stars: Option<TransformationStars>,
    pub star_hosts: Vec<StarHost>,
    /// The scope's 流耀 by sector, when the provider lists them.
    pub flow_stars: Option<Vec<FlowStars>>,
    /// `None` when the layer is not pattern-checked (timing references).
    pub patterns: Option<Vec<String>>,
    pub flows: Vec<FlowRow>,
    pub edges: Vec<CausalEdge>,
    /// `None` for a timing reference without any flights.
    pub causal: Option<CausalReading>,
    pub self_transformations: BTreeMap<String, Vec<Transformation>>,
    pub incoming_ranking: Vec<(String, usize)>,
}

/// A requested layer: computed, or explicitly unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LayerReading {
    Available(LayerReport),
    Unavailable { label: String, scope: Scope },
}

impl LayerReading {
    pub fn report(&self) -> Option<&LayerReport> {
        match self {
            Self::Available(report) => Some(report),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Available(report) => &report.label,
            Self::Unavailable { label, .. } => label,
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Self::Available(report) => report.scope,
            Self::Unavailable { scope, .. } => *scope,
        }
    }

    pub fn causal(&self) -> Option<&CausalReading> {
        self.report().and_then(|r| r.causal.as_ref())
    }
}

/// The selected target spelled out for natural-language consumers.
///
/// The wall-clock date is left out so identical requests serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeAnchor {
    pub selected_mode: Mode,
    pub selected_target_type: String,
    pub selected_target: String,
    pub selected_target_solar_date: Option<String>,
    pub selected_target_lunar_date: Option<String>,
    pub dominant_layer: Option<String>,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPacket {
    pub profile: Profile,
    pub mode: Mode,
    pub target: Option<TimeTarget>,
    pub focus: String,
    pub time_anchor: TimeAnchor,
    /// The natal chart, i.e. the star table of every sector.
    pub chart: Chart,
    pub natal: LayerReading,
    pub background: Option<LayerReading>,
    pub dominant: Option<LayerReading>,
    /// Monthly then daily, as the mode requests them.
    pub timing: Vec<LayerReading>,
    pub overlay: OverlayNarrative,
    pub adjustability: AdjustabilityPacket,
}

impl AnalysisPacket {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Every layer in report order: natal, background, dominant, timing.
    pub fn layers(&self) -> impl Iterator<Item = &LayerReading> {
        std::iter::once(&self.natal)
            .chain(self.background.as_ref())
            .chain(self.dominant.as_ref())
            .chain(self.timing.iter())
    }

    pub fn layer(&self, scope: Scope) -> Option<&LayerReading> {
        self.layers().find(|l| l.scope() == scope)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseLanguage {
    #[default]
    Zh,
    En,
}

/// What the chat collaborator receives: authoritative context and a reply language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    pub context: String,
    pub language: ResponseLanguage,
}

impl ChatContext {
    pub fn new(packet: &AnalysisPacket, language: ResponseLanguage) -> Self {
        Self { context: crate::display::render_packet(packet), language }
    }
}

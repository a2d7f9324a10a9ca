//! Builds the decision packet that separates fixed structure from levers.
use super::guidance::GuidanceTable;
use crate::analysis::causal::CausalReading;
use crate::layers::Mode;
use serde::{Deserialize, Serialize};

/// Structural traits are a long-term base, not something short-term action fixes.
pub const FIXED_BASE_TEXT: &str = "本命結構（性格底盤/能力結構/人生主軸）是長期基底；建議用理解與設計去順勢，而不是用短期操作去『改命』。";

pub const LEVERS_TEXT: &str = "優先從因果鏈的『起因宮』下手，因為它是事件/壓力/資源的發動端；先調起因端，結果端（承受宮）自然更容易改善。";

/// Month and day scopes inform timing only.
pub const RHYTHM_TEXT: &str = "流月/流日用於安排節奏、風險控管與資源分配；不把應期當成命運改造的力量，也不覆蓋主導層的結構判讀。";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeverageEntry {
    pub sector: String,
    pub guidance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rhythm {
    pub mode: Mode,
    pub dominant_label: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustabilityPacket {
    pub fixed_base: String,
    pub focus: String,
    pub levers_note: String,
    pub levers: Vec<LeverageEntry>,
    pub rhythm: Rhythm,
}

/// Turns the dominant layer's causes into levers.
///
/// With no dominant layer (or a dominant layer without data) the lever list is
/// empty; the fixed base and rhythm note are always present.
pub fn synthesize(
    mode: Mode,
    dominant_label: Option<&str>,
    dominant: Option<&CausalReading>,
    focus: &str,
    table: &GuidanceTable,
) -> AdjustabilityPacket {
    let levers = dominant
        .map(CausalReading::causes)
        .unwrap_or_default()
        .iter()
        .map(|sector| LeverageEntry {
            sector: sector.clone(),
            guidance: table.lookup(sector).to_string(),
        })
        .collect();

    AdjustabilityPacket {
        fixed_base: FIXED_BASE_TEXT.to_string(),
        focus: focus.to_string(),
        levers_note: LEVERS_TEXT.to_string(),
        levers,
        rhythm: Rhythm {
            mode,
            dominant_label: dominant_label.map(str::to_string),
            text: RHYTHM_TEXT.to_string(),
        },
    }
}

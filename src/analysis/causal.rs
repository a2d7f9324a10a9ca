//! Causal summarization of a focus sector within one scope's flow graph.

use crate::graph::{CausalEdge, FlowGraph};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// Who flies into the focus sector and where the focus sector flies.
///
/// `causes` are the distinct sources of `incoming`, `effects` the distinct
/// targets of `outgoing`, both in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalSummary {
    pub focus: String,
    pub incoming: Vec<CausalEdge>,
    pub outgoing: Vec<CausalEdge>,
    pub causes: Vec<String>,
    pub effects: Vec<String>,
}

/// The causal reading of one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CausalReading {
    Linked(CausalSummary),
    /// The layer produced no edges at all.
    NoData { focus: String },
}

impl CausalReading {
    pub fn summary(&self) -> Option<&CausalSummary> {
        match self {
            Self::Linked(summary) => Some(summary),
            Self::NoData { .. } => None,
        }
    }

    pub fn focus(&self) -> &str {
        match self {
            Self::Linked(summary) => &summary.focus,
            Self::NoData { focus } => focus,
        }
    }

    pub fn causes(&self) -> &[String] {
        match self {
            Self::Linked(summary) => &summary.causes,
            Self::NoData { .. } => &[],
        }
    }
}

/// Summarizes the flights around `focus`.
pub fn analyze(graph: &FlowGraph, focus: &str) -> CausalReading {
    if graph.is_empty() {
        return CausalReading::NoData { focus: focus.to_string() };
    }
    CausalReading::Linked(summarize(graph, focus))
}

fn summarize(graph: &FlowGraph, focus: &str) -> CausalSummary {
    let incoming = graph.edges_at(focus, Direction::Incoming);
    let outgoing = graph.edges_at(focus, Direction::Outgoing);
    let causes = dedup(incoming.iter().map(|e| e.from.as_str()));
    let effects = dedup(outgoing.iter().map(|e| e.to.as_str()));

    CausalSummary {
        focus: focus.to_string(),
        incoming,
        outgoing,
        causes,
        effects,
    }
}

fn dedup<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

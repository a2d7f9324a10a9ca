//! Causal and pattern inference over Ziwei-Doushu charts.
//!
//! The placement algorithm lives behind [`chart::ChartProvider`]; this crate
//! turns a provider's placements into pattern labels, transformation-flow
//! graphs, causal summaries and a decision-support packet.

// --- Chart data and the provider boundary ---
pub mod chart;
pub mod store;

// --- Inference ---
pub mod analysis;
pub mod graph;
pub mod layers;
pub mod leverage;
pub mod patterns;

// --- Orchestration and output ---
pub mod config;
pub mod display;
pub mod engine;
pub mod error;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::EngineConfig;
pub use engine::{AnalysisPacket, AnalysisRequest, Analyzer, ChatContext, ResponseLanguage};
pub use error::{AnalysisError, ConfigError};

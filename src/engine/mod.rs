//! Runs the analysis end to end and defines the packet it produces.
pub mod analyzer;
pub mod packet;

pub use analyzer::{AnalysisRequest, Analyzer, BACKGROUND_LABEL, NATAL_LABEL};
pub use packet::{
    AnalysisPacket, ChatContext, LayerReading, LayerReport, ResponseLanguage, StarHost, TimeAnchor,
};

//! Sector-ring arithmetic and causal summarization over flow graphs.
pub mod causal;
pub mod topology;

pub use causal::{CausalReading, CausalSummary};

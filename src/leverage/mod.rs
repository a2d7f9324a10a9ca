//! Leverage synthesis: which causes are actionable, and how.
pub mod guidance;
pub mod synthesizer;

pub use guidance::{GuidanceTable, PLACEHOLDER_GUIDANCE};
pub use synthesizer::{synthesize, AdjustabilityPacket, LeverageEntry, Rhythm};

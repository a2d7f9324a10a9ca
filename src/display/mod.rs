//! Human-readable and chat-context renderings of an analysis packet.
pub mod report;

pub use report::{
    render_causal, render_flow_stars, render_flows, render_human, render_natal_stars, render_packet,
    render_patterns,
};

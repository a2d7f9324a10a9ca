//! Time layers and the dominance rules between them.
pub mod dominance;
pub mod scope;

pub use dominance::{LayerPlan, OverlayNarrative};
pub use scope::{Mode, Scope};

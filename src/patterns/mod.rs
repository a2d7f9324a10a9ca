//! Rule-based detection of classical chart patterns.
//!
//! A fixed table of independent rules is evaluated against the stars visible
//! from a layer's reference sector; see [`rules::RULES`] for the reach of each
//! rule.

pub use self::context::PatternContext;
pub use self::detector::{PatternDetector, LABEL_SEPARATOR};
pub use self::rules::{PatternRule, RuleReach, RULES};

mod context;
mod detector;
pub mod rules;

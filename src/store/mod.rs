//! Caller-side records: persisted profiles and selected time targets.
pub mod profile;
pub mod target;

pub use profile::Profile;
pub use target::{decade_targets, year_targets, DecadeOption, TimeTarget};

//! Chart data and the Chart Provider boundary.
pub mod provider;
pub mod sector;
pub mod snapshot;

pub use provider::{
    BirthParameters, ChartProvider, FlowRow, FlowStars, Horoscope, ScopeOverlay, ScopeSelector, Sex,
    TransformationStars, NO_TARGET,
};
pub use sector::{Chart, Sector, StarCategory, CANONICAL_SECTORS, LIFE_SECTOR, NOT_FOUND, SECTOR_COUNT};
pub use snapshot::{HoroscopeSnapshot, SnapshotProvider};

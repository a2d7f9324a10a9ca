//! The derived view a pattern rule evaluates against.
use crate::chart::{Chart, Sector, StarCategory, TransformationStars};
use std::collections::BTreeSet;

/// Star sets visible in a reference sector's trine window, plus chart-wide
/// lookups for the few rules that need them.
#[derive(Debug, Clone)]
pub struct PatternContext<'a> {
    chart: &'a Chart,
    window: &'a [String],
    major: BTreeSet<&'a str>,
    minor: BTreeSet<&'a str>,
    adjective: BTreeSet<&'a str>,
    transformations: Option<&'a TransformationStars>,
}

impl<'a> PatternContext<'a> {
    /// `window` is the reference sector followed by its opposite and trine
    /// partners, as sector names.
    pub fn new(
        chart: &'a Chart,
        window: &'a [String],
        transformations: Option<&'a TransformationStars>,
    ) -> Self {
        let collect = move |category: StarCategory| -> BTreeSet<&'a str> {
            window
                .iter()
                .filter_map(|name| chart.sector_by_name(name))
                .flat_map(|s| s.stars(category).iter().map(String::as_str))
                .collect()
        };

        Self {
            chart,
            window,
            major: collect(StarCategory::Major),
            minor: collect(StarCategory::Minor),
            adjective: collect(StarCategory::Adjective),
            transformations,
        }
    }

    pub fn chart(&self) -> &'a Chart {
        self.chart
    }

    /// The sector the window is centred on.
    pub fn reference_sector(&self) -> Option<&'a Sector> {
        self.window.first().and_then(|n| self.chart.sector_by_name(n))
    }

    pub fn transformations(&self) -> Option<&'a TransformationStars> {
        self.transformations
    }

    pub fn has_major(&self, star: &str) -> bool {
        self.major.contains(star)
    }

    pub fn has_minor(&self, star: &str) -> bool {
        self.minor.contains(star)
    }

    pub fn has_adjective(&self, star: &str) -> bool {
        self.adjective.contains(star)
    }

    /// Present as a major or minor star; auxiliary stars are looked up in both.
    pub fn has_star(&self, star: &str) -> bool {
        self.has_minor(star) || self.has_major(star)
    }

    /// Present in any of the three categories.
    pub fn has_anywhere(&self, star: &str) -> bool {
        self.has_star(star) || self.has_adjective(star)
    }

    pub fn in_window(&self, sector: &str) -> bool {
        self.window.iter().any(|n| n == sector)
    }

    /// Chart-wide host sector of a star, or the not-found sentinel.
    pub fn host_of(&self, star: &str) -> &'a str {
        self.chart.host_of(star)
    }
}

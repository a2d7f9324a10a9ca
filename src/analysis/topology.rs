use crate::chart::{Chart, SECTOR_COUNT};

#[inline]
pub fn opposite(i: usize) -> usize {
    (i + 6) % SECTOR_COUNT
}

/// Returns `[self, opposite, trineA, trineB]` for a sector index.
///
/// The window is the classical "three directions, four positions": the sector,
/// the one facing it across the ring, and the two 120° partners.
pub fn trine_window(i: usize) -> [usize; 4] {
    let i = i % SECTOR_COUNT;
    [i, opposite(i), (i + 4) % SECTOR_COUNT, (i + 8) % SECTOR_COUNT]
}

/// The trine window of `index`, resolved to chart sector names.
pub fn window_names(chart: &Chart, index: usize) -> Vec<String> {
    trine_window(index)
        .iter()
        .map(|&j| chart.name_at(j).to_string())
        .collect()
}

//! Rules that scan every sector of the chart instead of the trine window.
//!
//! The desire star (贪狼) meeting the fire or bell star is read wherever it
//! happens, so these two rules ignore the window on purpose.

use crate::chart::{Sector, StarCategory};
use crate::patterns::context::PatternContext;

fn shares_with_desire_star<'a>(ctx: &PatternContext<'a>, star: &str) -> Option<&'a Sector> {
    ctx.chart().sectors().iter().find(|s| {
        s.has(StarCategory::Major, "贪狼")
            && (s.has(StarCategory::Minor, star) || s.has(StarCategory::Adjective, star))
    })
}

pub(crate) fn huo_tan(ctx: &PatternContext<'_>) -> Option<String> {
    shares_with_desire_star(ctx, "火星").map(|s| format!("火貪（貪狼同宮遇火星：{}）", s.name))
}

pub(crate) fn ling_tan(ctx: &PatternContext<'_>) -> Option<String> {
    shares_with_desire_star(ctx, "铃星").map(|s| format!("鈴貪（貪狼同宮遇鈴星：{}）", s.name))
}

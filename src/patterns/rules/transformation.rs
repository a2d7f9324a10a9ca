//! Rules that need the scope's transformation-star tuple.
//!
//! Each rule resolves the host sector of a transformation star chart-wide; an
//! unresolvable star yields the not-found sentinel, which never matches a
//! sector name, so the rule simply does not fire.

use crate::graph::Transformation;
use crate::patterns::context::PatternContext;

/// Sectors where a 忌 landing is worth flagging.
const JI_ALERT_SECTORS: [&str; 4] = ["命宫", "官禄", "财帛", "迁移"];

/// The star of `kind` and the sector hosting it.
fn landing<'a>(ctx: &PatternContext<'a>, kind: Transformation) -> Option<(&'a str, &'a str)> {
    let star = ctx.transformations()?.star(kind);
    Some((star, ctx.host_of(star)))
}

/// 禄, 权 and 科 all land inside the window.
pub(crate) fn sanqi_jiahui(ctx: &PatternContext<'_>) -> Option<String> {
    let (l, pl) = landing(ctx, Transformation::Lu)?;
    let (q, pq) = landing(ctx, Transformation::Quan)?;
    let (k, pk) = landing(ctx, Transformation::Ke)?;
    [pl, pq, pk].iter().all(|p| ctx.in_window(p)).then(|| {
        format!("三奇嘉會（禄={}落{}；权={}落{}；科={}落{}）", l, pl, q, pq, k, pk)
    })
}

pub(crate) fn huaji_alert(ctx: &PatternContext<'_>) -> Option<String> {
    let (j, pj) = landing(ctx, Transformation::Ji)?;
    JI_ALERT_SECTORS
        .contains(&pj)
        .then(|| format!("化忌重點（忌={}落{}）", j, pj))
}

/// 禄存 in the window meets a 禄 landing in the window.
pub(crate) fn shuang_lu(ctx: &PatternContext<'_>) -> Option<String> {
    let (l, pl) = landing(ctx, Transformation::Lu)?;
    (ctx.has_star("禄存") && ctx.in_window(pl))
        .then(|| format!("雙祿（祿存會化祿：化禄={}落{}）", l, pl))
}

pub(crate) fn hualu_rucai(ctx: &PatternContext<'_>) -> Option<String> {
    let (l, pl) = landing(ctx, Transformation::Lu)?;
    (pl == "财帛").then(|| format!("化祿入財（禄={}落财帛）", l))
}

pub(crate) fn huaquan_ruguan(ctx: &PatternContext<'_>) -> Option<String> {
    let (q, pq) = landing(ctx, Transformation::Quan)?;
    (pq == "官禄").then(|| format!("化權入官（权={}落官禄）", q))
}

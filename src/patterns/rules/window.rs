//! Rules over the star sets of the trine window (or its reference sector).
//!
//! Auxiliary stars are matched in both the minor and major lists because
//! providers disagree on where they file them.

use crate::chart::StarCategory;
use crate::patterns::context::PatternContext;

/// Emperor stars sharing the reference sector.
pub(crate) fn zifu_tonggong(ctx: &PatternContext<'_>) -> Option<String> {
    let sector = ctx.reference_sector()?;
    (sector.has(StarCategory::Major, "紫微") && sector.has(StarCategory::Major, "天府"))
        .then(|| "紫府同宮（紫微天府同坐命宮）".to_string())
}

pub(crate) fn ji_yue_tong_liang(ctx: &PatternContext<'_>) -> Option<String> {
    ["天机", "太阴", "天同", "天梁"]
        .iter()
        .all(|s| ctx.has_major(s))
        .then(|| "機月同梁（四星齊會命三方四正）".to_string())
}

pub(crate) fn wenxing_gongming(ctx: &PatternContext<'_>) -> Option<String> {
    (ctx.has_star("文昌") || ctx.has_star("文曲"))
        .then(|| "文星拱命（昌/曲會命三方四正）".to_string())
}

/// Reports whether both or just one of a paired set of auxiliaries is present.
fn pair(ctx: &PatternContext<'_>, a: &str, b: &str, both: &str, one: &str) -> Option<String> {
    match (ctx.has_star(a), ctx.has_star(b)) {
        (true, true) => Some(both.to_string()),
        (true, false) | (false, true) => Some(one.to_string()),
        (false, false) => None,
    }
}

pub(crate) fn zuoyou_gongming(ctx: &PatternContext<'_>) -> Option<String> {
    pair(ctx, "左辅", "右弼", "左右拱命（左輔右弼齊會）", "左右拱命（左/右之一會命）")
}

pub(crate) fn kuiyue_gongming(ctx: &PatternContext<'_>) -> Option<String> {
    pair(ctx, "天魁", "天钺", "魁鉞拱命（天魁天鉞齊會）", "魁鉞拱命（魁/鉞之一會命）")
}

pub(crate) fn luma_jiaochi(ctx: &PatternContext<'_>) -> Option<String> {
    (ctx.has_star("禄存") && ctx.has_star("天马"))
        .then(|| "祿馬交馳（祿存+天馬會命三方四正）".to_string())
}

pub(crate) fn riyue_tongzhao(ctx: &PatternContext<'_>) -> Option<String> {
    (ctx.has_major("太阳") && ctx.has_major("太阴"))
        .then(|| "日月同照（太陽太陰同會命三方四正）".to_string())
}

pub(crate) fn ziwei_rujv(ctx: &PatternContext<'_>) -> Option<String> {
    ctx.has_major("紫微").then(|| "紫微入局（紫微會命三方四正）".to_string())
}

pub(crate) fn tianfu_rujv(ctx: &PatternContext<'_>) -> Option<String> {
    ctx.has_major("天府").then(|| "天府入局（天府會命三方四正）".to_string())
}

pub(crate) fn sha_po_lang(ctx: &PatternContext<'_>) -> Option<String> {
    let present: Vec<&str> = ["七杀", "破军", "贪狼"]
        .into_iter()
        .filter(|s| ctx.has_major(s))
        .collect();
    match present.len() {
        0 => None,
        1 => Some(format!("殺系入局（{}會命三方四正）", present[0])),
        _ => Some(format!("殺破狼（{}會命三方四正）", present.join("、"))),
    }
}

pub(crate) fn changqu_qihui(ctx: &PatternContext<'_>) -> Option<String> {
    (ctx.has_star("文昌") && ctx.has_star("文曲"))
        .then(|| "昌曲齊會（文昌文曲同會）".to_string())
}

pub(crate) fn zuoyou_kuiyue(ctx: &PatternContext<'_>) -> Option<String> {
    let zuoyou = ctx.has_star("左辅") && ctx.has_star("右弼");
    let kuiyue = ctx.has_star("天魁") || ctx.has_star("天钺");
    (zuoyou && kuiyue).then(|| "左右魁鉞（左右+魁/鉞加會）".to_string())
}

pub(crate) fn kong_jie(ctx: &PatternContext<'_>) -> Option<String> {
    let kong = ctx.has_minor("地空") || ctx.has_adjective("天空");
    let jie = ctx.has_minor("地劫");
    match (kong, jie) {
        (true, true) => Some("空劫同會（地空/天空 + 地劫）".to_string()),
        (true, false) => Some("見空（地空/天空會命三方四正）".to_string()),
        (false, true) => Some("見劫（地劫會命三方四正）".to_string()),
        (false, false) => None,
    }
}

pub(crate) fn sha_yao(ctx: &PatternContext<'_>) -> Option<String> {
    let present: Vec<&str> = ["擎羊", "陀罗", "火星", "铃星"]
        .into_iter()
        .filter(|s| ctx.has_anywhere(s))
        .collect();
    (present.len() >= 2).then(|| format!("煞曜夾/會（{}）", present.join("、")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::topology;
    use crate::chart::Chart;
    use crate::fixtures;

    fn eval(chart: &Chart, index: usize, rule: fn(&PatternContext<'_>) -> Option<String>) -> Option<String> {
        let window = topology::window_names(chart, index);
        let ctx = PatternContext::new(chart, &window, None);
        rule(&ctx)
    }

    #[test]
    fn test_zifu_on_life_sector() {
        let chart = fixtures::sample_chart();
        assert_eq!(
            eval(&chart, chart.life_index(), zifu_tonggong).as_deref(),
            Some("紫府同宮（紫微天府同坐命宮）")
        );
    }

    #[test]
    fn test_zifu_needs_both_in_reference_sector() {
        // The 财帛 window contains 命宫 but 财帛 itself holds neither star.
        let chart = fixtures::sample_chart();
        assert_eq!(eval(&chart, 10, zifu_tonggong), None);
        assert!(eval(&chart, 10, ziwei_rujv).is_some());
    }

    #[test]
    fn test_pairs_distinguish_one_from_both() {
        let chart = fixtures::sample_chart();
        let life = chart.life_index();
        assert_eq!(eval(&chart, life, zuoyou_gongming).as_deref(), Some("左右拱命（左輔右弼齊會）"));
        assert_eq!(eval(&chart, life, kuiyue_gongming).as_deref(), Some("魁鉞拱命（魁/鉞之一會命）"));
    }

    #[test]
    fn test_sha_po_lang_lists_members_in_fixed_order() {
        let chart = fixtures::sample_chart();
        assert_eq!(
            eval(&chart, chart.life_index(), sha_po_lang).as_deref(),
            Some("殺破狼（七杀、破军會命三方四正）")
        );
    }

    #[test]
    fn test_sha_yao_counts_all_categories() {
        let chart = fixtures::sample_chart();
        assert_eq!(eval(&chart, chart.life_index(), sha_yao).as_deref(), Some("煞曜夾/會（擎羊、陀罗）"));
    }

    #[test]
    fn test_kong_jie_variants() {
        let chart = fixtures::sample_chart();
        // 疾厄 window: 疾厄, 父母, 兄弟, 田宅 -> 天空 (adjective) and 地劫.
        assert_eq!(eval(&chart, 9, kong_jie).as_deref(), Some("空劫同會（地空/天空 + 地劫）"));
        assert_eq!(eval(&chart, chart.life_index(), kong_jie), None);
    }

    /// The sample chart with extra stars pushed into the given ring slots.
    fn chart_with(extra: &[(usize, StarCategory, &str)]) -> Chart {
        let mut sectors = fixtures::sample_sectors();
        for &(index, category, star) in extra {
            let list = match category {
                StarCategory::Major => &mut sectors[index].major,
                StarCategory::Minor => &mut sectors[index].minor,
                StarCategory::Adjective => &mut sectors[index].adjective,
            };
            list.push(star.to_string());
        }
        Chart::new(sectors).unwrap()
    }

    #[test]
    fn test_ji_yue_tong_liang_absent_from_life_window() {
        let chart = fixtures::sample_chart();
        assert_eq!(eval(&chart, chart.life_index(), ji_yue_tong_liang), None);
    }

    #[test]
    fn test_ji_yue_tong_liang_fires_with_all_four() {
        // 夫妻 window: 夫妻 (天机), 官禄, 福德 (天梁), 迁移.
        let chart = chart_with(&[(8, StarCategory::Major, "太阴"), (8, StarCategory::Major, "天同")]);
        assert_eq!(eval(&chart, 0, ji_yue_tong_liang).as_deref(), Some("機月同梁（四星齊會命三方四正）"));

        let three = chart_with(&[(8, StarCategory::Major, "太阴")]);
        assert_eq!(eval(&three, 0, ji_yue_tong_liang), None);
    }

    #[test]
    fn test_riyue_tongzhao_needs_both_as_majors() {
        let chart = fixtures::sample_chart();
        // 太阳 sits in 财帛 inside the life window, 太阴 in 兄弟 outside it.
        assert_eq!(eval(&chart, chart.life_index(), riyue_tongzhao), None);

        let joined = chart_with(&[(8, StarCategory::Major, "太阴")]);
        assert_eq!(
            eval(&joined, joined.life_index(), riyue_tongzhao).as_deref(),
            Some("日月同照（太陽太陰同會命三方四正）")
        );

        let as_minor = chart_with(&[(8, StarCategory::Minor, "太阴")]);
        assert_eq!(eval(&as_minor, as_minor.life_index(), riyue_tongzhao), None);
    }

    #[test]
    fn test_changqu_qihui_fires_with_both() {
        let chart = fixtures::sample_chart();
        assert_eq!(eval(&chart, chart.life_index(), changqu_qihui), None);

        let joined = chart_with(&[(6, StarCategory::Minor, "文曲")]);
        assert_eq!(
            eval(&joined, joined.life_index(), changqu_qihui).as_deref(),
            Some("昌曲齊會（文昌文曲同會）")
        );
    }
}

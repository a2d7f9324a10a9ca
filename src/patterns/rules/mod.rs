//! The classical pattern rule table.
//!
//! Rules are independent: each one inspects a [`PatternContext`] and returns at
//! most one label. The detector runs every entry in table order.
mod chart_wide;
mod transformation;
mod window;

use super::context::PatternContext;

/// Which part of the chart a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleReach {
    /// Only the reference sector itself.
    ReferenceSector,
    /// The reference sector's trine window.
    TrineWindow,
    /// The trine window plus chart-wide host lookups of transformation stars.
    TransformationHosts,
    /// Every sector of the chart, regardless of the window.
    WholeChart,
}

pub type RuleFn = fn(&PatternContext<'_>) -> Option<String>;

#[derive(Clone, Copy)]
pub struct PatternRule {
    pub id: &'static str,
    pub reach: RuleReach,
    /// Disabled when the layer has no transformation-star tuple.
    pub needs_transformations: bool,
    pub evaluate: RuleFn,
}

const fn rule(id: &'static str, reach: RuleReach, evaluate: RuleFn) -> PatternRule {
    PatternRule { id, reach, needs_transformations: false, evaluate }
}

const fn transformation_rule(id: &'static str, evaluate: RuleFn) -> PatternRule {
    PatternRule {
        id,
        reach: RuleReach::TransformationHosts,
        needs_transformations: true,
        evaluate,
    }
}

pub static RULES: &[PatternRule] = &[
    transformation_rule("sanqi_jiahui", transformation::sanqi_jiahui),
    rule("zifu_tonggong", RuleReach::ReferenceSector, window::zifu_tonggong),
    rule("ji_yue_tong_liang", RuleReach::TrineWindow, window::ji_yue_tong_liang),
    rule("wenxing_gongming", RuleReach::TrineWindow, window::wenxing_gongming),
    rule("zuoyou_gongming", RuleReach::TrineWindow, window::zuoyou_gongming),
    rule("kuiyue_gongming", RuleReach::TrineWindow, window::kuiyue_gongming),
    rule("luma_jiaochi", RuleReach::TrineWindow, window::luma_jiaochi),
    rule("huo_tan", RuleReach::WholeChart, chart_wide::huo_tan),
    rule("ling_tan", RuleReach::WholeChart, chart_wide::ling_tan),
    transformation_rule("huaji_alert", transformation::huaji_alert),
    transformation_rule("shuang_lu", transformation::shuang_lu),
    rule("riyue_tongzhao", RuleReach::TrineWindow, window::riyue_tongzhao),
    rule("ziwei_rujv", RuleReach::TrineWindow, window::ziwei_rujv),
    rule("tianfu_rujv", RuleReach::TrineWindow, window::tianfu_rujv),
    rule("sha_po_lang", RuleReach::TrineWindow, window::sha_po_lang),
    rule("changqu_qihui", RuleReach::TrineWindow, window::changqu_qihui),
    rule("zuoyou_kuiyue", RuleReach::TrineWindow, window::zuoyou_kuiyue),
    rule("kong_jie", RuleReach::TrineWindow, window::kong_jie),
    rule("sha_yao", RuleReach::TrineWindow, window::sha_yao),
    transformation_rule("hualu_rucai", transformation::hualu_rucai),
    transformation_rule("huaquan_ruguan", transformation::huaquan_ruguan),
];

pub fn find(id: &str) -> Option<&'static PatternRule> {
    RULES.iter().find(|r| r.id == id)
}

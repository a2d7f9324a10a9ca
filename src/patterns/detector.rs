//! The detector that runs the pattern rule table for one layer.
use super::context::PatternContext;
use super::rules::{PatternRule, RULES};
use crate::chart::{Chart, TransformationStars};
use tracing::debug;

/// Separator between the layer label and a pattern label.
pub const LABEL_SEPARATOR: &str = "｜";

/// Evaluates the rule table against a chart.
///
/// Every rule runs independently; a rule that needs the transformation-star
/// tuple is skipped when the layer has none, without affecting the others.
pub struct PatternDetector<'a> {
    chart: &'a Chart,
    rules: &'a [PatternRule],
}

impl<'a> PatternDetector<'a> {
    /// Creates a detector over the built-in rule table.
    pub fn new(chart: &'a Chart) -> Self {
        Self { chart, rules: RULES }
    }

    pub fn with_rules(chart: &'a Chart, rules: &'a [PatternRule]) -> Self {
        Self { chart, rules }
    }

    /// Returns the matched labels, prefixed with `layer_label`, deduplicated
    /// in table order.
    pub fn detect(
        &self,
        layer_label: &str,
        window: &[String],
        transformations: Option<&TransformationStars>,
    ) -> Vec<String> {
        let ctx = PatternContext::new(self.chart, window, transformations);
        let mut labels: Vec<String> = Vec::new();
        let mut skipped = 0usize;

        for rule in self.rules {
            if rule.needs_transformations && transformations.is_none() {
                skipped += 1;
                continue;
            }
            if let Some(label) = (rule.evaluate)(&ctx) {
                let label = format!("{}{}{}", layer_label, LABEL_SEPARATOR, label);
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }

        debug!(layer = layer_label, matched = labels.len(), skipped, "pattern rules evaluated");
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::topology;
    use crate::fixtures;
    use crate::patterns::rules::{PatternRule, RuleReach};
    use std::collections::HashSet;

    #[test]
    fn test_zifu_label_on_natal_layer() {
        let chart = fixtures::sample_chart();
        let window = topology::window_names(&chart, chart.life_index());
        let labels = PatternDetector::new(&chart).detect("本命（基底）", &window, None);
        assert!(labels.contains(&"本命（基底）｜紫府同宮（紫微天府同坐命宮）".to_string()), "{:?}", labels);
    }

    #[test]
    fn test_natal_layer_full_label_set() {
        let chart = fixtures::sample_chart();
        let window = topology::window_names(&chart, chart.life_index());
        let labels = PatternDetector::new(&chart).detect("L", &window, None);
        let expected: Vec<String> = [
            "紫府同宮（紫微天府同坐命宮）",
            "文星拱命（昌/曲會命三方四正）",
            "左右拱命（左輔右弼齊會）",
            "魁鉞拱命（魁/鉞之一會命）",
            "祿馬交馳（祿存+天馬會命三方四正）",
            "火貪（貪狼同宮遇火星：疾厄）",
            "紫微入局（紫微會命三方四正）",
            "天府入局（天府會命三方四正）",
            "殺破狼（七杀、破军會命三方四正）",
            "左右魁鉞（左右+魁/鉞加會）",
            "煞曜夾/會（擎羊、陀罗）",
        ]
        .iter()
        .map(|l| format!("L｜{}", l))
        .collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_missing_tuple_only_disables_dependent_rules() {
        let chart = fixtures::sample_chart();
        let window = topology::window_names(&chart, 10);
        let stars = fixtures::yearly_stars();
        let detector = PatternDetector::new(&chart);

        let with = detector.detect("流年", &window, Some(&stars));
        let without = detector.detect("流年", &window, None);

        assert!(with.iter().any(|l| l.contains("三奇嘉會")));
        assert!(with.iter().any(|l| l.contains("化忌重點")));
        assert!(!without.iter().any(|l| l.contains("三奇嘉會") || l.contains("化忌重點")));
        // Everything found without the tuple is still found with it.
        for label in &without {
            assert!(with.contains(label), "Lost {}", label);
        }
    }

    #[test]
    fn test_detection_is_deterministic_and_unique() {
        let chart = fixtures::sample_chart();
        let window = topology::window_names(&chart, 10);
        let stars = fixtures::yearly_stars();
        let detector = PatternDetector::new(&chart);

        let first = detector.detect("X", &window, Some(&stars));
        let second = detector.detect("X", &window, Some(&stars));
        assert_eq!(first, second);
        let unique: HashSet<_> = first.iter().collect();
        assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn test_duplicate_labels_collapse() {
        fn always(_: &PatternContext<'_>) -> Option<String> {
            Some("同一格局".into())
        }
        let rules = [
            PatternRule { id: "a", reach: RuleReach::TrineWindow, needs_transformations: false, evaluate: always },
            PatternRule { id: "b", reach: RuleReach::TrineWindow, needs_transformations: false, evaluate: always },
        ];
        let chart = fixtures::sample_chart();
        let window = topology::window_names(&chart, 0);
        let labels = PatternDetector::with_rules(&chart, &rules).detect("X", &window, None);
        assert_eq!(labels, vec!["X｜同一格局".to_string()]);
    }
}

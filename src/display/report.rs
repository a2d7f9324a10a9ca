//! Text renderings of an analysis packet.
//!
//! `render_human` is the reader-facing report. `render_packet` is the
//! authoritative context handed to the chat collaborator: the time anchor
//! first, then the packet's sections as JSON.

use crate::analysis::CausalReading;
use crate::chart::{Chart, FlowRow, FlowStars, StarCategory, NO_TARGET};
use crate::engine::{AnalysisPacket, LayerReading, LayerReport, StarHost};
use crate::graph::Transformation;
use crate::layers::{Mode, Scope};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Lists at most `limit` labels, noting how many were left out.
pub fn render_patterns(title: &str, patterns: Option<&[String]>, limit: usize) -> String {
    let patterns = match patterns {
        Some(p) if !p.is_empty() => p,
        _ => return format!("（{}：未匹配；或此層未啟用格局判定）", title),
    };
    let mut out = patterns
        .iter()
        .take(limit)
        .map(|p| format!("- {}", p))
        .collect::<Vec<_>>()
        .join("\n");
    let rest = patterns.len().saturating_sub(limit);
    if rest > 0 {
        let _ = write!(out, "\n（其餘 {} 項略）", rest);
    }
    out
}

pub fn render_causal(title: &str, reading: Option<&CausalReading>) -> String {
    let Some(summary) = reading.and_then(CausalReading::summary) else {
        return format!("（{}：無資料）", title);
    };

    let mut out = String::new();
    let _ = writeln!(out, "【{}｜因果鏈（內部焦點）】", title);
    let _ = writeln!(out);
    let _ = writeln!(out, "【結果症狀（結果面向）】");
    let _ = writeln!(out, "- 結果面向（內部定位）：{}", summary.focus);
    let _ = writeln!(out);

    let _ = writeln!(out, "【源頭問題（起因宮 → 承受宮）】");
    if summary.incoming.is_empty() {
        let _ = writeln!(out, "（無：此宮未接到四化；或此層資料不足）");
    }
    for edge in &summary.incoming {
        let _ = writeln!(out, "- {}", edge);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "【外溢影響（此宮作為源頭 → 影響到哪些宮）】");
    if summary.outgoing.is_empty() {
        let _ = write!(out, "（無：此宮未飛出四化；或此層資料不足）");
    }
    let lines: Vec<String> = summary.outgoing.iter().map(|e| format!("- {}", e)).collect();
    out.push_str(&lines.join("\n"));
    out
}

/// One line per sector: where each kind flies.
pub fn render_flows(title: &str, rows: &[FlowRow]) -> String {
    if rows.is_empty() {
        return format!("（{}：無資料）", title);
    }
    rows.iter()
        .map(|row| {
            let flights: Vec<String> = Transformation::ALL
                .into_iter()
                .map(|kind| format!("{}→{}", kind, row.target(kind).unwrap_or(NO_TARGET)))
                .collect();
            format!("{}：{}", row.sector, flights.join("  "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per sector: 主 / 辅煞 / 杂 columns, empty columns left out.
pub fn render_natal_stars(chart: &Chart) -> String {
    chart
        .sectors()
        .iter()
        .map(|sector| {
            let parts: Vec<String> = [
                ("主", StarCategory::Major),
                ("辅/煞", StarCategory::Minor),
                ("杂", StarCategory::Adjective),
            ]
            .into_iter()
            .filter(|(_, category)| !sector.stars(*category).is_empty())
            .map(|(title, category)| format!("{}：{}", title, sector.stars(category).join("、")))
            .collect();
            let body = if parts.is_empty() { NO_TARGET.to_string() } else { parts.join(" ｜ ") };
            format!("{}：{}", sector.name, body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sectors carrying 流耀, one line each.
pub fn render_flow_stars(title: &str, flow: &[FlowStars]) -> String {
    let lines: Vec<String> = flow
        .iter()
        .filter(|f| !f.stars.is_empty())
        .map(|f| format!("{}：{}", f.sector, f.stars.join("、")))
        .collect();
    if lines.is_empty() {
        return format!("（{}：無流耀）", title);
    }
    lines.join("\n")
}

pub fn render_star_hosts(title: &str, hosts: &[StarHost]) -> String {
    if hosts.is_empty() {
        return format!("（{}：天干/四化星名取不到 → 不顯示四化星名）", title);
    }
    hosts
        .iter()
        .map(|h| format!("{}：{}（落{}）", h.kind, h.star, h.sector))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_self_transformations(title: &str, marks: &BTreeMap<String, Vec<Transformation>>) -> String {
    if marks.is_empty() {
        return format!("（{}：無自化）", title);
    }
    marks
        .iter()
        .map(|(sector, kinds)| {
            let kinds: Vec<String> = kinds.iter().map(|k| format!("自化{}", k)).collect();
            format!("{}：{}", sector, kinds.join("、"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_incoming(prefix: &str, ranking: &[(String, usize)]) -> String {
    if ranking.is_empty() {
        return format!("{}：（無）", prefix);
    }
    let entries: Vec<String> = ranking.iter().map(|(s, n)| format!("{}({})", s, n)).collect();
    format!("{}：{}", prefix, entries.join("、"))
}

fn render_layer(out: &mut String, reading: &LayerReading, chart: &Chart, pattern_limit: usize) {
    let report = match reading {
        LayerReading::Available(report) => report,
        LayerReading::Unavailable { label, .. } => {
            let _ = writeln!(out, "【{}】", label);
            let _ = writeln!(out, "（{}：無資料）", label);
            let _ = writeln!(out);
            return;
        }
    };
    let LayerReport { label, scope, .. } = report;
    let name = scope.layer_name();

    let _ = writeln!(out, "【{}】", label);
    if report.patterns.is_some() {
        let title = format!("{}格局（程式規則版）", name);
        let _ = writeln!(out, "{}", render_patterns(&title, report.patterns.as_deref(), pattern_limit));
        let _ = writeln!(out);
    }

    if *scope == Scope::Natal {
        let _ = writeln!(out, "【本命星曜（好讀版）】");
        let _ = writeln!(out, "{}", render_natal_stars(chart));
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "【{}四化（飛化）】", name);
    let _ = writeln!(out, "{}", render_flows(&format!("{}四化", name), &report.flows));
    let _ = writeln!(out);

    if report.transformation_stars.is_some() {
        let _ = writeln!(out, "【{}四化星名（禄/权/科/忌；落宮）】", name);
        let _ = writeln!(out, "{}", render_star_hosts(&format!("{}四化星名", name), &report.star_hosts));
        let _ = writeln!(out);
    }

    if let Some(flow) = &report.flow_stars {
        let _ = writeln!(out, "【{}：流耀（按宮位）】", label);
        let _ = writeln!(out, "{}", render_flow_stars(name, flow));
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "【{}自化】", name);
    let _ = writeln!(out, "{}", render_self_transformations(&format!("{}自化", name), &report.self_transformations));
    let _ = writeln!(out);

    let prefix = format!("【{}：四化落點 Top 接收宮位】", label);
    let _ = writeln!(out, "{}", render_incoming(&prefix, &report.incoming_ranking));
    let _ = writeln!(out);

    if let Some(causal) = &report.causal {
        let _ = writeln!(out, "{}", render_causal(label, Some(causal)));
        let _ = writeln!(out);
    }
}

/// The reader-facing report: adjustability first, then each layer, then the overlay.
pub fn render_human(packet: &AnalysisPacket, pattern_limit: usize) -> String {
    let mut out = String::new();
    write_header(&mut out, packet);

    for reading in packet.layers().skip(1) {
        if let Some(report) = reading.report() {
            let _ = writeln!(out, "【{}命宮落點】{}", report.scope.layer_name(), report.self_sector);
        }
    }
    let _ = writeln!(out);

    let adj = &packet.adjustability;
    let _ = writeln!(out, "【可調整 vs 不可調整（決策輔助）】");
    let _ = writeln!(out, "【不可調整】{}", adj.fixed_base);
    let _ = writeln!(out);
    let _ = writeln!(out, "【可調整點（策略槓桿：起因宮）】");
    if adj.levers.is_empty() {
        let _ = writeln!(out, "（無：此模式沒有主導層；或此焦點宮未接到四化）");
    }
    for lever in &adj.levers {
        let _ = writeln!(out, "- {}：{}", lever.sector, lever.guidance);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "【節奏管理】{}", adj.rhythm.text);
    let _ = writeln!(out);

    for reading in packet.layers() {
        render_layer(&mut out, reading, &packet.chart, pattern_limit);
    }

    if packet.mode != Mode::Life {
        let _ = writeln!(out, "【層級宮位重疊（本命 → 當前主導）】");
        let _ = writeln!(out, "{}", packet.overlay);
    }
    out
}

fn write_header(out: &mut String, packet: &AnalysisPacket) {
    let p = &packet.profile;
    let _ = writeln!(out, "【命盤】{}", p.label);
    let _ = writeln!(out, "出生：{}  time_index={}", p.birth_date, p.birth_time_slot);
    let _ = writeln!(out, "【模式】{}", packet.mode);
    let _ = writeln!(out, "【目標】{}", packet.time_anchor.selected_target);
    if let Some(solar) = &packet.time_anchor.selected_target_solar_date {
        let _ = writeln!(out, "【solarDate】{}", solar);
    }
    if let Some(lunar) = &packet.time_anchor.selected_target_lunar_date {
        let _ = writeln!(out, "【lunarDate】{}", lunar);
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("（序列化失敗：{}）", e))
}

fn causal_entry(reading: Option<&LayerReading>) -> Value {
    reading
        .and_then(LayerReading::causal)
        .and_then(|c| serde_json::to_value(c).ok())
        .unwrap_or(Value::Null)
}

/// The authoritative context for the chat collaborator.
pub fn render_packet(packet: &AnalysisPacket) -> String {
    let mut out = String::new();
    write_header(&mut out, packet);
    let _ = writeln!(out);

    let _ = writeln!(out, "【時間錨點（解析「今年/這個大限/本月/今天」一律以此為準）】");
    let _ = writeln!(out, "{}", to_json(&packet.time_anchor));
    let _ = writeln!(out);

    let _ = writeln!(out, "【可調整性（JSON）】");
    let _ = writeln!(out, "{}", to_json(&packet.adjustability));
    let _ = writeln!(out);

    let timing = |scope| packet.timing.iter().find(|l| l.scope() == scope);
    let causal = json!({
        "本命": causal_entry(Some(&packet.natal)),
        "背景大限": causal_entry(packet.background.as_ref()),
        "當前主導": causal_entry(packet.dominant.as_ref()),
        "應期流月": causal_entry(timing(Scope::Monthly)),
        "應期流日": causal_entry(timing(Scope::Daily)),
    });
    let _ = writeln!(out, "【因果鏈（JSON；焦點宮）】");
    let _ = writeln!(out, "{}", to_json(&causal));
    let _ = writeln!(out);

    for reading in packet.layers() {
        let label = reading.label();
        let Some(report) = reading.report() else {
            let _ = writeln!(out, "【{}】", label);
            let _ = writeln!(out, "（{}：無資料）", label);
            let _ = writeln!(out);
            continue;
        };
        if let Some(patterns) = &report.patterns {
            let _ = writeln!(out, "【{}格局（程式規則版）】", label);
            let _ = writeln!(out, "{}", to_json(patterns));
            let _ = writeln!(out);
        }
        if report.scope == Scope::Natal {
            let _ = writeln!(out, "【本命星曜（JSON：主星/辅星/杂耀）】");
            let _ = writeln!(out, "{}", to_json(&packet.chart));
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "【{}四化（JSON：飛化）】", label);
        let _ = writeln!(out, "{}", to_json(&report.flows));
        let _ = writeln!(out);
        if let Some(stars) = &report.transformation_stars {
            let _ = writeln!(out, "【{}四化星名（JSON）】", label);
            let _ = writeln!(out, "{}", to_json(stars));
            let _ = writeln!(out);
        }
        if let Some(flow) = &report.flow_stars {
            let _ = writeln!(out, "【{}流耀（按宮位 JSON）】", label);
            let _ = writeln!(out, "{}", to_json(flow));
            let _ = writeln!(out);
        }
        if !report.self_transformations.is_empty() {
            let _ = writeln!(out, "【{}自化（文字）】", label);
            let _ = writeln!(out, "{}", render_self_transformations(label, &report.self_transformations));
            let _ = writeln!(out);
        }
    }

    if packet.mode != Mode::Life {
        let _ = writeln!(out, "【層級宮位重疊（本命 → 當前主導）】");
        let _ = writeln!(out, "{}", packet.overlay);
    }
    out
}

//! A synchronous, single-threaded analysis run: chart → layers → packet.
use super::packet::{
    AnalysisPacket, LayerReading, LayerReport, StarHost, TimeAnchor, LIFE_TARGET, TIME_ANCHOR_NOTE,
};
use crate::analysis::{causal, topology};
use crate::chart::{Chart, ChartProvider, FlowRow, Horoscope, ScopeOverlay, ScopeSelector};
use crate::config::EngineConfig;
use crate::error::{AnalysisError, ConfigError};
use crate::graph::{self_transformations, FlowGraph};
use crate::layers::{LayerPlan, Mode, OverlayNarrative, Scope};
use crate::leverage::{synthesize, GuidanceTable};
use crate::patterns::PatternDetector;
use crate::store::{Profile, TimeTarget};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const NATAL_LABEL: &str = "本命（基底）";
pub const BACKGROUND_LABEL: &str = "背景（大限）";

/// One analysis request. Everything the run depends on is passed in here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub profile: Profile,
    pub mode: Mode,
    /// Required for every mode except `life`, ignored for `life`.
    #[serde(default)]
    pub target: Option<TimeTarget>,
    #[serde(default)]
    pub focus: Option<String>,
}

pub struct Analyzer<'a> {
    provider: &'a dyn ChartProvider,
    config: EngineConfig,
    guidance: GuidanceTable,
}

impl<'a> Analyzer<'a> {
    /// An analyzer with the default configuration and built-in guidance table.
    pub fn new(provider: &'a dyn ChartProvider) -> Self {
        Self {
            provider,
            config: EngineConfig::default(),
            guidance: GuidanceTable::default(),
        }
    }

    /// Validates `config` and loads the guidance table it names.
    pub fn with_config(provider: &'a dyn ChartProvider, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let guidance = config.load_guidance()?;
        Ok(Self { provider, config, guidance })
    }

    pub fn with_guidance(mut self, guidance: GuidanceTable) -> Self {
        self.guidance = guidance;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The human-readable report, with the configured pattern display limit.
    pub fn render_report(&self, packet: &AnalysisPacket) -> String {
        crate::display::render_human(packet, self.config.pattern_display_limit)
    }

    /// The focus sector to use: the requested one if the chart has it,
    /// otherwise the configured default.
    pub fn resolve_focus(&self, chart: &Chart, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some(name) if chart.contains_sector(name) => name.to_string(),
            Some(name) => {
                warn!(requested = name, fallback = %self.config.default_focus, "unknown focus sector");
                self.config.default_focus.clone()
            }
            None => self.config.default_focus.clone(),
        }
    }

    /// Runs the full analysis.
    ///
    /// Only unusable input fails the run; missing scopes, unknown focus
    /// sectors and unlocatable stars degrade to explicit values in the packet.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisPacket, AnalysisError> {
        let mode = request.mode;
        let birth = request.profile.birth();
        birth.validate()?;
        let chart = self.provider.build_chart(&birth)?;

        let target = match (mode.is_timed(), &request.target) {
            (false, _) => None,
            (true, Some(target)) => Some(target.clone()),
            (true, None) => return Err(AnalysisError::MissingTarget { mode }),
        };
        let focus = self.resolve_focus(&chart, request.focus.as_deref());
        let plan = LayerPlan::for_mode(mode);
        let horoscope = target.as_ref().map(|t| self.provider.overlay(&chart, t.date));

        debug!(%mode, focus = %focus, selected = ?target.as_ref().map(|t| &t.label), "analysis started");

        let run = LayerBuilder {
            analyzer: self,
            chart: &chart,
            names: chart.sector_names(),
            detector: PatternDetector::new(&chart),
            focus: &focus,
            horoscope: horoscope.as_ref(),
            date: target.as_ref().map(|t| t.date),
        };

        let natal = run.natal();
        let background = plan
            .background
            .map(|scope| run.scoped(BACKGROUND_LABEL.to_string(), scope, plan.is_timing(scope)).0);
        let (dominant, dominant_graph) = match plan.dominant {
            Some(scope) => {
                let label = format!("當前主導（{}）", scope.layer_name());
                let (reading, graph) = run.scoped(label, scope, plan.is_timing(scope));
                (Some(reading), graph)
            }
            None => (None, None),
        };
        let timing: Vec<LayerReading> = plan
            .timing
            .iter()
            .map(|&scope| {
                run.scoped(format!("應期參考（{}）", scope.layer_name()), scope, plan.is_timing(scope)).0
            })
            .collect();

        let overlay = OverlayNarrative::resolve(&plan, &chart, horoscope.as_ref(), dominant_graph.as_ref());
        let adjustability = synthesize(
            mode,
            plan.dominant_label(),
            dominant.as_ref().and_then(LayerReading::causal),
            &focus,
            &self.guidance,
        );

        let time_anchor = TimeAnchor {
            selected_mode: mode,
            selected_target_type: mode.target_type().to_string(),
            selected_target: target
                .as_ref()
                .map_or_else(|| LIFE_TARGET.to_string(), |t| t.label.clone()),
            selected_target_solar_date: horoscope.as_ref().and_then(|h| h.solar_date.clone()),
            selected_target_lunar_date: horoscope.as_ref().and_then(|h| h.lunar_date.clone()),
            dominant_layer: plan.dominant_label().map(str::to_string),
            note: TIME_ANCHOR_NOTE.to_string(),
        };

        debug!(%mode, levers = adjustability.levers.len(), timing = timing.len(), "analysis finished");

        Ok(AnalysisPacket {
            profile: request.profile.clone(),
            mode,
            target,
            focus,
            time_anchor,
            chart,
            natal,
            background,
            dominant,
            timing,
            overlay,
            adjustability,
        })
    }
}

/// Per-run state shared by every layer.
struct LayerBuilder<'r> {
    analyzer: &'r Analyzer<'r>,
    chart: &'r Chart,
    names: Vec<String>,
    detector: PatternDetector<'r>,
    focus: &'r str,
    horoscope: Option<&'r Horoscope>,
    date: Option<NaiveDate>,
}

impl<'r> LayerBuilder<'r> {
    /// The natal layer always exists; missing natal flights only empty its graph.
    fn natal(&self) -> LayerReading {
        let rows = self
            .analyzer
            .provider
            .flow_rows(self.chart, ScopeSelector::natal(), &self.names)
            .unwrap_or_else(|| {
                warn!("provider returned no natal flow rows");
                Vec::new()
            });
        let (report, _) = self.report(NATAL_LABEL.to_string(), Scope::Natal, self.chart.life_index(), None, rows, false);
        LayerReading::Available(report)
    }

    /// A timed layer; unavailable unless the provider has both the overlay
    /// and the flight rows for `scope`, and the overlay's self index names a
    /// sector of the chart.
    fn scoped(&self, label: String, scope: Scope, timing: bool) -> (LayerReading, Option<FlowGraph>) {
        let overlay = self.horoscope.and_then(|h| h.scope(scope)).filter(|o| {
            let known = self.chart.sector(o.self_index).is_some();
            if !known {
                warn!(%scope, self_index = o.self_index, "scope self index outside the chart");
            }
            known
        });
        let rows = self.date.and_then(|date| {
            self.analyzer
                .provider
                .flow_rows(self.chart, ScopeSelector::at(scope, date), &self.names)
        });

        match (overlay, rows) {
            (Some(overlay), Some(rows)) => {
                let (report, graph) = self.report(label, scope, overlay.self_index, Some(overlay), rows, timing);
                (LayerReading::Available(report), Some(graph))
            }
            (overlay, rows) => {
                warn!(
                    %scope,
                    has_overlay = overlay.is_some(),
                    has_flows = rows.is_some(),
                    "scope unavailable"
                );
                (LayerReading::Unavailable { label, scope }, None)
            }
        }
    }

    fn report(
        &self,
        label: String,
        scope: Scope,
        self_index: usize,
        overlay: Option<&ScopeOverlay>,
        rows: Vec<FlowRow>,
        timing: bool,
    ) -> (LayerReport, FlowGraph) {
        let stars = overlay.and_then(|o| o.transformation_stars.clone());
        let window = topology::window_names(self.chart, self_index);
        let graph = FlowGraph::build(&rows, stars.as_ref());

        // Timing references are never pattern-checked, and only summarized when they fly.
        let patterns = (!timing).then(|| self.detector.detect(&label, &window, stars.as_ref()));
        let causal = (!timing || !graph.is_empty()).then(|| causal::analyze(&graph, self.focus));

        let star_hosts = stars
            .as_ref()
            .map(|s| {
                s.iter()
                    .map(|(kind, star)| StarHost {
                        kind,
                        star: star.to_string(),
                        sector: self.chart.host_of(star).to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut incoming_ranking = graph.incoming_ranking();
        incoming_ranking.truncate(self.analyzer.config.incoming_top_limit);

        let report = LayerReport {
            label,
            scope,
            self_sector: self.chart.name_at(self_index).to_string(),
            window,
            transformation_stars: stars,
            star_hosts,
            flow_stars: overlay.and_then(|o| o.flow_stars.clone()),
            patterns,
            edges: graph.edges(),
            causal,
            self_transformations: self_transformations(&rows),
            incoming_ranking,
            flows: rows,
        };
        (report, graph)
    }
}

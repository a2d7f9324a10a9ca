//! flow.rs
//! Turns one scope's per-sector flight rows into a deduplicated directed graph.

use super::edge::{CausalEdge, Transformation};
use crate::chart::sector::is_canonical;
use crate::chart::{FlowRow, TransformationStars};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap, HashSet};

/// The transformation-flow graph of one scope.
///
/// Nodes are sector names, edge weights are [`CausalEdge`]s. Parallel edges are
/// allowed (two kinds may fly between the same pair) but an identical
/// `(from, to, kind, star)` tuple is stored once.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    graph: StableDiGraph<String, CausalEdge>,
    nodes: HashMap<String, NodeIndex>,
    seen: HashSet<CausalEdge>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph for one scope.
    ///
    /// With a transformation-star tuple, each edge carries the scope-wide star
    /// of its kind; without one, edges carry an empty annotation.
    pub fn build(rows: &[FlowRow], stars: Option<&TransformationStars>) -> Self {
        let mut graph = Self::new();
        for row in rows {
            for edge in edges_of_row(row, stars) {
                graph.insert(edge);
            }
        }
        tracing::debug!(rows = rows.len(), edges = graph.edge_count(), "flow graph built");
        graph
    }

    /// Adds an edge unless an identical one is already present.
    pub fn insert(&mut self, edge: CausalEdge) -> bool {
        if self.seen.contains(&edge) {
            return false;
        }
        let from = self.node(&edge.from);
        let to = self.node(&edge.to);
        self.seen.insert(edge.clone());
        self.graph.add_edge(from, to, edge);
        true
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), idx);
        idx
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> Vec<CausalEdge> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_weight(e).cloned())
            .collect()
    }

    /// Edges touching `sector` in the given direction, in insertion order.
    ///
    /// A self-loop is reported for both directions.
    pub fn edges_at(&self, sector: &str, direction: Direction) -> Vec<CausalEdge> {
        let Some(&idx) = self.nodes.get(sector) else {
            return Vec::new();
        };
        let mut found: Vec<(EdgeIndex, &CausalEdge)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| (e.id(), e.weight()))
            .collect();
        // petgraph walks adjacency lists newest-first.
        found.sort_by_key(|(id, _)| *id);
        found.into_iter().map(|(_, e)| e.clone()).collect()
    }

    /// Every sector named as a source or target, in first-seen order.
    pub fn sectors(&self) -> Vec<String> {
        // Nodes are only ever created by `insert`, so every node has an edge.
        self.graph
            .node_indices()
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect()
    }

    /// Sectors ranked by number of incoming flights, most first; ties keep
    /// first-seen order.
    pub fn incoming_ranking(&self) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .graph
            .node_indices()
            .filter_map(|n| {
                let count = self.graph.edges_directed(n, Direction::Incoming).count();
                let name = self.graph.node_weight(n)?;
                (count > 0).then(|| (name.clone(), count))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// The edges a single row contributes. Both endpoints must be canonical
/// sector names; anything else a provider reports is dropped.
fn edges_of_row(row: &FlowRow, stars: Option<&TransformationStars>) -> SmallVec<[CausalEdge; 4]> {
    if !is_canonical(&row.sector) {
        tracing::warn!(sector = %row.sector, "dropping flow row with unknown sector");
        return SmallVec::new();
    }
    Transformation::ALL
        .into_iter()
        .filter_map(|kind| {
            let to = row.target(kind)?;
            if !is_canonical(to) {
                tracing::warn!(from = %row.sector, to, ?kind, "dropping flight to unknown sector");
                return None;
            }
            Some(CausalEdge {
                from: row.sector.clone(),
                to: to.to_string(),
                kind,
                star: stars.map(|s| s.star(kind).to_string()).unwrap_or_default(),
            })
        })
        .collect()
}

/// Rows whose flight of some kind lands back on the row's own sector.
pub fn self_transformations(rows: &[FlowRow]) -> BTreeMap<String, Vec<Transformation>> {
    let mut marks = BTreeMap::new();
    for row in rows.iter().filter(|r| is_canonical(&r.sector)) {
        let kinds: Vec<Transformation> = Transformation::ALL
            .into_iter()
            .filter(|&k| row.target(k) == Some(row.sector.as_str()))
            .collect();
        if !kinds.is_empty() {
            marks.insert(row.sector.clone(), kinds);
        }
    }
    marks
}

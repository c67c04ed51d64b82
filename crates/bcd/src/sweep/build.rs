//! Column sweep that builds, rewires and finalizes the topology graph.

use std::mem;

use tracing::{debug, info, trace, warn};

use crate::error::{BcdError, Result};
use crate::graph::{EdgeHandle, TopologyGraph, VertexHandle};
use crate::map::OccupancyMap;

use super::classify::classify;
use super::types::{Bound, CriticalEvent, Segment, Transition};

/// Colour stamped on every vertex and cell the sweep creates.
const SWEEP_COLOR: i32 = 0;

/// Decompose `map` into a fresh graph.
pub fn decompose(map: &OccupancyMap) -> Result<TopologyGraph> {
    let mut graph = TopologyGraph::new();
    decompose_into(map, &mut graph)?;
    Ok(graph)
}

/// Decompose `map` into `graph`, which is cleared first. On error the graph is
/// left empty.
pub fn decompose_into(map: &OccupancyMap, graph: &mut TopologyGraph) -> Result<()> {
    let mut events = Vec::new();
    Sweep {
        map,
        graph,
        events: &mut events,
    }
    .run()
}

/// Decomposition engine that keeps its graph and the critical events of the last run.
#[derive(Clone, Debug, Default)]
pub struct Decomposer {
    graph: TopologyGraph,
    events: Vec<CriticalEvent>,
}

impl Decomposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompose `map`, replacing the previous graph and events. On error both are
    /// left empty.
    pub fn run(&mut self, map: &OccupancyMap) -> Result<()> {
        Sweep {
            map,
            graph: &mut self.graph,
            events: &mut self.events,
        }
        .run()
    }

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    /// Events in creation order; `events()[i].vertex == VertexId(i)`.
    pub fn events(&self) -> &[CriticalEvent] {
        &self.events
    }

    pub fn into_graph(self) -> TopologyGraph {
        self.graph
    }
}

struct Sweep<'a> {
    map: &'a OccupancyMap,
    graph: &'a mut TopologyGraph,
    events: &'a mut Vec<CriticalEvent>,
}

impl Sweep<'_> {
    fn run(mut self) -> Result<()> {
        self.graph.clear();
        self.events.clear();
        let out = self.build();
        match &out {
            Ok(()) => info!(
                vertices = self.graph.num_vertices(),
                cells = self.graph.num_edges(),
                width = self.map.width(),
                height = self.map.height(),
                "decomposition complete"
            ),
            Err(err) => {
                warn!(%err, "decomposition failed, discarding partial graph");
                self.graph.clear();
                self.events.clear();
            }
        }
        out
    }

    fn build(&mut self) -> Result<()> {
        let (w, h) = (self.map.width(), self.map.height());
        let bottom = h as f64;
        // Fully blocked virtual column left of x = 0.
        let mut prev = vec![Bound::new(-1.0, -1.0, false), Bound::new(-1.0, bottom, false)];
        let mut cur = Vec::with_capacity(prev.len());
        for x in 0..=w {
            self.scan_column(x, &mut cur);
            self.connect_columns(x, &mut prev, &mut cur)?;
            self.fill_boundaries(x, &cur)?;
            trace!(x, bounds = cur.len(), "column swept");
            mem::swap(&mut prev, &mut cur);
        }
        self.finalize();
        self.validate()
    }

    /// Bounds of column `x`, bracketed by `y = -1` and `y = H`. Column `W` is the
    /// blocked virtual column that closes every open cell.
    fn scan_column(&self, x: usize, out: &mut Vec<Bound>) {
        let (w, h) = (self.map.width(), self.map.height());
        let xf = x as f64;
        out.clear();
        out.push(Bound::new(xf, -1.0, false));
        let mut in_free = false;
        if x < w {
            for y in 0..h {
                let free = self.map.is_free(x, y);
                if free != in_free {
                    // The run ending here has the old status.
                    out.push(Bound::new(xf, y as f64, in_free));
                    in_free = free;
                }
            }
        }
        out.push(Bound::new(xf, h as f64, in_free));
    }

    fn connect_columns(&mut self, x: usize, prev: &mut [Bound], cur: &mut [Bound]) -> Result<()> {
        for pb in 1..prev.len() {
            let p = Segment::between(&prev[pb - 1], &prev[pb]);
            for cb in 1..cur.len() {
                let c = Segment::between(&cur[cb - 1], &cur[cb]);
                if let Some(kind) = classify(p, c) {
                    self.apply(kind, x, (p, pb), (c, cb), prev, cur)?;
                }
            }
        }
        Ok(())
    }

    fn apply(
        &mut self,
        kind: Transition,
        x: usize,
        (p, pb): (Segment, usize),
        (c, cb): (Segment, usize),
        prev: &mut [Bound],
        cur: &mut [Bound],
    ) -> Result<()> {
        match kind {
            Transition::Birth => {
                let v = self.event(kind, x, c.top, c.bottom);
                cur[cb].edge = Some(self.graph.add_edge(v, v, SWEEP_COLOR)?);
            }
            Transition::Death => {
                let v = self.event(kind, x, p.top, p.bottom);
                let e = require(prev[pb].edge, x, p.bottom)?;
                prev[pb].edge = Some(self.graph.modify_end_nodes(e, v, None)?);
            }
            Transition::Split => {
                let v = self.event(kind, x, c.top, c.bottom);
                let e = require(prev[pb].edge, x, p.bottom)?;
                self.graph.modify_end_nodes(e, v, None)?;
                // Above the obstacle: the run ending at the obstacle's top bound.
                cur[cb - 1].edge = Some(self.graph.add_edge(v, v, SWEEP_COLOR)?);
                // Below: parked on the previous run so continuation hands it down.
                prev[pb].edge = Some(self.graph.add_edge(v, v, SWEEP_COLOR)?);
            }
            Transition::Merge => {
                let v = self.event(kind, x, p.top, p.bottom);
                let below = require(prev.get(pb + 1).and_then(|b| b.edge), x, p.bottom)?;
                self.graph.modify_end_nodes(below, v, None)?;
                let above = require(cur[cb].edge, x, c.bottom)?;
                self.graph.modify_end_nodes(above, v, None)?;
                cur[cb].edge = Some(self.graph.add_edge(v, v, SWEEP_COLOR)?);
            }
            Transition::Continuation => {
                if cur[cb].edge.is_none() {
                    cur[cb].edge = prev[pb].edge;
                }
            }
        }
        Ok(())
    }

    fn event(&mut self, kind: Transition, x: usize, y_top: f64, y_bottom: f64) -> VertexHandle {
        let v = self.graph.add_vertex(x as f64, y_top, y_bottom, SWEEP_COLOR);
        debug!(?kind, x, y_top, y_bottom, vertex = %v.id(), "critical point");
        self.events.push(CriticalEvent {
            kind,
            vertex: v.id(),
            x,
        });
        v
    }

    /// One `(top, bottom)` sample per free run of column `x`.
    fn fill_boundaries(&mut self, x: usize, cur: &[Bound]) -> Result<()> {
        for pair in cur.windows(2) {
            let (top, bot) = (&pair[0], &pair[1]);
            if !bot.free_above {
                continue;
            }
            let e = require(bot.edge, x, bot.point.y)?;
            self.graph.cell_mut(e)?.push_sample(top.point, bot.point);
        }
        Ok(())
    }

    fn finalize(&mut self) {
        self.graph.update_cell_areas();
        self.graph.update_cell_costs();
        self.graph.update_travel_costs();
    }

    fn validate(&self) -> Result<()> {
        let (vertices, edges) = (self.graph.num_vertices(), self.graph.num_edges());
        if vertices < 2 || edges == 0 {
            return Err(BcdError::EmptyGraph { vertices, edges });
        }
        if let Some(cell) = self.graph.cells().find(|c| c.is_empty()) {
            return Err(BcdError::IncompleteCell { edge: cell.id() });
        }
        Ok(())
    }
}

#[inline]
fn require(edge: Option<EdgeHandle>, x: usize, y: f64) -> Result<EdgeHandle> {
    edge.ok_or(BcdError::InconsistentAssociation { x, y })
}

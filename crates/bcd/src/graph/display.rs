//! Text rendering of graphs for logs and the CLI dump.

use std::fmt;

use super::topology::TopologyGraph;
use super::types::{Cell, CriticalPoint};

struct OptF64(Option<f64>);

impl fmt::Display for OptF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("-"),
        }
    }
}

/// `3 [x 4, y1 2, y2 3]`
impl fmt::Display for CriticalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [x {}, y1 {}, y2 {}]",
            self.id, self.x, self.y_top, self.y_bottom
        )
    }
}

/// `[Eid 1, travelCost 5, areaCost 20, topBoundary 4, bottomBoundary 4]`
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Eid {}, travelCost {}, areaCost {}, topBoundary {}, bottomBoundary {}]",
            self.id,
            OptF64(self.travel_cost),
            self.area,
            self.top_boundary().len(),
            self.bottom_boundary().len()
        )
    }
}

/// Adjacency summary: every vertex with its incident cells, then every cell with
/// its endpoints.
impl fmt::Display for TopologyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The graph has {} vertices and {} edges",
            self.num_vertices(),
            self.num_edges()
        )?;
        writeln!(f, "vertices:")?;
        for v in self.critical_points() {
            write!(f, "  {v}")?;
            let incident: Vec<String> = self
                .vertex_handle(v.id())
                .and_then(|h| self.out_edges(h).ok())
                .into_iter()
                .flatten()
                .map(|e| e.id().to_string())
                .collect();
            if !incident.is_empty() {
                write!(f, ", connected to edges: {}", incident.join(" "))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "edges:")?;
        for c in self.cells() {
            let (a, b) = c.span().endpoints();
            writeln!(f, "  {c}, attached to vertices: {a} & {b}")?;
        }
        Ok(())
    }
}

/// Flat dump: one line per cell with its endpoint midpoints, then one line per vertex.
pub struct GraphDump<'a>(pub &'a TopologyGraph);

impl fmt::Display for GraphDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.0;
        for c in g.cells() {
            let (a, b) = c.span().endpoints();
            let (p, q) = (g[a].midpoint(), g[b].midpoint());
            writeln!(f, "{c} ({}, {}) ({}, {})", p.x, p.y, q.x, q.y)?;
        }
        for v in g.critical_points() {
            writeln!(f, "{v}")?;
        }
        Ok(())
    }
}

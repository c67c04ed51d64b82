//! SVG drawing of a decomposition over its map.
//!
//! Layers, bottom to top:
//! - occupied pixels (grey, merged into horizontal runs),
//! - cells (top boundary forward, bottom boundary reversed, one colour per cell),
//! - one cubic curve per edge through the endpoint midpoints and the cell's
//!   midline at 1/3 and 2/3 of its samples,
//! - critical points at their midpoints, coloured by event kind.

use std::path::Path;

use anyhow::{Context, Result};
use bcd::api::{Cell, CriticalEvent, OccupancyMap, TopologyGraph, Transition, VertexId};
use nalgebra::Point2;
use svg::node::element::{Circle, Group, Polygon, Polyline, Rectangle, Text};
use svg::Document;

/// Rendering configuration.
#[derive(Clone, Copy, Debug)]
pub struct RenderCfg {
    /// SVG units per map pixel.
    pub scale: f64,
    /// Critical point marker radius, in map pixels.
    pub vertex_radius: f64,
    /// Line segments per edge curve.
    pub curve_steps: usize,
    /// Draw vertex IDs next to the markers.
    pub labels: bool,
}
impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            scale: 4.0,
            vertex_radius: 1.5,
            curve_steps: 20,
            labels: false,
        }
    }
}

mod colors {
    pub const WALL: &str = "#555555";
    pub const BACKGROUND: &str = "white";
    pub const CELL_STROKE: &str = "blue";
    pub const GRAPH: &str = "green";
    pub const CELLS: [&str; 8] = [
        "#a6cee3", "#b2df8a", "#fb9a99", "#fdbf6f", "#cab2d6", "#ffff99", "#8dd3c7", "#bebada",
    ];
}

fn event_color(kind: Option<Transition>) -> &'static str {
    match kind {
        Some(Transition::Birth) => "#1b9e77",
        Some(Transition::Death) => "#d95f02",
        Some(Transition::Split) => "#7570b3",
        Some(Transition::Merge) => "#e7298a",
        Some(Transition::Continuation) | None => "#666666",
    }
}

/// Kind of the event that created `v`. Events are stored in vertex-ID order; a
/// slice that does not line up (foreign or empty) yields `None`.
fn event_kind(events: &[CriticalEvent], v: VertexId) -> Option<Transition> {
    events
        .get(v.0)
        .filter(|e| e.vertex == v)
        .map(|e| e.kind)
}

/// Cubic through `p` at parameters 0, 1/4, 3/4, 1, evaluated at `t`.
fn lagrange_cubic(p: [Point2<f64>; 4], t: f64) -> Point2<f64> {
    const NODES: [f64; 4] = [0.0, 0.25, 0.75, 1.0];
    let mut out = Point2::origin();
    for (i, (&ti, pi)) in NODES.iter().zip(p).enumerate() {
        let w: f64 = NODES
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, &tj)| (t - tj) / (ti - tj))
            .product();
        out += pi.coords * w;
    }
    out
}

/// Polyline approximating the edge curve of `cell`, drawn left to right.
pub fn edge_curve(graph: &TopologyGraph, cell: &Cell, steps: usize) -> Vec<Point2<f64>> {
    let (a, b) = cell.span().endpoints();
    let (mut p0, mut p3) = (graph[a].midpoint(), graph[b].midpoint());
    if p0.x > p3.x {
        std::mem::swap(&mut p0, &mut p3);
    }
    let mid: Vec<Point2<f64>> = cell.midline().collect();
    let n = mid.len();
    let at = |idx: usize| mid.get(idx.min(n.saturating_sub(1))).copied();
    let (Some(p1), Some(p2)) = (at(n / 3), at(2 * n / 3)) else {
        return vec![p0, p3];
    };
    let steps = steps.max(1);
    (0..=steps)
        .map(|k| lagrange_cubic([p0, p1, p2, p3], k as f64 / steps as f64))
        .collect()
}

fn points_attr(points: impl IntoIterator<Item = Point2<f64>>, scale: f64) -> String {
    points
        .into_iter()
        .map(|p| format!("{:.2},{:.2}", p.x * scale, p.y * scale))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_walls(map: &OccupancyMap, s: f64) -> Group {
    let mut group = Group::new().set("id", "walls").set("fill", colors::WALL);
    for y in 0..map.height() {
        let mut x = 0;
        while x < map.width() {
            if map.is_free(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < map.width() && !map.is_free(x, y) {
                x += 1;
            }
            group = group.add(
                Rectangle::new()
                    .set("x", start as f64 * s)
                    .set("y", y as f64 * s)
                    .set("width", (x - start) as f64 * s)
                    .set("height", s),
            );
        }
    }
    group
}

fn render_cells(graph: &TopologyGraph, s: f64) -> Group {
    let mut group = Group::new().set("id", "cells");
    for cell in graph.cells() {
        let fill = colors::CELLS[cell.id().0 % colors::CELLS.len()];
        group = group.add(
            Polygon::new()
                .set("points", points_attr(cell.polygon(), s))
                .set("fill", fill)
                .set("fill-opacity", 0.6)
                .set("stroke", colors::CELL_STROKE)
                .set("stroke-width", 0.5),
        );
    }
    group
}

fn render_graph(graph: &TopologyGraph, events: &[CriticalEvent], cfg: RenderCfg) -> Group {
    let s = cfg.scale;
    let mut group = Group::new().set("id", "graph");
    for cell in graph.cells() {
        group = group.add(
            Polyline::new()
                .set("points", points_attr(edge_curve(graph, cell, cfg.curve_steps), s))
                .set("fill", "none")
                .set("stroke", colors::GRAPH)
                .set("stroke-width", 1.5),
        );
    }
    for v in graph.critical_points() {
        let kind = event_kind(events, v.id());
        let m = v.midpoint();
        group = group.add(
            Circle::new()
                .set("cx", m.x * s)
                .set("cy", m.y * s)
                .set("r", cfg.vertex_radius * s)
                .set("fill", event_color(kind)),
        );
        if cfg.labels {
            group = group.add(vertex_label(v.id(), m, cfg));
        }
    }
    group
}

fn vertex_label(id: VertexId, m: Point2<f64>, cfg: RenderCfg) -> Text {
    let s = cfg.scale;
    Text::new(id.to_string())
        .set("x", (m.x + 1.5 * cfg.vertex_radius) * s)
        .set("y", m.y * s)
        .set("font-size", 3.0 * s)
        .set("fill", "black")
}

/// Draw `graph` over `map`. `events` colours the critical points by kind; pass an
/// empty slice to draw them uniformly.
pub fn render(
    map: &OccupancyMap,
    graph: &TopologyGraph,
    events: &[CriticalEvent],
    cfg: RenderCfg,
) -> Document {
    let s = cfg.scale;
    let (w, h) = (map.width() as f64 * s, map.height() as f64 * s);
    Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0.0, 0.0, w, h))
        .add(
            Rectangle::new()
                .set("width", w)
                .set("height", h)
                .set("fill", colors::BACKGROUND),
        )
        .add(render_walls(map, s))
        .add(render_cells(graph, s))
        .add(render_graph(graph, events, cfg))
}

pub fn save(path: &Path, doc: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating render dir {}", parent.display()))?;
        }
    }
    svg::save(path, doc).with_context(|| format!("writing {}", path.display()))
}

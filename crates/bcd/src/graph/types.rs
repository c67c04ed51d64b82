//! Records stored in the topology graph and the handles that address them.
//!
//! Kept small and explicit so `topology` reads as arena bookkeeping only.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::Point2;

/// Colour given to freshly created vertices and cells unless the caller picks one.
pub const UNSET_COLOR: i32 = -1;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-unique tag for one lifetime of a graph (construction or `clear`).
pub(crate) fn next_epoch() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Vertex handle: an ID stamped with the epoch of the graph that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexHandle {
    pub(crate) id: VertexId,
    pub(crate) epoch: u64,
}

impl VertexHandle {
    #[inline]
    pub fn id(self) -> VertexId {
        self.id
    }
}

/// Edge (cell) handle: an ID stamped with the epoch of the graph that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeHandle {
    pub(crate) id: EdgeId,
    pub(crate) epoch: u64,
}

impl EdgeHandle {
    #[inline]
    pub fn id(self) -> EdgeId {
        self.id
    }
}

/// Critical point: the column `x` where the free-space topology changes, with the
/// vertical extent `[y_top, y_bottom]` of the interval involved in the event.
#[derive(Clone, Debug, PartialEq)]
pub struct CriticalPoint {
    pub(crate) id: VertexId,
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    /// Scratch marking for traversals; `UNSET_COLOR` until set or reset.
    pub color: i32,
}

impl CriticalPoint {
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// `(x, (y_top + y_bottom) / 2)`, the point consumers draw and measure from.
    #[inline]
    pub fn midpoint(&self) -> Point2<f64> {
        Point2::new(self.x, 0.5 * (self.y_top + self.y_bottom))
    }
}

/// Endpoint state of a cell.
///
/// A cell is `Open` right after a birth/split/merge opened it at a single vertex,
/// and `Closed` once the sweep found (or a caller assigned) its other endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Span {
    Open { anchor: VertexId },
    Closed { first: VertexId, second: VertexId },
}

impl Span {
    /// `(first, second)`; an open cell reports its anchor twice.
    #[inline]
    pub fn endpoints(self) -> (VertexId, VertexId) {
        match self {
            Span::Open { anchor } => (anchor, anchor),
            Span::Closed { first, second } => (first, second),
        }
    }

    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Span::Open { .. })
    }

    #[inline]
    pub fn touches(self, v: VertexId) -> bool {
        let (a, b) = self.endpoints();
        a == v || b == v
    }
}

/// Cell (graph edge): a free region traced across consecutive columns.
///
/// Invariants:
/// - `top_boundary.len() == bottom_boundary.len()`; samples are only added in pairs.
/// - `top_boundary[i]` and `bottom_boundary[i]` bound the free run at the i-th column
///   the cell was open for.
/// - Outside the crate only `color` is writable; boundaries cannot be extended
///   through `cell_mut`:
///
/// ```compile_fail
/// use bcd::api::TopologyGraph;
/// use nalgebra::point;
///
/// let mut g = TopologyGraph::new();
/// let v = g.add_vertex(0.0, 0.0, 1.0, 0);
/// let e = g.add_edge(v, v, 0).unwrap();
/// g.cell_mut(e).unwrap().push_sample(point![0.0, 0.0], point![0.0, 1.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub(crate) id: EdgeId,
    pub(crate) span: Span,
    top_boundary: Vec<Point2<f64>>,
    bottom_boundary: Vec<Point2<f64>>,
    /// Scratch marking for traversals; `UNSET_COLOR` until set or reset.
    pub color: i32,
    pub(crate) cost: Option<f64>,
    pub(crate) area: f64,
    pub(crate) travel_cost: Option<f64>,
}

impl Cell {
    pub(crate) fn new(id: EdgeId, span: Span, color: i32) -> Self {
        Self {
            id,
            span,
            top_boundary: Vec::new(),
            bottom_boundary: Vec::new(),
            color,
            cost: None,
            area: 0.0,
            travel_cost: None,
        }
    }

    /// Copy of `self` under a new ID: colour, cost and both boundaries carry over,
    /// area and travel cost start unset.
    pub(crate) fn fork(&self, id: EdgeId) -> Self {
        Self {
            id,
            span: self.span,
            top_boundary: self.top_boundary.clone(),
            bottom_boundary: self.bottom_boundary.clone(),
            color: self.color,
            cost: self.cost,
            area: 0.0,
            travel_cost: None,
        }
    }

    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }
    #[inline]
    pub fn top_boundary(&self) -> &[Point2<f64>] {
        &self.top_boundary
    }
    #[inline]
    pub fn bottom_boundary(&self) -> &[Point2<f64>] {
        &self.bottom_boundary
    }
    /// Number of columns sampled so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.top_boundary.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top_boundary.is_empty() || self.bottom_boundary.is_empty()
    }
    /// `len² / Σ height`; `None` until computed or when there is nothing to divide by.
    #[inline]
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }
    #[inline]
    pub fn travel_cost(&self) -> Option<f64> {
        self.travel_cost
    }

    /// Append one column sample. Only the sweep grows cells; after finalization the
    /// boundaries are fixed so `area` and `cost` stay in step with them.
    pub(crate) fn push_sample(&mut self, top: Point2<f64>, bottom: Point2<f64>) {
        self.top_boundary.push(top);
        self.bottom_boundary.push(bottom);
    }

    /// Paired `(top, bottom)` samples in sweep order.
    pub fn samples(&self) -> impl Iterator<Item = (Point2<f64>, Point2<f64>)> + '_ {
        self.top_boundary
            .iter()
            .copied()
            .zip(self.bottom_boundary.iter().copied())
    }

    /// Height `|top.y - bottom.y|` of every sampled column.
    pub fn column_heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples().map(|(t, b)| (t.y - b.y).abs())
    }

    /// Midpoint of every sampled column.
    pub fn midline(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.samples()
            .map(|(t, b)| crate::geometry::midpoint(t, b))
    }

    /// Closed outline: top boundary forward, then bottom boundary reversed.
    pub fn polygon(&self) -> Vec<Point2<f64>> {
        let mut out = Vec::with_capacity(2 * self.len());
        out.extend(self.top_boundary.iter().copied());
        out.extend(self.bottom_boundary.iter().rev().copied());
        out
    }

    /// `area = Σ |top[i].y - bottom[i].y|`.
    pub fn update_area(&mut self) {
        self.area = self.column_heights().sum();
    }

    /// `cost = len² / Σ height`. Tall narrow cells are cheap, short wide ones expensive.
    pub fn update_cost(&mut self) {
        let sum_h: f64 = self.column_heights().sum();
        let n = self.len() as f64;
        self.cost = if self.is_empty() || sum_h <= 0.0 {
            None
        } else {
            Some(n * n / sum_h)
        };
    }
}

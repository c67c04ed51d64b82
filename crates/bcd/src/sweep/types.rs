//! Column records and event kinds for the sweep.

use nalgebra::Point2;

use crate::graph::{EdgeHandle, VertexId};

/// One free/occupied transition in a column, plus the cell that owns the run
/// ending here (only meaningful when that run is free).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Bound {
    pub point: Point2<f64>,
    /// Whether the run between the previous bound and this one is free.
    pub free_above: bool,
    pub edge: Option<EdgeHandle>,
}

impl Bound {
    #[inline]
    pub fn new(x: f64, y: f64, free_above: bool) -> Self {
        Self {
            point: Point2::new(x, y),
            free_above,
            edge: None,
        }
    }
}

/// Vertical run between two adjacent bounds of one column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub top: f64,
    pub bottom: f64,
    pub free: bool,
}

impl Segment {
    #[inline]
    pub(crate) fn between(top: &Bound, bottom: &Bound) -> Self {
        Self {
            top: top.point.y,
            bottom: bottom.point.y,
            free: bottom.free_above,
        }
    }

    /// Signed length of the shared `y` range; positive only for a real overlap.
    #[inline]
    pub fn overlap(&self, other: &Segment) -> f64 {
        self.bottom.min(other.bottom) - self.top.max(other.top)
    }
}

/// How a run in the previous column relates to a run in the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// A free run appears inside an occupied one.
    Birth,
    /// A free run ends against an occupied one.
    Death,
    /// An obstacle appears inside a free run, splitting it in two.
    Split,
    /// An obstacle ends inside a free run, joining the runs around it.
    Merge,
    /// Free runs overlap; the current run inherits the previous cell.
    Continuation,
}

/// Critical point created during a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CriticalEvent {
    pub kind: Transition,
    pub vertex: VertexId,
    /// Column at which the event was detected.
    pub x: usize,
}

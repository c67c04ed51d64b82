//! Boustrophedon cellular decomposition by a left-to-right column sweep.
//!
//! Purpose
//! - Turn an `OccupancyMap` into a `TopologyGraph` whose vertices are critical
//!   points and whose edges are cells carrying per-column boundary samples.
//!
//! Model
//! - Each column is a list of bounds (free/occupied transitions) bracketed by a
//!   synthetic top bound at `y = -1` and a synthetic bottom bound at `y = H`, so a
//!   free run's height equals its pixel count.
//! - Every run of the previous column is compared against every run of the current
//!   one (`classify`). Birth and Merge open cells, Death and Split close them, and
//!   Continuation hands the open cell to the overlapping run.
//! - Each free run then appends one `(top, bottom)` sample to its cell.
//! - Column `W` is fully blocked, so every cell is closed when the sweep ends.
//! - Afterwards areas, costs and travel costs are computed (in that order) and the
//!   graph is validated. Any error clears the graph.
//!
//! Code cross-refs: `graph::TopologyGraph::{add_edge, modify_end_nodes}`,
//! `map::OccupancyMap::is_free`.

mod build;
mod classify;
mod types;

pub use build::{decompose, decompose_into, Decomposer};
pub use classify::classify;
pub use types::{CriticalEvent, Segment, Transition};

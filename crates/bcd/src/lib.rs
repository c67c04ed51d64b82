//! Boustrophedon cellular decomposition of occupancy maps.
//!
//! A left-to-right column sweep splits the free space of a binary grid into cells
//! and records how they connect in a topology (Reeb) graph: vertices are critical
//! points, edges are cells with per-column boundary samples, area, cost and
//! travel cost.
//!
//! Layout
//! - `map`: occupancy grid, thresholding, random rooms.
//! - `graph`: arena-backed multigraph with stable IDs and epoch-checked handles.
//! - `sweep`: the decomposition itself.
//! - `geometry`: point helpers on `nalgebra::Point2`.
//!
//! API Policy
//! - This crate is project-internal; `api` is the curated surface callers should
//!   import from. Breaking changes are allowed when they improve the design.

pub mod api;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod map;
pub mod sweep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{BcdError, Result};
pub use graph::{EdgeHandle, TopologyGraph, VertexHandle};
pub use map::{MapCfg, OccupancyMap};
pub use sweep::{decompose, decompose_into, Decomposer};

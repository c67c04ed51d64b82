//! Curated internal API (UNSTABLE).
//!
//! Prefer these re-exports over deep module paths so callers stay stable while
//! modules are reorganized.

// Errors
pub use crate::error::{BcdError, Result};
// Occupancy maps
pub use crate::map::rand::{draw_room, ObstacleCount, ReplayToken as RoomReplay, RoomCfg};
pub use crate::map::{MapCfg, OccupancyMap};
// Topology graph
pub use crate::graph::{
    Cell, CriticalPoint, EdgeHandle, EdgeId, GraphDump, Span, TopologyGraph, VertexHandle,
    VertexId, UNSET_COLOR,
};
// Sweep
pub use crate::sweep::{
    classify, decompose, decompose_into, CriticalEvent, Decomposer, Segment, Transition,
};
// Point helpers
pub use crate::geometry::{cross, distance, midpoint, orientation, signed_area, Orientation};

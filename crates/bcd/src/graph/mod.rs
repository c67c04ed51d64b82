//! Topology (Reeb) graph of a cellular decomposition.
//!
//! Purpose
//! - Hold critical points as vertices and cells as edges of an undirected
//!   multigraph, with IDs that stay valid while cells are rewired.
//! - Know nothing about sweeping; `sweep` drives it through the public methods.
//!
//! Model
//! - Arena slots addressed by dense IDs (`VertexId`, `EdgeId`), both counting from 0.
//! - Handles (`VertexHandle`, `EdgeHandle`) carry the graph's epoch; a handle from
//!   another graph, or from before `clear`, is rejected with `InvalidHandle`.
//! - Absence is `Option::None` (`null_vertex()`, `null_edge()`).
//! - A cell is `Span::Open` while only its start is known, `Span::Closed` after
//!   `modify_end_nodes`.
//!
//! Code cross-refs: `sweep::Decomposer`, `geometry::distance`.

mod display;
mod topology;
mod types;

pub use display::GraphDump;
pub use topology::TopologyGraph;
pub use types::{
    Cell, CriticalPoint, EdgeHandle, EdgeId, Span, VertexHandle, VertexId, UNSET_COLOR,
};

#[cfg(test)]
mod tests;

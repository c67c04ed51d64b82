//! Error type shared by the graph, the map constructors, and the sweep.
//!
//! `EmptyGraph` and `IncompleteCell` describe the input map. `InconsistentAssociation`
//! and `InvalidHandle` describe misuse or a broken sweep invariant, so tests can tell
//! "bad map" apart from "algorithm bug".

use thiserror::Error;

use crate::graph::EdgeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BcdError {
    #[error("graph has {vertices} vertices and {edges} edges; need at least 2 vertices and 1 edge")]
    EmptyGraph { vertices: usize, edges: usize },

    #[error("cell {edge} has no boundary samples")]
    IncompleteCell { edge: EdgeId },

    #[error("free run ending at column {x}, y={y} has no open cell")]
    InconsistentAssociation { x: usize, y: f64 },

    #[error("{kind} handle {id} does not belong to this graph")]
    InvalidHandle { kind: &'static str, id: usize },

    #[error("map data has {actual} cells, expected {expected}")]
    MapShape { expected: usize, actual: usize },

    #[error("map line {line}: {reason}")]
    MapParse { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, BcdError>;

//! Arena-backed undirected multigraph of critical points and cells.
//!
//! Slot `i` of `vertices` holds the vertex with ID `i` (likewise for `cells`), so
//! ID → record lookup is an index and IDs never move. Rewiring a cell mutates its
//! span in place and fixes the incidence lists; nothing is ever removed except by
//! `clear`, which also starts a new epoch so handles issued before it go stale.

use std::ops::{Index, IndexMut};

use crate::error::{BcdError, Result};
use crate::geometry;

use super::types::{
    next_epoch, Cell, CriticalPoint, EdgeHandle, EdgeId, Span, VertexHandle, VertexId,
};

#[derive(Debug)]
pub struct TopologyGraph {
    vertices: Vec<CriticalPoint>,
    cells: Vec<Cell>,
    /// Cells touching each vertex, ascending by ID, each listed once.
    incident: Vec<Vec<EdgeId>>,
    epoch: u64,
}

/// A clone is a separate graph: same slots, new epoch, so handles from either side
/// are rejected by the other.
impl Clone for TopologyGraph {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            cells: self.cells.clone(),
            incident: self.incident.clone(),
            epoch: next_epoch(),
        }
    }
}

impl Default for TopologyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            cells: Vec::new(),
            incident: Vec::new(),
            epoch: next_epoch(),
        }
    }

    /// Drop every vertex and cell, reset both ID counters and invalidate all handles.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.cells.clear();
        self.incident.clear();
        self.epoch = next_epoch();
    }

    // ----- construction -----

    pub fn add_vertex(&mut self, x: f64, y_top: f64, y_bottom: f64, color: i32) -> VertexHandle {
        let id = VertexId(self.vertices.len());
        self.vertices.push(CriticalPoint {
            id,
            x,
            y_top,
            y_bottom,
            color,
        });
        self.incident.push(Vec::new());
        self.vhandle(id)
    }

    /// Vertex with zero vertical extent.
    pub fn add_point_vertex(&mut self, x: f64, y: f64, color: i32) -> VertexHandle {
        self.add_vertex(x, y, y, color)
    }

    /// New cell between `v1` and `v2`. `v1 == v2` yields an open cell anchored there.
    pub fn add_edge(&mut self, v1: VertexHandle, v2: VertexHandle, color: i32) -> Result<EdgeHandle> {
        let a = self.check_vertex(v1)?;
        let b = self.check_vertex(v2)?;
        let span = if a == b {
            Span::Open { anchor: a }
        } else {
            Span::Closed { first: a, second: b }
        };
        Ok(self.push_cell(|id| Cell::new(id, span, color)))
    }

    /// Deep copy of `e` under a fresh ID with the same endpoints.
    pub fn clone_edge(&mut self, e: EdgeHandle) -> Result<EdgeHandle> {
        let src = self.check_edge(e)?;
        let template = self.cells[src.0].clone();
        Ok(self.push_cell(|id| template.fork(id)))
    }

    /// Reattach `e` to `(first, second)`; `second == None` keeps the current second
    /// endpoint. ID, boundaries and cost fields are untouched. The cell ends `Closed`.
    pub fn modify_end_nodes(
        &mut self,
        e: EdgeHandle,
        first: VertexHandle,
        second: Option<VertexHandle>,
    ) -> Result<EdgeHandle> {
        let id = self.check_edge(e)?;
        let first = self.check_vertex(first)?;
        let second = match second {
            Some(h) => self.check_vertex(h)?,
            None => self.cells[id.0].span.endpoints().1,
        };
        self.detach(id);
        self.cells[id.0].span = Span::Closed { first, second };
        self.attach(id);
        Ok(e)
    }

    // ----- queries -----

    /// Shared endpoint of two cells: `e2`'s first endpoint is tried, then its second.
    pub fn find_common_vertex(
        &self,
        e1: Option<EdgeHandle>,
        e2: Option<EdgeHandle>,
    ) -> Result<Option<VertexHandle>> {
        let (Some(e1), Some(e2)) = (e1, e2) else {
            return Ok(None);
        };
        let s1 = self.cells[self.check_edge(e1)?.0].span;
        let (c, d) = self.cells[self.check_edge(e2)?.0].span.endpoints();
        let common = [c, d].into_iter().find(|&v| s1.touches(v));
        Ok(common.map(|v| self.vhandle(v)))
    }

    pub fn end_nodes(&self, e: EdgeHandle) -> Result<(VertexHandle, VertexHandle)> {
        let (a, b) = self.cells[self.check_edge(e)?.0].span.endpoints();
        Ok((self.vhandle(a), self.vhandle(b)))
    }

    pub fn vertex(&self, v: VertexHandle) -> Result<&CriticalPoint> {
        let id = self.check_vertex(v)?;
        Ok(&self.vertices[id.0])
    }

    pub fn vertex_mut(&mut self, v: VertexHandle) -> Result<&mut CriticalPoint> {
        let id = self.check_vertex(v)?;
        Ok(&mut self.vertices[id.0])
    }

    pub fn cell(&self, e: EdgeHandle) -> Result<&Cell> {
        let id = self.check_edge(e)?;
        Ok(&self.cells[id.0])
    }

    pub fn cell_mut(&mut self, e: EdgeHandle) -> Result<&mut Cell> {
        let id = self.check_edge(e)?;
        Ok(&mut self.cells[id.0])
    }

    pub fn vertex_handle(&self, id: VertexId) -> Option<VertexHandle> {
        (id.0 < self.vertices.len()).then(|| self.vhandle(id))
    }

    pub fn edge_handle(&self, id: EdgeId) -> Option<EdgeHandle> {
        (id.0 < self.cells.len()).then(|| self.ehandle(id))
    }

    /// Vertex with ID 0, if any.
    pub fn first_vertex(&self) -> Option<VertexHandle> {
        self.vertex_handle(VertexId(0))
    }

    /// All vertex handles in ascending ID order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        (0..self.vertices.len()).map(move |i| self.vhandle(VertexId(i)))
    }

    /// All edge handles in ascending ID order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeHandle> + '_ {
        (0..self.cells.len()).map(move |i| self.ehandle(EdgeId(i)))
    }

    /// Cells incident to `v`, ascending by ID; a self-loop appears once.
    pub fn out_edges(&self, v: VertexHandle) -> Result<impl Iterator<Item = EdgeHandle> + '_> {
        let id = self.check_vertex(v)?;
        Ok(self.incident[id.0].iter().map(move |&e| self.ehandle(e)))
    }

    pub fn degree(&self, v: VertexHandle) -> Result<usize> {
        let id = self.check_vertex(v)?;
        Ok(self.incident[id.0].len())
    }

    pub fn critical_points(&self) -> impl Iterator<Item = &CriticalPoint> + '_ {
        self.vertices.iter()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.cells.len()
    }
    /// True when the graph has no vertices or no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.cells.is_empty()
    }

    #[inline]
    pub fn null_vertex() -> Option<VertexHandle> {
        None
    }
    #[inline]
    pub fn null_edge() -> Option<EdgeHandle> {
        None
    }

    /// Structural equality of the ID tables. Not an isomorphism test: two graphs
    /// built in a different order compare unequal.
    pub fn equals(&self, other: &TopologyGraph) -> bool {
        self.vertices.len() == other.vertices.len()
            && self.cells.len() == other.cells.len()
            && self
                .vertices
                .iter()
                .zip(&other.vertices)
                .all(|(a, b)| a.id == b.id)
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.id == b.id && a.span == b.span)
    }

    // ----- colours -----

    pub fn reset_all_vertex_color(&mut self) {
        self.vertices.iter_mut().for_each(|v| v.color = 0);
    }

    pub fn reset_all_edge_color(&mut self) {
        self.cells.iter_mut().for_each(|c| c.color = 0);
    }

    pub fn reset_all_color(&mut self) {
        self.reset_all_vertex_color();
        self.reset_all_edge_color();
    }

    // ----- derived cell quantities -----

    pub fn update_cell_areas(&mut self) {
        self.cells.iter_mut().for_each(Cell::update_area);
    }

    pub fn update_cell_costs(&mut self) {
        self.cells.iter_mut().for_each(Cell::update_cost);
    }

    /// Euclidean distance between the midpoints of each cell's endpoints.
    pub fn update_travel_costs(&mut self) {
        let vertices = &self.vertices;
        for cell in &mut self.cells {
            let (a, b) = cell.span.endpoints();
            let d = geometry::distance(vertices[a.0].midpoint(), vertices[b.0].midpoint());
            cell.travel_cost = Some(d);
        }
    }

    // ----- internals -----

    #[inline]
    fn vhandle(&self, id: VertexId) -> VertexHandle {
        VertexHandle {
            id,
            epoch: self.epoch,
        }
    }

    #[inline]
    fn ehandle(&self, id: EdgeId) -> EdgeHandle {
        EdgeHandle {
            id,
            epoch: self.epoch,
        }
    }

    fn check_vertex(&self, v: VertexHandle) -> Result<VertexId> {
        if v.epoch != self.epoch || v.id.0 >= self.vertices.len() {
            return Err(BcdError::InvalidHandle {
                kind: "vertex",
                id: v.id.0,
            });
        }
        Ok(v.id)
    }

    fn check_edge(&self, e: EdgeHandle) -> Result<EdgeId> {
        if e.epoch != self.epoch || e.id.0 >= self.cells.len() {
            return Err(BcdError::InvalidHandle {
                kind: "edge",
                id: e.id.0,
            });
        }
        Ok(e.id)
    }

    fn push_cell(&mut self, make: impl FnOnce(EdgeId) -> Cell) -> EdgeHandle {
        let id = EdgeId(self.cells.len());
        self.cells.push(make(id));
        self.attach(id);
        self.ehandle(id)
    }

    fn attach(&mut self, e: EdgeId) {
        let (a, b) = self.cells[e.0].span.endpoints();
        for v in [a, b] {
            let list = &mut self.incident[v.0];
            if let Err(pos) = list.binary_search(&e) {
                list.insert(pos, e);
            }
        }
    }

    fn detach(&mut self, e: EdgeId) {
        let (a, b) = self.cells[e.0].span.endpoints();
        for v in [a, b] {
            let list = &mut self.incident[v.0];
            if let Ok(pos) = list.binary_search(&e) {
                list.remove(pos);
            }
        }
    }
}

/// Unchecked lookup by ID; panics when out of range.
impl Index<VertexId> for TopologyGraph {
    type Output = CriticalPoint;
    fn index(&self, id: VertexId) -> &CriticalPoint {
        &self.vertices[id.0]
    }
}

impl IndexMut<VertexId> for TopologyGraph {
    fn index_mut(&mut self, id: VertexId) -> &mut CriticalPoint {
        &mut self.vertices[id.0]
    }
}

impl Index<EdgeId> for TopologyGraph {
    type Output = Cell;
    fn index(&self, id: EdgeId) -> &Cell {
        &self.cells[id.0]
    }
}

impl IndexMut<EdgeId> for TopologyGraph {
    fn index_mut(&mut self, id: EdgeId) -> &mut Cell {
        &mut self.cells[id.0]
    }
}

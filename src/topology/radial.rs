//! Radial cycles: the ring of loops sharing one edge.
//!
//! The length of an edge's radial cycle is the number of faces using it:
//! 0 for a wire edge, 1 on a boundary, 2 for a manifold interior edge and
//! more for a non-manifold edge. All of these are ordinary states here.

use crate::geometry::metrics::{distance, midpoint};
use crate::mesh_error::MeshError;
use crate::topology::_debug_invariants::{corrupted, inv_assert};
use crate::topology::ids::{EdgeId, FaceId, LoopId};
use crate::topology::mesh::Mesh;

/// Lazy walk over the radial cycle of one edge.
#[derive(Clone, Debug)]
pub struct RadialLoops<'a> {
    mesh: &'a Mesh,
    edge: EdgeId,
    start: Option<LoopId>,
    cur: Option<LoopId>,
    budget: usize,
}

impl Iterator for RadialLoops<'_> {
    type Item = LoopId;

    fn next(&mut self) -> Option<LoopId> {
        let cur = self.cur?;
        if self.budget == 0 {
            corrupted!("radial cycle of {} does not close", self.edge);
        }
        self.budget -= 1;
        let rec = self.mesh.lp(cur);
        if rec.edge != self.edge {
            corrupted!("loop {cur} in radial cycle of {} uses edge {}", self.edge, rec.edge);
        }
        self.cur = (Some(rec.radial_next) != self.start).then_some(rec.radial_next);
        Some(cur)
    }
}

impl Mesh {
    pub(crate) fn radial_loops(&self, e: EdgeId) -> RadialLoops<'_> {
        let start = self.ed(e).loop_;
        RadialLoops {
            mesh: self,
            edge: e,
            start,
            cur: start,
            budget: self.loops.len(),
        }
    }

    /// Loops using `e`, in radial order. Empty for a wire edge.
    pub fn edge_loops(&self, e: EdgeId) -> Result<RadialLoops<'_>, MeshError> {
        self.try_edge(e)?;
        Ok(self.radial_loops(e))
    }

    /// Faces using `e`, in radial order, each once.
    pub fn edge_faces(&self, e: EdgeId) -> Result<impl Iterator<Item = FaceId> + '_, MeshError> {
        Ok(self.edge_loops(e)?.map(|l| self.lp(l).face))
    }

    /// Number of faces using `e` (the radial cycle length).
    pub fn edge_degree(&self, e: EdgeId) -> Result<usize, MeshError> {
        Ok(self.edge_loops(e)?.count())
    }

    /// True when no face uses `e`.
    pub fn is_wire_edge(&self, e: EdgeId) -> Result<bool, MeshError> {
        Ok(self.try_edge(e)?.loop_.is_none())
    }

    /// True when exactly one face uses `e`.
    pub fn is_boundary_edge(&self, e: EdgeId) -> Result<bool, MeshError> {
        Ok(self.edge_degree(e)? == 1)
    }

    /// True when at most two faces use `e`.
    pub fn is_manifold_edge(&self, e: EdgeId) -> Result<bool, MeshError> {
        Ok(self.edge_degree(e)? <= 2)
    }

    /// Midpoint of `e`.
    pub fn edge_center(&self, e: EdgeId) -> Result<[f64; 3], MeshError> {
        let [a, b] = self.try_edge(e)?.verts;
        Ok(midpoint(self.vx(a).position, self.vx(b).position))
    }

    /// Length of `e`.
    pub fn edge_length(&self, e: EdgeId) -> Result<f64, MeshError> {
        let [a, b] = self.try_edge(e)?.verts;
        Ok(distance(self.vx(a).position, self.vx(b).position))
    }

    /// Appends `l` to the radial cycle of its edge.
    pub(crate) fn radial_attach(&mut self, l: LoopId) {
        let e = self.lp(l).edge;
        match self.ed(e).loop_ {
            None => {
                let rec = self.lp_mut(l);
                rec.radial_next = l;
                rec.radial_prev = l;
                self.ed_mut(e).loop_ = Some(l);
            }
            Some(first) => {
                let last = self.lp(first).radial_prev;
                self.lp_mut(last).radial_next = l;
                self.lp_mut(first).radial_prev = l;
                let rec = self.lp_mut(l);
                rec.radial_prev = last;
                rec.radial_next = first;
            }
        }
    }

    /// Removes `l` from the radial cycle of its edge.
    pub(crate) fn radial_detach(&mut self, l: LoopId) {
        let rec = self.lp(l);
        let (e, next, prev) = (rec.edge, rec.radial_next, rec.radial_prev);
        if next == l {
            inv_assert!(prev == l, "loop {l} is half-linked in its radial cycle");
            self.ed_mut(e).loop_ = None;
        } else {
            self.lp_mut(prev).radial_next = next;
            self.lp_mut(next).radial_prev = prev;
            if self.ed(e).loop_ == Some(l) {
                self.ed_mut(e).loop_ = Some(next);
            }
        }
        let rec = self.lp_mut(l);
        rec.radial_next = l;
        rec.radial_prev = l;
    }
}

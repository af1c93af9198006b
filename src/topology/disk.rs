//! Disk cycles: the ring of edges around each vertex.
//!
//! Every edge carries one [`DiskLink`](crate::topology::entity::DiskLink) per
//! endpoint. Following `next` around a vertex `v` from `v.edge` visits every
//! edge incident to `v` exactly once and returns to the start. New edges are
//! appended before the entry edge, so disk order is creation order.

use crate::mesh_error::MeshError;
use crate::topology::_debug_invariants::{corrupted, inv_assert};
use crate::topology::entity::DiskLink;
use crate::topology::ids::{EdgeId, FaceId, LoopId, VertexId};
use crate::topology::mesh::Mesh;

/// Lazy walk over the disk cycle of one vertex.
///
/// Borrows the mesh for its whole lifetime, so the cycle cannot change while
/// the walk is in progress. A walk that does not return to its start within
/// the number of edges in the mesh panics as corruption.
#[derive(Clone, Debug)]
pub struct DiskEdges<'a> {
    mesh: &'a Mesh,
    vert: VertexId,
    start: Option<EdgeId>,
    cur: Option<EdgeId>,
    budget: usize,
}

impl<'a> DiskEdges<'a> {
    fn new(mesh: &'a Mesh, vert: VertexId, start: Option<EdgeId>) -> Self {
        Self {
            mesh,
            vert,
            start,
            cur: start,
            budget: mesh.edges.len(),
        }
    }
}

impl Iterator for DiskEdges<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let cur = self.cur?;
        if self.budget == 0 {
            corrupted!("disk cycle of {} does not close", self.vert);
        }
        self.budget -= 1;
        let link = self
            .mesh
            .ed(cur)
            .disk_link(self.vert)
            .unwrap_or_else(|| corrupted!("edge {cur} in disk of {} does not touch it", self.vert));
        self.cur = (Some(link.next) != self.start).then_some(link.next);
        Some(cur)
    }
}

impl Mesh {
    /// Edges incident to `v`, in disk order. Empty for an isolated vertex.
    pub fn vertex_edges(&self, v: VertexId) -> Result<DiskEdges<'_>, MeshError> {
        self.try_vertex(v)?;
        Ok(self.disk_edges(v))
    }

    /// Disk walk for a vertex already known to exist.
    pub(crate) fn disk_edges(&self, v: VertexId) -> DiskEdges<'_> {
        DiskEdges::new(self, v, self.vx(v).edge)
    }

    /// Number of edges incident to `v`.
    pub fn vertex_degree(&self, v: VertexId) -> Result<usize, MeshError> {
        Ok(self.vertex_edges(v)?.count())
    }

    /// The disk-cycle entry edge of `v`.
    ///
    /// # Errors
    /// [`MeshError::IsolatedVertex`] when `v` has degree 0.
    pub fn vertex_first_edge(&self, v: VertexId) -> Result<EdgeId, MeshError> {
        self.try_vertex(v)?.edge.ok_or(MeshError::IsolatedVertex(v))
    }

    /// Vertices adjacent to `v` through an edge, in disk order.
    pub fn vertex_neighbors(
        &self,
        v: VertexId,
    ) -> Result<impl Iterator<Item = VertexId> + '_, MeshError> {
        Ok(self.vertex_edges(v)?.map(move |e| {
            self.ed(e)
                .other_vertex(v)
                .unwrap_or_else(|| corrupted!("edge {e} in disk of {v} does not touch it"))
        }))
    }

    /// Corners of `v`: the loops whose vertex is `v`, one per incident face.
    pub fn vertex_loops(
        &self,
        v: VertexId,
    ) -> Result<impl Iterator<Item = LoopId> + '_, MeshError> {
        Ok(self.vertex_edges(v)?.flat_map(move |e| {
            self.radial_loops(e).filter(move |&l| self.lp(l).vert == v)
        }))
    }

    /// Faces using `v`, each once.
    pub fn vertex_faces(
        &self,
        v: VertexId,
    ) -> Result<impl Iterator<Item = FaceId> + '_, MeshError> {
        Ok(self.vertex_loops(v)?.map(|l| self.lp(l).face))
    }

    /// The edge after `e` in the disk cycle of `v`.
    pub fn disk_next(&self, e: EdgeId, v: VertexId) -> Result<EdgeId, MeshError> {
        Ok(self.incident_link(e, v)?.next)
    }

    /// The edge before `e` in the disk cycle of `v`.
    pub fn disk_prev(&self, e: EdgeId, v: VertexId) -> Result<EdgeId, MeshError> {
        Ok(self.incident_link(e, v)?.prev)
    }

    fn incident_link(&self, e: EdgeId, v: VertexId) -> Result<DiskLink, MeshError> {
        self.try_vertex(v)?;
        self.try_edge(e)?
            .disk_link(v)
            .ok_or(MeshError::NotIncident { edge: e, vertex: v })
    }

    fn disk_link_mut(&mut self, e: EdgeId, v: VertexId) -> &mut DiskLink {
        let edge = self.ed_mut(e);
        match edge.side(v) {
            Some(s) => &mut edge.disk[s],
            None => corrupted!("edge {e} in disk of {v} does not touch it"),
        }
    }

    /// Splices a freshly created edge into the disk cycles of both endpoints.
    pub(crate) fn disk_link_edge(&mut self, e: EdgeId) {
        let verts = self.ed(e).verts;
        for (side, v) in verts.into_iter().enumerate() {
            match self.vx(v).edge {
                None => {
                    self.ed_mut(e).disk[side] = DiskLink::solo(e);
                    self.vx_mut(v).edge = Some(e);
                }
                Some(first) => {
                    let last = self.disk_link_mut(first, v).prev;
                    self.ed_mut(e).disk[side] = DiskLink {
                        next: first,
                        prev: last,
                    };
                    self.disk_link_mut(first, v).prev = e;
                    self.disk_link_mut(last, v).next = e;
                }
            }
        }
    }

    /// Removes `e` from the disk cycles of both endpoints.
    ///
    /// The edge must no longer be used by any loop.
    pub(crate) fn disk_unlink_edge(&mut self, e: EdgeId) {
        inv_assert!(self.ed(e).loop_.is_none(), "unlinking edge {e} still used by a face");
        let edge = self.ed(e);
        let (verts, links) = (edge.verts, edge.disk);
        for (v, link) in verts.into_iter().zip(links) {
            if link.next == e {
                inv_assert!(link.prev == e);
                self.vx_mut(v).edge = None;
                continue;
            }
            self.disk_link_mut(link.prev, v).next = link.next;
            self.disk_link_mut(link.next, v).prev = link.prev;
            if self.vx(v).edge == Some(e) {
                self.vx_mut(v).edge = Some(link.next);
            }
        }
        self.ed_mut(e).disk = [DiskLink::solo(e), DiskLink::solo(e)];
    }
}

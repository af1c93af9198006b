//! Entity records owned by a [`Mesh`](crate::topology::mesh::Mesh).
//!
//! Records only hold ids; every cross-reference is a non-owning relation
//! maintained by the mesh. Fields are readable by anyone and writable only
//! inside the crate, so the cycle invariants can be relied upon by every
//! consumer of a `&Mesh`.

use crate::data::attribute::AttributeMap;
use crate::topology::ids::{EdgeId, FaceId, LoopId, VertexId};

/// A point in space plus an entry into its disk cycle.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub(crate) position: [f64; 3],
    /// Any incident edge; `None` exactly when the vertex has degree 0.
    pub(crate) edge: Option<EdgeId>,
    pub(crate) attributes: AttributeMap,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, position: [f64; 3]) -> Self {
        Self {
            id,
            position,
            edge: None,
            attributes: AttributeMap::new(),
        }
    }

    /// This vertex's id.
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Position in space.
    #[inline]
    pub fn position(&self) -> [f64; 3] {
        self.position
    }

    /// Entry point into the disk cycle.
    #[inline]
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    /// Attribute values stored on this vertex.
    #[inline]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}

/// Neighbors of an edge in the disk cycle around one of its endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiskLink {
    /// Following edge around the endpoint.
    pub next: EdgeId,
    /// Preceding edge around the endpoint.
    pub prev: EdgeId,
}

impl DiskLink {
    /// A link pointing back at `edge` on both sides (single-edge disk cycle).
    pub(crate) fn solo(edge: EdgeId) -> Self {
        Self {
            next: edge,
            prev: edge,
        }
    }
}

/// A pair of distinct endpoints plus its disk and radial links.
///
/// `disk[i]` links this edge into the disk cycle of `verts[i]`.
#[derive(Clone, Debug)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) verts: [VertexId; 2],
    pub(crate) disk: [DiskLink; 2],
    /// Any loop using this edge; `None` for a wire edge.
    pub(crate) loop_: Option<LoopId>,
    pub(crate) attributes: AttributeMap,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, a: VertexId, b: VertexId) -> Self {
        Self {
            id,
            verts: [a, b],
            disk: [DiskLink::solo(id), DiskLink::solo(id)],
            loop_: None,
            attributes: AttributeMap::new(),
        }
    }

    /// This edge's id.
    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// The two endpoints, in creation order.
    #[inline]
    pub fn verts(&self) -> [VertexId; 2] {
        self.verts
    }

    /// Entry point into the radial cycle.
    #[inline]
    pub fn loop_(&self) -> Option<LoopId> {
        self.loop_
    }

    /// Attribute values stored on this edge.
    #[inline]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// True when `v` is one of the endpoints.
    #[inline]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.verts[0] == v || self.verts[1] == v
    }

    /// The endpoint opposite to `v`, or `None` if `v` is not an endpoint.
    pub fn other_vertex(&self, v: VertexId) -> Option<VertexId> {
        match self.side(v)? {
            0 => Some(self.verts[1]),
            _ => Some(self.verts[0]),
        }
    }

    /// True when this edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.verts[0] == a && self.verts[1] == b) || (self.verts[0] == b && self.verts[1] == a)
    }

    /// Index of `v` in `verts`.
    #[inline]
    pub(crate) fn side(&self, v: VertexId) -> Option<usize> {
        if self.verts[0] == v {
            Some(0)
        } else if self.verts[1] == v {
            Some(1)
        } else {
            None
        }
    }

    /// Disk link around endpoint `v`.
    pub fn disk_link(&self, v: VertexId) -> Option<DiskLink> {
        self.side(v).map(|s| self.disk[s])
    }
}

/// One use of a vertex by a face.
///
/// `edge` leads from `vert` to the vertex of `next`. The loop belongs to two
/// cycles at once: the boundary of `face` (`next`/`prev`) and the set of loops
/// sharing `edge` (`radial_next`/`radial_prev`).
#[derive(Clone, Debug)]
pub struct Loop {
    pub(crate) id: LoopId,
    pub(crate) vert: VertexId,
    pub(crate) edge: EdgeId,
    pub(crate) face: FaceId,
    pub(crate) next: LoopId,
    pub(crate) prev: LoopId,
    pub(crate) radial_next: LoopId,
    pub(crate) radial_prev: LoopId,
    pub(crate) attributes: AttributeMap,
}

impl Loop {
    pub(crate) fn new(id: LoopId, vert: VertexId, edge: EdgeId, face: FaceId) -> Self {
        Self {
            id,
            vert,
            edge,
            face,
            next: id,
            prev: id,
            radial_next: id,
            radial_prev: id,
            attributes: AttributeMap::new(),
        }
    }

    /// This loop's id.
    #[inline]
    pub fn id(&self) -> LoopId {
        self.id
    }

    /// The corner vertex; the edge runs from here to `next().vert()`.
    #[inline]
    pub fn vert(&self) -> VertexId {
        self.vert
    }

    /// The boundary edge leaving this corner.
    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// The face this corner belongs to.
    #[inline]
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// Next corner around the face.
    #[inline]
    pub fn next(&self) -> LoopId {
        self.next
    }

    /// Previous corner around the face.
    #[inline]
    pub fn prev(&self) -> LoopId {
        self.prev
    }

    /// Next loop using the same edge.
    #[inline]
    pub fn radial_next(&self) -> LoopId {
        self.radial_next
    }

    /// Previous loop using the same edge.
    #[inline]
    pub fn radial_prev(&self) -> LoopId {
        self.radial_prev
    }

    /// Per-corner attribute values (UVs and the like).
    #[inline]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}

/// A polygon: an entry point into its loop cycle.
#[derive(Clone, Debug)]
pub struct Face {
    pub(crate) id: FaceId,
    /// Cached loop-cycle length.
    pub(crate) vertcount: usize,
    /// `None` only while the face is being built.
    pub(crate) loop_: Option<LoopId>,
    pub(crate) attributes: AttributeMap,
}

impl Face {
    pub(crate) fn new(id: FaceId) -> Self {
        Self {
            id,
            vertcount: 0,
            loop_: None,
            attributes: AttributeMap::new(),
        }
    }

    /// This face's id.
    #[inline]
    pub fn id(&self) -> FaceId {
        self.id
    }

    /// Number of corners (and boundary edges).
    #[inline]
    pub fn vertcount(&self) -> usize {
        self.vertcount
    }

    /// Entry point into the loop cycle.
    #[inline]
    pub fn loop_(&self) -> Option<LoopId> {
        self.loop_
    }

    /// Attribute values stored on this face.
    #[inline]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: u64) -> VertexId {
        VertexId::new(raw).unwrap()
    }

    #[test]
    fn new_edge_is_solo_in_both_disks() {
        let id = EdgeId::new(1).unwrap();
        let e = Edge::new(id, v(1), v(2));
        assert_eq!(e.disk_link(v(1)), Some(DiskLink::solo(id)));
        assert_eq!(e.disk_link(v(2)), Some(DiskLink::solo(id)));
        assert_eq!(e.disk_link(v(3)), None);
        assert!(e.loop_().is_none());
    }

    #[test]
    fn other_vertex_and_connects() {
        let e = Edge::new(EdgeId::new(1).unwrap(), v(4), v(9));
        assert_eq!(e.other_vertex(v(4)), Some(v(9)));
        assert_eq!(e.other_vertex(v(9)), Some(v(4)));
        assert_eq!(e.other_vertex(v(1)), None);
        assert!(e.connects(v(9), v(4)));
        assert!(!e.connects(v(9), v(1)));
        assert!(e.contains_vertex(v(4)));
    }

    #[test]
    fn fresh_face_is_empty() {
        let f = Face::new(FaceId::new(1).unwrap());
        assert_eq!(f.vertcount(), 0);
        assert!(f.loop_().is_none());
        assert!(f.attributes().is_empty());
    }
}

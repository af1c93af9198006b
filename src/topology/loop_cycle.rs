//! Face loop cycles: the ordered boundary of each face.
//!
//! A face stores a single entry loop; everything else (corner vertices,
//! boundary edges, loop lookup, centroid) is derived by walking `next` from
//! there. Vertex and edge enumeration read the same walk, so `edges[i]`
//! always joins `vertices[i]` to `vertices[(i + 1) % n]`.
//!
//! Every walk carries a step budget equal to the face's cached `vertcount`.
//! A cycle that is longer or shorter than the cached count, or that passes
//! through a loop of another face, panics as corruption.

use crate::geometry::metrics::{centroid, polygon_area, polygon_normal};
use crate::mesh_error::MeshError;
use crate::topology::_debug_invariants::corrupted;
use crate::topology::ids::{EdgeId, FaceId, LoopId, VertexId};
use crate::topology::mesh::Mesh;

/// Lazy walk over the loop cycle of one face.
///
/// Each call to [`Mesh::face_loops`] starts a fresh, independent walk. The
/// walk borrows the mesh; callers that need to edit the mesh based on what
/// they see should collect first or use [`Mesh::face_boundary`].
#[derive(Clone, Debug)]
pub struct FaceLoops<'a> {
    mesh: &'a Mesh,
    face: FaceId,
    start: Option<LoopId>,
    cur: Option<LoopId>,
    budget: usize,
}

impl Iterator for FaceLoops<'_> {
    type Item = LoopId;

    fn next(&mut self) -> Option<LoopId> {
        let cur = self.cur?;
        if self.budget == 0 {
            corrupted!("loop cycle of {} is longer than its vertcount", self.face);
        }
        self.budget -= 1;
        let rec = self.mesh.lp(cur);
        if rec.face != self.face {
            corrupted!("loop {cur} on the boundary of {} belongs to {}", self.face, rec.face);
        }
        if Some(rec.next) == self.start {
            if self.budget != 0 {
                corrupted!("loop cycle of {} is shorter than its vertcount", self.face);
            }
            self.cur = None;
        } else {
            self.cur = Some(rec.next);
        }
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cur {
            Some(_) => (self.budget, Some(self.budget)),
            None => (0, Some(0)),
        }
    }
}

/// An owned copy of a face boundary, detached from the mesh.
///
/// Stays valid (as data) across later edits, unlike the lazy walks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceBoundary {
    pub face: FaceId,
    pub loops: Vec<LoopId>,
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
}

impl FaceBoundary {
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }
}

impl Mesh {
    /// Loops of `f` in boundary order, starting at the face's entry loop.
    ///
    /// Empty when the face has no loop.
    pub fn face_loops(&self, f: FaceId) -> Result<FaceLoops<'_>, MeshError> {
        let face = self.try_face(f)?;
        if face.loop_.is_none() && face.vertcount != 0 {
            corrupted!("face {f} has vertcount {} but no loop", face.vertcount);
        }
        Ok(FaceLoops {
            mesh: self,
            face: f,
            start: face.loop_,
            cur: face.loop_,
            budget: face.vertcount,
        })
    }

    /// Corner vertices of `f` in boundary order.
    pub fn face_vertices(
        &self,
        f: FaceId,
    ) -> Result<impl Iterator<Item = VertexId> + '_, MeshError> {
        Ok(self.face_loops(f)?.map(|l| self.lp(l).vert))
    }

    /// Boundary edges of `f`, in the same order as [`Mesh::face_vertices`].
    pub fn face_edges(&self, f: FaceId) -> Result<impl Iterator<Item = EdgeId> + '_, MeshError> {
        Ok(self.face_loops(f)?.map(|l| self.lp(l).edge))
    }

    /// The loop of `f` whose vertex is `v`, or `None` if `v` is not a corner.
    pub fn find_loop(&self, f: FaceId, v: VertexId) -> Result<Option<LoopId>, MeshError> {
        Ok(self.face_loops(f)?.find(|&l| self.lp(l).vert == v))
    }

    /// Arithmetic mean of the corner positions of `f`.
    ///
    /// # Errors
    /// [`MeshError::EmptyFace`] when the face has no vertices.
    pub fn face_center(&self, f: FaceId) -> Result<[f64; 3], MeshError> {
        centroid(self.face_vertices(f)?.map(|v| self.vx(v).position))
            .ok_or(MeshError::EmptyFace(f))
    }

    /// Unit normal of `f` by Newell's method, following the boundary order.
    ///
    /// # Errors
    /// [`MeshError::DegenerateFace`] when the polygon has zero area.
    pub fn face_normal(&self, f: FaceId) -> Result<[f64; 3], MeshError> {
        let points: Vec<[f64; 3]> = self.face_vertices(f)?.map(|v| self.vx(v).position).collect();
        polygon_normal(&points).ok_or(MeshError::DegenerateFace(f))
    }

    /// Area of `f` by Newell's method. Exact for planar polygons; for a
    /// warped one it is the area of the projection onto its best-fit plane.
    pub fn face_area(&self, f: FaceId) -> Result<f64, MeshError> {
        let points: Vec<[f64; 3]> = self.face_vertices(f)?.map(|v| self.vx(v).position).collect();
        Ok(polygon_area(&points))
    }

    /// Faces sharing at least one edge with `f`, each once, in boundary order.
    pub fn face_neighbors(&self, f: FaceId) -> Result<Vec<FaceId>, MeshError> {
        let mut out: Vec<FaceId> = Vec::new();
        for e in self.face_edges(f)? {
            for g in self.radial_loops(e).map(|l| self.lp(l).face) {
                if g != f && !out.contains(&g) {
                    out.push(g);
                }
            }
        }
        Ok(out)
    }

    /// Copies the boundary of `f` out of the mesh.
    pub fn face_boundary(&self, f: FaceId) -> Result<FaceBoundary, MeshError> {
        let loops: Vec<LoopId> = self.face_loops(f)?.collect();
        let vertices = loops.iter().map(|&l| self.lp(l).vert).collect();
        let edges = loops.iter().map(|&l| self.lp(l).edge).collect();
        Ok(FaceBoundary {
            face: f,
            loops,
            vertices,
            edges,
        })
    }
}

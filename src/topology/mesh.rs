//! The mesh container: owner of every vertex, edge, loop and face.
//!
//! [`Mesh`] keeps one registry per entity kind, keyed by stable ids handed out
//! from monotonic counters. It is the only place where entities are created or
//! destroyed and where cycle links are rewired; every mutating method leaves
//! the disk, radial and loop cycles closed and consistent before returning.
//!
//! Registries are ordered by id, so the enumerate-all iterators
//! ([`Mesh::vertices`], [`Mesh::faces`], ...) are deterministic and follow
//! creation order.
//!
//! Navigation lives next to the cycle it walks:
//! [`disk`](crate::topology::disk) for vertices,
//! [`radial`](crate::topology::radial) for edges and
//! [`loop_cycle`](crate::topology::loop_cycle) for faces.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use itertools::Itertools;

use crate::data::attribute::{AttributeDefinition, AttributeMap, AttributeSchema, AttributeValue};
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::_debug_invariants::corrupted;
use crate::topology::entity::{Edge, Face, Loop, Vertex};
use crate::topology::ids::{EdgeId, EntityId, EntityKind, FaceId, IdCounter, LoopId, VertexId};
use crate::topology::validation::{ValidationOptions, validate_mesh, validate_region};

/// A non-manifold polygon mesh.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub(crate) vertices: BTreeMap<VertexId, Vertex>,
    pub(crate) edges: BTreeMap<EdgeId, Edge>,
    pub(crate) loops: BTreeMap<LoopId, Loop>,
    pub(crate) faces: BTreeMap<FaceId, Face>,
    vertex_ids: IdCounter,
    edge_ids: IdCounter,
    loop_ids: IdCounter,
    face_ids: IdCounter,
    schema: AttributeSchema,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Record lookup
    // ------------------------------------------------------------------

    /// The vertex record for `v`, if it exists.
    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(&v)
    }

    /// The edge record for `e`, if it exists.
    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(&e)
    }

    /// The loop record for `l`, if it exists.
    pub fn get_loop(&self, l: LoopId) -> Option<&Loop> {
        self.loops.get(&l)
    }

    /// The face record for `f`, if it exists.
    pub fn face(&self, f: FaceId) -> Option<&Face> {
        self.faces.get(&f)
    }

    pub(crate) fn try_vertex(&self, v: VertexId) -> Result<&Vertex, MeshError> {
        self.vertices.get(&v).ok_or(MeshError::UnknownVertex(v))
    }

    pub(crate) fn try_edge(&self, e: EdgeId) -> Result<&Edge, MeshError> {
        self.edges.get(&e).ok_or(MeshError::UnknownEdge(e))
    }

    pub(crate) fn try_face(&self, f: FaceId) -> Result<&Face, MeshError> {
        self.faces.get(&f).ok_or(MeshError::UnknownFace(f))
    }

    // Lookups of ids reached through a cycle link. A miss means a dangling
    // reference, which is corruption rather than a caller error.

    #[inline]
    pub(crate) fn vx(&self, v: VertexId) -> &Vertex {
        self.vertices
            .get(&v)
            .unwrap_or_else(|| corrupted!("dangling reference to vertex {v}"))
    }

    #[inline]
    pub(crate) fn vx_mut(&mut self, v: VertexId) -> &mut Vertex {
        self.vertices
            .get_mut(&v)
            .unwrap_or_else(|| corrupted!("dangling reference to vertex {v}"))
    }

    #[inline]
    pub(crate) fn ed(&self, e: EdgeId) -> &Edge {
        self.edges
            .get(&e)
            .unwrap_or_else(|| corrupted!("dangling reference to edge {e}"))
    }

    #[inline]
    pub(crate) fn ed_mut(&mut self, e: EdgeId) -> &mut Edge {
        self.edges
            .get_mut(&e)
            .unwrap_or_else(|| corrupted!("dangling reference to edge {e}"))
    }

    #[inline]
    pub(crate) fn lp(&self, l: LoopId) -> &Loop {
        self.loops
            .get(&l)
            .unwrap_or_else(|| corrupted!("dangling reference to loop {l}"))
    }

    #[inline]
    pub(crate) fn lp_mut(&mut self, l: LoopId) -> &mut Loop {
        self.loops
            .get_mut(&l)
            .unwrap_or_else(|| corrupted!("dangling reference to loop {l}"))
    }

    #[inline]
    pub(crate) fn fc_mut(&mut self, f: FaceId) -> &mut Face {
        self.faces
            .get_mut(&f)
            .unwrap_or_else(|| corrupted!("dangling reference to face {f}"))
    }

    // ------------------------------------------------------------------
    // Enumerate-all
    // ------------------------------------------------------------------

    /// All vertices in id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// All edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// All loops in id order.
    pub fn loops(&self) -> impl Iterator<Item = &Loop> + '_ {
        self.loops.values()
    }

    /// All faces in id order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.faces.values()
    }

    /// Vertex ids in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Edge ids in ascending order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.keys().copied()
    }

    /// Face ids in ascending order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys().copied()
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of live loops (face corners).
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    /// Number of live faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh has no vertices, and so nothing else.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ------------------------------------------------------------------
    // Positions
    // ------------------------------------------------------------------

    /// Position of `v`.
    pub fn position(&self, v: VertexId) -> Result<[f64; 3], MeshError> {
        Ok(self.try_vertex(v)?.position)
    }

    /// Moves `v`. Topology is unaffected.
    pub fn set_position(&mut self, v: VertexId, position: [f64; 3]) -> Result<(), MeshError> {
        self.vertices
            .get_mut(&v)
            .ok_or(MeshError::UnknownVertex(v))?
            .position = position;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Adds an isolated vertex at `position`.
    pub fn add_vertex(&mut self, position: [f64; 3]) -> VertexId {
        let v = self.vertex_ids.next_vertex();
        self.vertices.insert(v, Vertex::new(v, position));
        log::trace!("add_vertex {v} at {position:?}");
        v
    }

    /// Adds the edge `a`-`b`, or returns the one that already joins them.
    ///
    /// # Errors
    /// [`MeshError::DegenerateEdge`] when `a == b`; `UnknownVertex` for ids
    /// not in the mesh.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId, MeshError> {
        if a == b {
            return Err(MeshError::DegenerateEdge(a));
        }
        self.try_vertex(a)?;
        self.try_vertex(b)?;
        if let Some(e) = self.find_edge(a, b) {
            return Ok(e);
        }
        let e = self.edge_ids.next_edge();
        self.edges.insert(e, Edge::new(e, a, b));
        self.disk_link_edge(e);
        log::trace!("add_edge {e} ({a}, {b})");
        crate::debug_invariants!(self.audit_edit(&[a, b]), "mesh after add_edge");
        Ok(e)
    }

    /// Returns the edge joining `a` and `b`, if any, by walking the disk
    /// cycle of `a`.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        if !self.vertices.contains_key(&a) {
            return None;
        }
        self.disk_edges(a).find(|&e| self.ed(e).connects(a, b))
    }

    /// Adds a face over `verts` in boundary order, creating missing edges.
    ///
    /// The face's loop cycle starts at the loop of `verts[0]`, so
    /// [`Mesh::face_vertices`] reproduces `verts` exactly.
    ///
    /// # Errors
    /// - [`MeshError::FaceTooSmall`] for fewer than three vertices.
    /// - [`MeshError::UnknownVertex`] for an id not in the mesh.
    /// - [`MeshError::DuplicateFaceVertex`] when a vertex repeats.
    pub fn add_face(&mut self, verts: &[VertexId]) -> Result<FaceId, MeshError> {
        let n = verts.len();
        if n < 3 {
            return Err(MeshError::FaceTooSmall { found: n });
        }
        let mut seen = HashSet::with_capacity(n);
        for &v in verts {
            self.try_vertex(v)?;
            if !seen.insert(v) {
                return Err(MeshError::DuplicateFaceVertex { vertex: v });
            }
        }

        let edges = verts
            .iter()
            .circular_tuple_windows()
            .map(|(&a, &b)| self.add_edge(a, b))
            .collect::<Result<Vec<_>, _>>()?;

        let f = self.face_ids.next_face();
        self.faces.insert(f, Face::new(f));

        let loops: Vec<LoopId> = verts
            .iter()
            .zip(&edges)
            .map(|(&v, &e)| {
                let l = self.loop_ids.next_loop();
                self.loops.insert(l, Loop::new(l, v, e, f));
                l
            })
            .collect();
        for i in 0..n {
            let rec = self.lp_mut(loops[i]);
            rec.next = loops[(i + 1) % n];
            rec.prev = loops[(i + n - 1) % n];
        }
        for &l in &loops {
            self.radial_attach(l);
        }

        let face = self.fc_mut(f);
        face.loop_ = Some(loops[0]);
        face.vertcount = n;

        log::trace!("add_face {f} over {n} vertices");
        crate::debug_invariants!(self.audit_edit(verts), "mesh after add_face");
        Ok(f)
    }

    // ------------------------------------------------------------------
    // Destruction
    // ------------------------------------------------------------------

    /// Removes `f` and its loops. Edges and vertices stay.
    pub fn remove_face(&mut self, f: FaceId) -> Result<(), MeshError> {
        let loops: Vec<LoopId> = self.face_loops(f)?.collect();
        // Read before unlinking; only the invariant audit uses it.
        let _touched: Vec<VertexId> = loops.iter().map(|&l| self.lp(l).vert).collect();
        for &l in &loops {
            self.radial_detach(l);
            self.loops.remove(&l);
        }
        self.faces.remove(&f);
        log::trace!("remove_face {f}");
        crate::debug_invariants!(self.audit_edit(&_touched), "mesh after remove_face");
        Ok(())
    }

    /// Removes `e` together with every face that uses it.
    pub fn remove_edge(&mut self, e: EdgeId) -> Result<(), MeshError> {
        let faces: Vec<FaceId> = self.edge_faces(e)?.collect();
        let _touched = self.ed(e).verts;
        if !faces.is_empty() {
            log::debug!("remove_edge {e}: removing {} incident face(s)", faces.len());
        }
        for f in faces {
            self.remove_face(f)?;
        }
        self.disk_unlink_edge(e);
        self.edges.remove(&e);
        log::trace!("remove_edge {e}");
        crate::debug_invariants!(self.audit_edit(&_touched), "mesh after remove_edge");
        Ok(())
    }

    /// Removes `v` together with every edge (and so every face) using it.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<(), MeshError> {
        let edges: Vec<EdgeId> = self.vertex_edges(v)?.collect();
        let _touched: Vec<VertexId> = self.vertex_neighbors(v)?.collect();
        if !edges.is_empty() {
            log::debug!("remove_vertex {v}: removing {} incident edge(s)", edges.len());
        }
        for e in edges {
            self.remove_edge(e)?;
        }
        self.vertices.remove(&v);
        log::trace!("remove_vertex {v}");
        crate::debug_invariants!(self.audit_edit(&_touched), "mesh after remove_vertex");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Declared attribute types, per entity kind.
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Declares a typed attribute for all entities of `kind`.
    ///
    /// Values already stored under the name are not checked retroactively.
    pub fn declare_attribute(
        &mut self,
        kind: EntityKind,
        def: AttributeDefinition,
    ) -> Result<(), MeshError> {
        self.schema.declare(kind, def)
    }

    /// The attribute map of any entity.
    pub fn attributes(&self, entity: impl Into<EntityId>) -> Result<&AttributeMap, MeshError> {
        Ok(match entity.into() {
            EntityId::Vertex(v) => &self.try_vertex(v)?.attributes,
            EntityId::Edge(e) => &self.try_edge(e)?.attributes,
            EntityId::Loop(l) => &self.loops.get(&l).ok_or(MeshError::UnknownLoop(l))?.attributes,
            EntityId::Face(f) => &self.try_face(f)?.attributes,
        })
    }

    /// Raw mutable access to an entity's attribute map. Bypasses the schema.
    pub fn attributes_mut(
        &mut self,
        entity: impl Into<EntityId>,
    ) -> Result<&mut AttributeMap, MeshError> {
        Ok(match entity.into() {
            EntityId::Vertex(v) => {
                &mut self
                    .vertices
                    .get_mut(&v)
                    .ok_or(MeshError::UnknownVertex(v))?
                    .attributes
            }
            EntityId::Edge(e) => {
                &mut self.edges.get_mut(&e).ok_or(MeshError::UnknownEdge(e))?.attributes
            }
            EntityId::Loop(l) => {
                &mut self.loops.get_mut(&l).ok_or(MeshError::UnknownLoop(l))?.attributes
            }
            EntityId::Face(f) => {
                &mut self.faces.get_mut(&f).ok_or(MeshError::UnknownFace(f))?.attributes
            }
        })
    }

    /// Stores `value` under `name` on `entity`, returning the replaced value.
    ///
    /// # Errors
    /// [`MeshError::AttributeTypeMismatch`] when `name` is declared for the
    /// entity's kind with a different type.
    pub fn set_attribute(
        &mut self,
        entity: impl Into<EntityId>,
        name: &str,
        value: AttributeValue,
    ) -> Result<Option<AttributeValue>, MeshError> {
        let entity = entity.into();
        self.schema.check(entity.kind(), name, &value)?;
        Ok(self.attributes_mut(entity)?.set(name, value))
    }

    /// The value stored under `name`, or `None`. Never a default.
    pub fn get_attribute(
        &self,
        entity: impl Into<EntityId>,
        name: &str,
    ) -> Result<Option<&AttributeValue>, MeshError> {
        Ok(self.attributes(entity)?.get(name))
    }

    /// The stored value, falling back to the declared default for `name`.
    pub fn attribute_or_default(
        &self,
        entity: impl Into<EntityId>,
        name: &str,
    ) -> Result<Option<&AttributeValue>, MeshError> {
        let entity = entity.into();
        if let Some(v) = self.attributes(entity)?.get(name) {
            return Ok(Some(v));
        }
        Ok(self
            .schema
            .definition(entity.kind(), name)
            .and_then(|def| def.default.as_ref()))
    }
}

impl Mesh {
    /// Audit run after every edit that touched `region`.
    ///
    /// Debug builds check only the cycles around `region`, so an edit stays
    /// proportional to the local degree. The `strict-invariants` and
    /// `check-invariants` features audit the whole mesh instead.
    #[cfg_attr(
        not(any(
            debug_assertions,
            feature = "strict-invariants",
            feature = "check-invariants"
        )),
        allow(dead_code)
    )]
    fn audit_edit(&self, region: &[VertexId]) -> Result<(), MeshError> {
        if cfg!(any(feature = "strict-invariants", feature = "check-invariants")) {
            self.validate_invariants()
        } else {
            validate_region(self, region.iter().copied())
        }
    }
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] mesh: {e}");
        }
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        validate_mesh(self, ValidationOptions::default())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::attribute::AttributeType;

    fn triangle() -> (Mesh, [VertexId; 3], FaceId) {
        let mut m = Mesh::new();
        let a = m.add_vertex([0.0, 0.0, 0.0]);
        let b = m.add_vertex([1.0, 0.0, 0.0]);
        let c = m.add_vertex([0.0, 1.0, 0.0]);
        let f = m.add_face(&[a, b, c]).unwrap();
        (m, [a, b, c], f)
    }

    #[test]
    fn add_face_creates_edges_and_loops() {
        let (m, _, f) = triangle();
        assert_eq!(m.vertex_count(), 3);
        assert_eq!(m.edge_count(), 3);
        assert_eq!(m.loop_count(), 3);
        assert_eq!(m.face_count(), 1);
        assert_eq!(m.face(f).unwrap().vertcount(), 3);
    }

    #[test]
    fn add_edge_is_idempotent_per_pair() {
        let (mut m, [a, b, _], _) = triangle();
        let e = m.find_edge(a, b).unwrap();
        assert_eq!(m.add_edge(b, a).unwrap(), e);
        assert_eq!(m.edge_count(), 3);
    }

    #[test]
    fn add_edge_rejects_self_loop_and_unknown() {
        let (mut m, [a, ..], _) = triangle();
        assert_eq!(m.add_edge(a, a), Err(MeshError::DegenerateEdge(a)));
        let ghost = VertexId::new(999).unwrap();
        assert_eq!(m.add_edge(a, ghost), Err(MeshError::UnknownVertex(ghost)));
    }

    #[test]
    fn add_face_rejects_bad_input_without_side_effects() {
        let (mut m, [a, b, c], _) = triangle();
        assert_eq!(m.add_face(&[a, b]), Err(MeshError::FaceTooSmall { found: 2 }));
        assert_eq!(
            m.add_face(&[a, b, a]),
            Err(MeshError::DuplicateFaceVertex { vertex: a })
        );
        let d = m.add_vertex([5.0, 5.0, 5.0]);
        let ghost = VertexId::new(999).unwrap();
        assert_eq!(
            m.add_face(&[c, d, ghost]),
            Err(MeshError::UnknownVertex(ghost))
        );
        assert_eq!(m.edge_count(), 3);
        assert_eq!(m.face_count(), 1);
    }

    #[test]
    fn remove_face_keeps_edges() {
        let (mut m, _, f) = triangle();
        m.remove_face(f).unwrap();
        assert_eq!(m.face_count(), 0);
        assert_eq!(m.loop_count(), 0);
        assert_eq!(m.edge_count(), 3);
        assert!(m.edges().all(|e| e.loop_().is_none()));
        assert_eq!(m.remove_face(f), Err(MeshError::UnknownFace(f)));
    }

    #[test]
    fn remove_vertex_cascades() {
        let (mut m, [a, b, c], _) = triangle();
        m.remove_vertex(a).unwrap();
        assert_eq!(m.vertex_count(), 2);
        assert_eq!(m.edge_count(), 1);
        assert_eq!(m.face_count(), 0);
        assert!(m.find_edge(b, c).is_some());
        m.validate_invariants().unwrap();
    }

    #[test]
    fn ids_are_never_reused() {
        let mut m = Mesh::new();
        let a = m.add_vertex([0.0; 3]);
        m.remove_vertex(a).unwrap();
        let b = m.add_vertex([0.0; 3]);
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn typed_attribute_rejects_mismatch() {
        let (mut m, [a, ..], f) = triangle();
        m.declare_attribute(
            EntityKind::Face,
            AttributeDefinition::new("material", AttributeType::int(1))
                .with_default(0i64.into())
                .unwrap(),
        )
        .unwrap();

        assert!(m.set_attribute(f, "material", 1.5f64.into()).is_err());
        assert_eq!(m.get_attribute(f, "material").unwrap(), None);
        assert_eq!(
            m.attribute_or_default(f, "material").unwrap(),
            Some(&AttributeValue::Int(vec![0]))
        );

        m.set_attribute(f, "material", 4i64.into()).unwrap();
        assert_eq!(
            m.get_attribute(f, "material").unwrap(),
            Some(&AttributeValue::Int(vec![4]))
        );
        // Undeclared on vertices: stored unchecked.
        m.set_attribute(a, "material", 1.5f64.into()).unwrap();
    }
}

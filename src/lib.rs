#![cfg_attr(docsrs, feature(doc_cfg))]
//! # bmesh-kernel
//!
//! bmesh-kernel is a non-manifold polygonal mesh topology kernel in the style of
//! Blender's BMesh. It models vertices, edges, loops and faces with enough
//! connectivity to answer local queries (the boundary of a face, the faces
//! around an edge, the edges around a vertex) in time proportional to the
//! local degree rather than the mesh size.
//!
//! ## Model
//! - A [`Vertex`](topology::Vertex) is a position plus an entry into its
//!   *disk cycle*: the ring of incident edges.
//! - An [`Edge`](topology::Edge) joins two distinct vertices and is the entry
//!   into its *radial cycle*: the ring of loops of every face using it. Three
//!   or more faces on one edge are an ordinary, representable state.
//! - A [`Loop`](topology::Loop) is one corner of one face. It is linked into
//!   the face's boundary cycle and its edge's radial cycle at the same time.
//! - A [`Face`](topology::Face) stores one loop and the cached cycle length.
//!
//! All entities are owned by a [`Mesh`](topology::Mesh) and referenced by
//! strong, never-reused ids. Any entity can carry named attribute values
//! (UVs, material ids, ...), optionally type-checked through a schema.
//!
//! ## Errors and corruption
//! Caller mistakes (unknown ids, degenerate input, type mismatches) are
//! reported as [`MeshError`](mesh_error::MeshError). A broken cycle found in
//! the middle of a traversal is corruption and panics immediately;
//! [`validate_mesh`](topology::validate_mesh) audits a mesh without panicking.
//!
//! ## Usage
//! ```rust
//! use bmesh_kernel::prelude::*;
//!
//! let mut mesh = Mesh::new();
//! let a = mesh.add_vertex([0.0, 0.0, 0.0]);
//! let b = mesh.add_vertex([1.0, 0.0, 0.0]);
//! let c = mesh.add_vertex([1.0, 1.0, 0.0]);
//! let d = mesh.add_vertex([0.0, 1.0, 0.0]);
//! let quad = mesh.add_face(&[a, b, c, d]).unwrap();
//!
//! let corners: Vec<_> = mesh.face_vertices(quad).unwrap().collect();
//! assert_eq!(corners, vec![a, b, c, d]);
//! assert_eq!(mesh.face_center(quad).unwrap(), [0.5, 0.5, 0.0]);
//! ```
//!
//! ## Invariant checking
//! In debug builds every mutating [`Mesh`](topology::Mesh) operation audits the
//! cycles around the entities it touched before returning. The
//! `strict-invariants` and `check-invariants` features widen that audit to the
//! whole mesh.

pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::attribute::{
        AttributeDefinition, AttributeMap, AttributeType, AttributeValue,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::{
        EdgeId, EntityId, EntityKind, FaceBoundary, FaceId, LoopId, Mesh, NonManifoldHandling,
        ValidationOptions, VertexId,
    };
}

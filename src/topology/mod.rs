//! Top-level module for mesh topology.
//!
//! This module provides the entity graph and its navigation:
//! - Strong ids for vertices, edges, loops and faces
//! - The entity records and the [`Mesh`] container that owns them
//! - Disk (per-vertex), radial (per-edge) and loop (per-face) cycle walks
//! - Validation of the cycle invariants
//!
//! Most users will build a [`Mesh`] with `add_vertex` / `add_face` and query it
//! through `face_vertices`, `face_edges`, `edge_faces` and `vertex_edges`.

mod _debug_invariants;
pub mod disk;
pub mod entity;
pub mod ids;
pub mod loop_cycle;
pub mod mesh;
pub mod radial;
pub mod validation;

pub use disk::DiskEdges;
pub use entity::{DiskLink, Edge, Face, Loop, Vertex};
pub use ids::{EdgeId, EntityId, EntityKind, FaceId, LoopId, VertexId};
pub use loop_cycle::{FaceBoundary, FaceLoops};
pub use mesh::Mesh;
pub use radial::RadialLoops;
pub use validation::{NonManifoldHandling, ValidationOptions, non_manifold_edges, validate_mesh};

#[cfg(test)]
mod tests;

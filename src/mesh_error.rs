//! MeshError: Unified error type for bmesh-kernel public APIs
//!
//! Recoverable failures (unknown ids, degenerate geometry, rejected edits,
//! attribute type mismatches) and the structural conditions reported by
//! [`crate::topology::validation::validate_mesh`] all surface through this type.
//! Corruption detected in the middle of a traversal is not reported here: it
//! panics at the point of detection.

use thiserror::Error;

use crate::data::attribute::AttributeType;
use crate::topology::ids::{EdgeId, FaceId, LoopId, VertexId};

/// Unified error type for bmesh-kernel operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Attempted to construct an entity id with a zero value (invalid).
    #[error("entity id must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidId,

    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),
    #[error("unknown loop {0}")]
    UnknownLoop(LoopId),
    #[error("unknown face {0}")]
    UnknownFace(FaceId),

    /// An edge was requested between a vertex and itself.
    #[error("degenerate edge: both endpoints are vertex {0}")]
    DegenerateEdge(VertexId),
    /// A face needs at least three corners.
    #[error("face needs at least 3 vertices, got {found}")]
    FaceTooSmall { found: usize },
    /// A vertex appears more than once on a face boundary.
    #[error("vertex {vertex} appears more than once on the face boundary")]
    DuplicateFaceVertex { vertex: VertexId },

    /// Centroid of a face whose loop cycle is empty.
    #[error("face {0} has no vertices")]
    EmptyFace(FaceId),
    /// The face polygon has zero area, so it has no normal.
    #[error("face {0} is geometrically degenerate (zero area)")]
    DegenerateFace(FaceId),
    /// Disk-cycle step on a vertex of degree 0.
    #[error("vertex {0} has no incident edge")]
    IsolatedVertex(VertexId),
    /// The edge does not have the vertex as an endpoint.
    #[error("edge {edge} is not incident to vertex {vertex}")]
    NotIncident { edge: EdgeId, vertex: VertexId },

    /// A value was stored under a declared attribute with a different type.
    #[error("attribute `{name}` expects {expected}, got {found}")]
    AttributeTypeMismatch {
        name: String,
        expected: AttributeType,
        found: AttributeType,
    },
    /// A second declaration for the same name disagrees with the first.
    #[error("attribute `{name}` already declared as {existing}")]
    AttributeRedeclared { name: String, existing: AttributeType },

    // --- structural conditions reported by validation ---
    #[error("corrupted disk cycle at vertex {vertex}: {reason}")]
    BrokenDiskCycle { vertex: VertexId, reason: String },
    #[error("corrupted radial cycle at edge {edge}: {reason}")]
    BrokenRadialCycle { edge: EdgeId, reason: String },
    #[error("corrupted loop cycle at face {face}: {reason}")]
    BrokenLoopCycle { face: FaceId, reason: String },
    #[error("face {face} caches vertcount {cached} but its loop cycle has {found} loops")]
    VertCountMismatch {
        face: FaceId,
        cached: usize,
        found: usize,
    },
    #[error("loop {0} edge does not connect its vertex to the next loop's vertex")]
    LoopEdgeMismatch(LoopId),
    #[error("edges {first} and {second} both connect the same vertex pair")]
    DuplicateEdge { first: EdgeId, second: EdgeId },
    #[error("non-manifold edge {edge}: {degree} incident faces")]
    NonManifoldEdge { edge: EdgeId, degree: usize },
}

//! Strong, zero-cost handles for mesh entities.
//!
//! Every vertex, edge, loop and face owned by a [`Mesh`](crate::topology::mesh::Mesh)
//! is addressed by a per-kind identifier wrapping a `NonZeroU64`. Zero is
//! reserved, which gives `Option<VertexId>` (and friends) the same size as a
//! bare `u64`: the "unset" state of a cycle reference costs nothing.
//!
//! Identifiers are assigned by the mesh from monotonic counters. They are
//! unique within their kind, stable for the lifetime of the entity and never
//! reused after removal.

use std::{fmt, num::NonZeroU64};

use crate::mesh_error::MeshError;
use crate::topology::_debug_invariants::corrupted;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[repr(transparent)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Creates an id from a raw `u64` value.
            ///
            /// Returns [`MeshError::InvalidId`] if `raw == 0`.
            #[inline]
            pub fn new(raw: u64) -> Result<Self, MeshError> {
                NonZeroU64::new(raw).map($name).ok_or(MeshError::InvalidId)
            }

            /// Returns the inner `u64` value of this id.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0.get()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.get()).finish()
            }
        }

        /// Prints the kind tag followed by the raw integer, e.g. `v7`.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.get())
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Vertex`](crate::topology::entity::Vertex).
    VertexId,
    "v"
);
entity_id!(
    /// Identifier of an [`Edge`](crate::topology::entity::Edge).
    EdgeId,
    "e"
);
entity_id!(
    /// Identifier of a [`Loop`](crate::topology::entity::Loop).
    LoopId,
    "l"
);
entity_id!(
    /// Identifier of a [`Face`](crate::topology::entity::Face).
    FaceId,
    "f"
);

/// The four entity kinds of the mesh.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Vertex,
    Edge,
    Loop,
    Face,
}

/// Any entity id, used where an API addresses all kinds uniformly
/// (attribute access in particular).
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum EntityId {
    Vertex(VertexId),
    Edge(EdgeId),
    Loop(LoopId),
    Face(FaceId),
}

impl EntityId {
    /// Returns the kind of entity this id refers to.
    pub fn kind(self) -> EntityKind {
        match self {
            EntityId::Vertex(_) => EntityKind::Vertex,
            EntityId::Edge(_) => EntityKind::Edge,
            EntityId::Loop(_) => EntityKind::Loop,
            EntityId::Face(_) => EntityKind::Face,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Vertex(id) => id.fmt(f),
            EntityId::Edge(id) => id.fmt(f),
            EntityId::Loop(id) => id.fmt(f),
            EntityId::Face(id) => id.fmt(f),
        }
    }
}

impl From<VertexId> for EntityId {
    fn from(id: VertexId) -> Self {
        EntityId::Vertex(id)
    }
}

impl From<EdgeId> for EntityId {
    fn from(id: EdgeId) -> Self {
        EntityId::Edge(id)
    }
}

impl From<LoopId> for EntityId {
    fn from(id: LoopId) -> Self {
        EntityId::Loop(id)
    }
}

impl From<FaceId> for EntityId {
    fn from(id: FaceId) -> Self {
        EntityId::Face(id)
    }
}

/// Monotonic id source for one entity kind.
#[derive(Clone, Debug)]
pub(crate) struct IdCounter {
    /// `None` once every non-zero `u64` has been handed out.
    next: Option<NonZeroU64>,
}

impl Default for IdCounter {
    fn default() -> Self {
        Self {
            next: Some(NonZeroU64::MIN),
        }
    }
}

impl IdCounter {
    /// Hands out the next raw id. Ids start at 1 and are never reused, so
    /// running past `u64::MAX` is fatal rather than wrapping.
    #[inline]
    pub(crate) fn next_raw(&mut self) -> NonZeroU64 {
        let Some(raw) = self.next else {
            corrupted!("id space exhausted after {}", u64::MAX);
        };
        self.next = raw.checked_add(1);
        raw
    }

    pub(crate) fn next_vertex(&mut self) -> VertexId {
        VertexId(self.next_raw())
    }

    pub(crate) fn next_edge(&mut self) -> EdgeId {
        EdgeId(self.next_raw())
    }

    pub(crate) fn next_loop(&mut self) -> LoopId {
        LoopId(self.next_raw())
    }

    pub(crate) fn next_face(&mut self) -> FaceId {
        FaceId(self.next_raw())
    }
}

#[cfg(test)]
mod layout_tests {
    //! Compile-time assertion that ids and their optional form are `u64`-sized.
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(VertexId, u64);
    assert_eq_size!(Option<VertexId>, u64);
    assert_eq_size!(Option<EdgeId>, u64);
    assert_eq_size!(Option<LoopId>, u64);
    assert_eq_size!(Option<FaceId>, u64);
    assert_eq_align!(FaceId, u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_zero_is_rejected() {
        assert_eq!(VertexId::new(0), Err(MeshError::InvalidId));
        assert_eq!(FaceId::new(0), Err(MeshError::InvalidId));
    }

    #[test]
    fn new_and_get() {
        let e = EdgeId::new(42).unwrap();
        assert_eq!(e.get(), 42);
        let max = LoopId::new(u64::MAX).unwrap();
        assert_eq!(max.get(), u64::MAX);
    }

    #[test]
    fn debug_and_display() {
        let v = VertexId::new(7).unwrap();
        assert_eq!(format!("{:?}", v), "VertexId(7)");
        assert_eq!(format!("{}", v), "v7");
        assert_eq!(format!("{}", EntityId::from(FaceId::new(3).unwrap())), "f3");
    }

    #[test]
    fn counter_is_monotonic_and_starts_at_one() {
        let mut c = IdCounter::default();
        let a = c.next_vertex();
        let b = c.next_vertex();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert!(a < b);
    }

    #[test]
    fn counter_hands_out_max_then_stops() {
        let mut c = IdCounter {
            next: NonZeroU64::new(u64::MAX - 1),
        };
        assert_eq!(c.next_face().get(), u64::MAX - 1);
        assert_eq!(c.next_face().get(), u64::MAX);
        assert!(c.next.is_none());
    }

    #[test]
    #[should_panic(expected = "id space exhausted")]
    fn exhausted_counter_never_wraps_to_one() {
        let mut c = IdCounter {
            next: NonZeroU64::new(u64::MAX),
        };
        c.next_edge();
        c.next_edge();
    }

    #[test]
    fn entity_kind_matches_variant() {
        let l = LoopId::new(1).unwrap();
        assert_eq!(EntityId::from(l).kind(), EntityKind::Loop);
    }
}

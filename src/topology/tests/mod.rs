mod radial_tests;
mod validation_tests;

use crate::topology::ids::{FaceId, VertexId};
use crate::topology::mesh::Mesh;

/// Two triangles `a b c` and `a c d` sharing the diagonal `a-c`.
pub(super) fn two_triangles() -> (Mesh, [VertexId; 4], [FaceId; 2]) {
    let mut m = Mesh::new();
    let a = m.add_vertex([0.0, 0.0, 0.0]);
    let b = m.add_vertex([1.0, 0.0, 0.0]);
    let c = m.add_vertex([1.0, 1.0, 0.0]);
    let d = m.add_vertex([0.0, 1.0, 0.0]);
    let f0 = m.add_face(&[a, b, c]).unwrap();
    let f1 = m.add_face(&[a, c, d]).unwrap();
    (m, [a, b, c, d], [f0, f1])
}

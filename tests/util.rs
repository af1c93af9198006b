#![allow(dead_code)]
use bmesh_kernel::prelude::*;

/// Adds one vertex per position and returns their ids in order.
pub fn add_points(mesh: &mut Mesh, points: &[[f64; 3]]) -> Vec<VertexId> {
    points.iter().map(|&p| mesh.add_vertex(p)).collect()
}

/// A mesh holding the unit square `(0,0,0) (1,0,0) (1,1,0) (0,1,0)` as one face.
pub fn unit_square() -> (Mesh, Vec<VertexId>, FaceId) {
    let mut mesh = Mesh::new();
    let v = add_points(
        &mut mesh,
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
    );
    let f = mesh.add_face(&v).unwrap();
    (mesh, v, f)
}

/// A closed tetrahedron: 4 vertices, 6 edges, 4 triangles.
pub fn tetrahedron() -> (Mesh, Vec<VertexId>, Vec<FaceId>) {
    let mut mesh = Mesh::new();
    let v = add_points(
        &mut mesh,
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    );
    let faces = [
        [v[0], v[2], v[1]],
        [v[0], v[1], v[3]],
        [v[1], v[2], v[3]],
        [v[2], v[0], v[3]],
    ]
    .iter()
    .map(|tri| mesh.add_face(tri).unwrap())
    .collect();
    (mesh, v, faces)
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}

/// Max component-wise distance between two points.
pub fn max_abs_diff(a: [f64; 3], b: [f64; 3]) -> f64 {
    (0..3).map(|i| (a[i] - b[i]).abs()).fold(0.0, f64::max)
}

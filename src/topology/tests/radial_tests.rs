use super::two_triangles;
use crate::mesh_error::MeshError;
use crate::topology::mesh::Mesh;

#[test]
fn shared_edge_has_two_faces_in_creation_order() {
    let (m, [a, b, c, _], [f0, f1]) = two_triangles();
    let ac = m.find_edge(a, c).unwrap();
    assert_eq!(m.edge_faces(ac).unwrap().collect::<Vec<_>>(), vec![f0, f1]);
    assert_eq!(m.edge_degree(ac).unwrap(), 2);
    assert!(m.is_manifold_edge(ac).unwrap());
    assert!(!m.is_boundary_edge(ac).unwrap());

    let ab = m.find_edge(a, b).unwrap();
    assert!(m.is_boundary_edge(ab).unwrap());
}

#[test]
fn wire_edge_has_empty_radial_cycle() {
    let mut m = Mesh::new();
    let a = m.add_vertex([0.0; 3]);
    let b = m.add_vertex([1.0, 0.0, 0.0]);
    let e = m.add_edge(a, b).unwrap();
    assert!(m.is_wire_edge(e).unwrap());
    assert_eq!(m.edge_loops(e).unwrap().count(), 0);
    assert_eq!(m.edge_center(e).unwrap(), [0.5, 0.0, 0.0]);
    assert_eq!(m.edge_length(e).unwrap(), 1.0);
}

#[test]
fn edge_length_of_a_diagonal() {
    let (mut m, [a, _, c, _], _) = two_triangles();
    let ac = m.find_edge(a, c).unwrap();
    assert!((m.edge_length(ac).unwrap() - 2f64.sqrt()).abs() < 1e-12);
    m.remove_edge(ac).unwrap();
    assert_eq!(m.edge_length(ac), Err(MeshError::UnknownEdge(ac)));
}

#[test]
fn radial_links_are_mutual() {
    let (m, [a, _, c, _], _) = two_triangles();
    let ac = m.find_edge(a, c).unwrap();
    for l in m.edge_loops(ac).unwrap() {
        let rec = m.get_loop(l).unwrap();
        assert_eq!(m.get_loop(rec.radial_next()).unwrap().radial_prev(), l);
        assert_eq!(rec.edge(), ac);
    }
}

#[test]
fn detaching_entry_loop_moves_edge_entry() {
    let (mut m, [a, _, c, _], [f0, f1]) = two_triangles();
    let ac = m.find_edge(a, c).unwrap();
    let entry = m.edge(ac).unwrap().loop_().unwrap();
    assert_eq!(m.get_loop(entry).unwrap().face(), f0);

    m.remove_face(f0).unwrap();
    let entry = m.edge(ac).unwrap().loop_().unwrap();
    assert_eq!(m.get_loop(entry).unwrap().face(), f1);
    assert_eq!(m.edge_degree(ac).unwrap(), 1);
}

#[test]
fn unknown_edge_is_reported() {
    let (mut m, [a, b, ..], _) = two_triangles();
    let ab = m.find_edge(a, b).unwrap();
    m.remove_edge(ab).unwrap();
    assert_eq!(m.edge_degree(ab), Err(MeshError::UnknownEdge(ab)));
}

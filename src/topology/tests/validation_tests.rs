use super::two_triangles;
use crate::mesh_error::MeshError;
use crate::topology::mesh::Mesh;
use crate::topology::validation::{
    NonManifoldHandling, ValidationOptions, non_manifold_edges, validate_mesh, validate_region,
};

fn fan_of_three() -> (Mesh, crate::topology::ids::EdgeId) {
    let mut m = Mesh::new();
    let a = m.add_vertex([0.0, 0.0, 0.0]);
    let b = m.add_vertex([1.0, 0.0, 0.0]);
    for i in 0..3 {
        let t = m.add_vertex([0.5, 1.0, i as f64]);
        m.add_face(&[a, b, t]).unwrap();
    }
    let ab = m.find_edge(a, b).unwrap();
    (m, ab)
}

#[test]
fn fresh_meshes_validate() {
    let (m, _, _) = two_triangles();
    validate_mesh(&m, ValidationOptions::all()).unwrap();
    validate_mesh(&Mesh::new(), ValidationOptions::all()).unwrap();
}

#[test]
fn non_manifold_handling_levels() {
    let (m, ab) = fan_of_three();
    validate_mesh(&m, ValidationOptions::default()).unwrap();

    let warn = ValidationOptions {
        non_manifold: NonManifoldHandling::Warn,
        ..ValidationOptions::default()
    };
    validate_mesh(&m, warn).unwrap();

    let err = validate_mesh(&m, ValidationOptions::all()).unwrap_err();
    assert_eq!(err, MeshError::NonManifoldEdge { edge: ab, degree: 3 });
    assert_eq!(non_manifold_edges(&m), vec![ab]);
}

#[test]
fn stale_vertcount_is_detected() {
    let (mut m, _, [f0, _]) = two_triangles();
    m.fc_mut(f0).vertcount = 4;
    let err = m.validate(ValidationOptions::default()).unwrap_err();
    assert_eq!(
        err,
        MeshError::VertCountMismatch {
            face: f0,
            cached: 4,
            found: 3
        }
    );
}

#[test]
fn broken_disk_back_link_is_detected() {
    let (mut m, [a, ..], _) = two_triangles();
    let e = m.vertex(a).unwrap().edge().unwrap();
    let side = m.edge(e).unwrap().side(a).unwrap();
    m.ed_mut(e).disk[side].next = e;
    let err = validate_mesh(&m, ValidationOptions::default()).unwrap_err();
    assert!(matches!(err, MeshError::BrokenDiskCycle { vertex, .. } if vertex == a));
}

#[test]
fn broken_radial_link_is_detected() {
    let (mut m, [a, _, c, _], _) = two_triangles();
    let ac = m.find_edge(a, c).unwrap();
    let first = m.edge(ac).unwrap().loop_().unwrap();
    m.lp_mut(first).radial_next = first;
    let opts = ValidationOptions {
        check_loop_cycles: false,
        ..ValidationOptions::default()
    };
    let err = validate_mesh(&m, opts).unwrap_err();
    assert!(matches!(err, MeshError::BrokenRadialCycle { edge, .. } if edge == ac));
}

#[test]
fn loop_edge_mismatch_is_detected() {
    let (mut m, [a, _, _, d], [f0, _]) = two_triangles();
    let l = m.find_loop(f0, a).unwrap().unwrap();
    let ad = m.find_edge(a, d).unwrap();
    assert_ne!(m.get_loop(l).unwrap().edge(), ad);
    m.lp_mut(l).edge = ad;
    let opts = ValidationOptions {
        check_radial_cycles: false,
        ..ValidationOptions::default()
    };
    assert_eq!(validate_mesh(&m, opts), Err(MeshError::LoopEdgeMismatch(l)));
}

#[test]
fn disabled_checks_are_skipped() {
    let (mut m, _, [f0, _]) = two_triangles();
    m.fc_mut(f0).vertcount = 9;
    let opts = ValidationOptions {
        check_loop_cycles: false,
        ..ValidationOptions::default()
    };
    validate_mesh(&m, opts).unwrap();
}

#[test]
fn region_audit_catches_corruption_next_to_the_region() {
    let (mut m, [a, ..], [f0, _]) = two_triangles();
    validate_region(&m, [a]).unwrap();
    m.fc_mut(f0).vertcount = 4;
    assert_eq!(
        validate_region(&m, [a]),
        Err(MeshError::VertCountMismatch {
            face: f0,
            cached: 4,
            found: 3
        })
    );
}

#[test]
fn region_audit_stays_local() {
    // `b` only touches the first triangle, so the second is never walked.
    let (mut m, [_, b, _, d], [_, f1]) = two_triangles();
    m.fc_mut(f1).vertcount = 7;
    validate_region(&m, [b]).unwrap();
    assert!(validate_region(&m, [d]).is_err());
    assert!(validate_mesh(&m, ValidationOptions::default()).is_err());
}

#[test]
fn region_audit_reports_broken_disk_links() {
    let (mut m, [a, ..], _) = two_triangles();
    let e = m.vertex(a).unwrap().edge().unwrap();
    let side = m.edge(e).unwrap().side(a).unwrap();
    m.ed_mut(e).disk[side].next = e;
    let err = validate_region(&m, [a]).unwrap_err();
    assert!(matches!(err, MeshError::BrokenDiskCycle { vertex, .. } if vertex == a));
}

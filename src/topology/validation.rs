//! Topology validation helpers.
//!
//! [`validate_mesh`] audits every cycle of a mesh without trusting any of
//! them: links are followed through fallible lookups and each walk stops at
//! the first revisited record, so a corrupted mesh yields an error instead of
//! a panic or an endless loop.
//!
//! Mutating mesh operations audit themselves. Debug builds check only the
//! region an edit touched; the `strict-invariants` and `check-invariants`
//! features run the full [`validate_mesh`] after every edit instead.

use std::fmt::Display;
use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::mesh_error::MeshError;
use crate::topology::ids::{EdgeId, FaceId, LoopId, VertexId};
use crate::topology::mesh::Mesh;

/// Optional validation toggles for mesh topology checks.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Walk the disk cycle of every vertex.
    pub check_disk_cycles: bool,
    /// Walk the radial cycle of every edge.
    pub check_radial_cycles: bool,
    /// Walk the loop cycle of every face and compare with `vertcount`.
    pub check_loop_cycles: bool,
    /// Ensure each unordered vertex pair has at most one edge.
    pub check_duplicate_edges: bool,
    /// How to handle edges used by more than two faces.
    pub non_manifold: NonManifoldHandling,
}

impl ValidationOptions {
    /// Enable all checks and reject non-manifold edges.
    pub fn all() -> Self {
        Self {
            check_disk_cycles: true,
            check_radial_cycles: true,
            check_loop_cycles: true,
            check_duplicate_edges: true,
            non_manifold: NonManifoldHandling::Error,
        }
    }
}

/// Every structural check; non-manifold edges are valid.
impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            non_manifold: NonManifoldHandling::Ignore,
            ..Self::all()
        }
    }
}

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonManifoldHandling {
    /// Skip non-manifold detection.
    Ignore,
    /// Log a warning on non-manifold edges.
    Warn,
    /// Return an error on non-manifold edges.
    Error,
}

impl Mesh {
    /// Runs [`validate_mesh`] on this mesh.
    pub fn validate(&self, options: ValidationOptions) -> Result<(), MeshError> {
        validate_mesh(self, options)
    }
}

/// Validate the cycle structure of `mesh`.
pub fn validate_mesh(mesh: &Mesh, options: ValidationOptions) -> Result<(), MeshError> {
    if options.check_disk_cycles {
        validate_disk_cycles(mesh)?;
    }
    if options.check_duplicate_edges {
        validate_unique_edges(mesh)?;
    }
    if options.check_loop_cycles {
        validate_loop_cycles(mesh)?;
    }
    if options.check_radial_cycles {
        validate_radial_cycles(mesh)?;
    }
    validate_non_manifold(mesh, options.non_manifold)?;
    Ok(())
}

/// Edges used by more than two faces, in id order.
pub fn non_manifold_edges(mesh: &Mesh) -> Vec<EdgeId> {
    let uses = loops_per_edge(mesh);
    mesh.edge_ids()
        .filter(|e| uses.get(e).copied().unwrap_or(0) > 2)
        .collect()
}

/// Follow `step` from `start` until it comes back, returning the records
/// visited in order. Revisiting anything other than `start` is reported
/// through `broken`.
fn walk_cycle<I, S, B>(start: I, mut step: S, broken: B) -> Result<Vec<I>, MeshError>
where
    I: Copy + Eq + Hash + Display,
    S: FnMut(I) -> Result<I, MeshError>,
    B: Fn(String) -> MeshError,
{
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut cur = start;
    loop {
        if !seen.insert(cur) {
            return Err(broken(format!("revisits {cur} before returning to {start}")));
        }
        order.push(cur);
        cur = step(cur)?;
        if cur == start {
            return Ok(order);
        }
    }
}

/// Disk cycle of `v`, checked link by link, in disk order.
fn check_disk(mesh: &Mesh, v: VertexId) -> Result<Vec<EdgeId>, MeshError> {
    let vert = mesh.vertex(v).ok_or(MeshError::UnknownVertex(v))?;
    let broken = |reason: String| MeshError::BrokenDiskCycle { vertex: v, reason };
    let Some(start) = vert.edge() else {
        return Ok(Vec::new());
    };
    walk_cycle(
        start,
        |e: EdgeId| {
            let link = mesh
                .edge(e)
                .ok_or_else(|| broken(format!("dangling edge {e}")))?
                .disk_link(v)
                .ok_or_else(|| broken(format!("edge {e} does not touch the vertex")))?;
            let next = link.next;
            let back = mesh
                .edge(next)
                .ok_or_else(|| broken(format!("dangling edge {next}")))?
                .disk_link(v)
                .ok_or_else(|| broken(format!("edge {next} does not touch the vertex")))?;
            if back.prev != e {
                return Err(broken(format!("{next}.prev is {} instead of {e}", back.prev)));
            }
            Ok(next)
        },
        broken,
    )
}

/// Radial cycle of `e`, checked link by link, in radial order.
fn check_radial(mesh: &Mesh, e: EdgeId) -> Result<Vec<LoopId>, MeshError> {
    let edge = mesh.edge(e).ok_or(MeshError::UnknownEdge(e))?;
    let broken = |reason: String| MeshError::BrokenRadialCycle { edge: e, reason };
    let Some(start) = edge.loop_() else {
        return Ok(Vec::new());
    };
    walk_cycle(
        start,
        |l: LoopId| {
            let rec = mesh
                .get_loop(l)
                .ok_or_else(|| broken(format!("dangling loop {l}")))?;
            if rec.edge() != e {
                return Err(broken(format!("loop {l} uses {}", rec.edge())));
            }
            let next = mesh
                .get_loop(rec.radial_next())
                .ok_or_else(|| broken(format!("dangling loop {}", rec.radial_next())))?;
            if next.radial_prev() != l {
                return Err(broken(format!(
                    "{}.radial_prev is {} instead of {l}",
                    next.id(),
                    next.radial_prev()
                )));
            }
            Ok(rec.radial_next())
        },
        broken,
    )
}

/// Loop cycle of `f`: closure, back links, loop/edge agreement and the
/// cached `vertcount`. Returns the cycle length.
fn check_face(mesh: &Mesh, f: FaceId) -> Result<usize, MeshError> {
    let broken = |reason: String| MeshError::BrokenLoopCycle { face: f, reason };
    let face = mesh
        .face(f)
        .ok_or_else(|| broken("a loop references the missing face".to_string()))?;
    if face.vertcount() < 3 {
        return Err(broken(format!(
            "populated face with vertcount {}",
            face.vertcount()
        )));
    }
    let Some(start) = face.loop_() else {
        return Err(broken("populated face without an entry loop".to_string()));
    };
    let cycle = walk_cycle(
        start,
        |l: LoopId| {
            let rec = mesh
                .get_loop(l)
                .ok_or_else(|| broken(format!("dangling loop {l}")))?;
            if rec.face() != f {
                return Err(broken(format!("loop {l} belongs to {}", rec.face())));
            }
            let next = mesh
                .get_loop(rec.next())
                .ok_or_else(|| broken(format!("dangling loop {}", rec.next())))?;
            if next.prev() != l {
                return Err(broken(format!(
                    "{}.prev is {} instead of {l}",
                    next.id(),
                    next.prev()
                )));
            }
            let connects = mesh
                .edge(rec.edge())
                .is_some_and(|e| e.connects(rec.vert(), next.vert()));
            if !connects {
                return Err(MeshError::LoopEdgeMismatch(l));
            }
            Ok(rec.next())
        },
        broken,
    )?;
    if cycle.len() != face.vertcount() {
        return Err(MeshError::VertCountMismatch {
            face: f,
            cached: face.vertcount(),
            found: cycle.len(),
        });
    }
    Ok(cycle.len())
}

/// Audits the neighbourhood of `verts`: their disk cycles, the radial
/// cycles of their edges and the loop cycles of every face around them.
///
/// Cost is proportional to the local degree, not the mesh size. Counts
/// that need a global scan (edges missing from a disk, loops missing from a
/// radial cycle) are left to [`validate_mesh`].
pub(crate) fn validate_region<I>(mesh: &Mesh, verts: I) -> Result<(), MeshError>
where
    I: IntoIterator<Item = VertexId>,
{
    let mut faces = HashSet::new();
    for v in verts {
        let mut neighbours: HashMap<VertexId, EdgeId> = HashMap::new();
        for e in check_disk(mesh, v)? {
            let [a, b] = mesh.edge(e).ok_or(MeshError::UnknownEdge(e))?.verts();
            if a == b {
                return Err(MeshError::DegenerateEdge(a));
            }
            let other = if a == v { b } else { a };
            if mesh.vertex(other).is_none() {
                return Err(MeshError::BrokenDiskCycle {
                    vertex: v,
                    reason: format!("edge {e} references missing vertex {other}"),
                });
            }
            if let Some(&first) = neighbours.get(&other) {
                return Err(MeshError::DuplicateEdge { first, second: e });
            }
            neighbours.insert(other, e);
            for l in check_radial(mesh, e)? {
                if let Some(rec) = mesh.get_loop(l) {
                    faces.insert(rec.face());
                }
            }
        }
    }
    for f in faces {
        check_face(mesh, f)?;
    }
    Ok(())
}

fn validate_disk_cycles(mesh: &Mesh) -> Result<(), MeshError> {
    let mut incident: HashMap<VertexId, usize> = HashMap::new();
    for edge in mesh.edges() {
        let [a, b] = edge.verts();
        if a == b {
            return Err(MeshError::DegenerateEdge(a));
        }
        for v in [a, b] {
            if mesh.vertex(v).is_none() {
                return Err(MeshError::BrokenDiskCycle {
                    vertex: v,
                    reason: format!("edge {} references a missing vertex", edge.id()),
                });
            }
            *incident.entry(v).or_insert(0) += 1;
        }
    }

    for v in mesh.vertex_ids() {
        let expected = incident.get(&v).copied().unwrap_or(0);
        let found = check_disk(mesh, v)?.len();
        if found != expected {
            return Err(MeshError::BrokenDiskCycle {
                vertex: v,
                reason: format!("cycle visits {found} of {expected} incident edge(s)"),
            });
        }
    }
    Ok(())
}

fn validate_unique_edges(mesh: &Mesh) -> Result<(), MeshError> {
    let mut pairs: HashMap<(VertexId, VertexId), EdgeId> = HashMap::new();
    for edge in mesh.edges() {
        let [a, b] = edge.verts();
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&first) = pairs.get(&key) {
            return Err(MeshError::DuplicateEdge {
                first,
                second: edge.id(),
            });
        }
        pairs.insert(key, edge.id());
    }
    Ok(())
}

fn loops_per_edge(mesh: &Mesh) -> HashMap<EdgeId, usize> {
    let mut uses = HashMap::new();
    for l in mesh.loops() {
        *uses.entry(l.edge()).or_insert(0) += 1;
    }
    uses
}

fn validate_loop_cycles(mesh: &Mesh) -> Result<(), MeshError> {
    let mut per_face: HashMap<FaceId, usize> = HashMap::new();
    for l in mesh.loops() {
        let broken = |reason: String| MeshError::BrokenLoopCycle {
            face: l.face(),
            reason,
        };
        if mesh.face(l.face()).is_none() {
            return Err(broken(format!("loop {} references a missing face", l.id())));
        }
        if mesh.vertex(l.vert()).is_none() {
            return Err(broken(format!(
                "loop {} references missing vertex {}",
                l.id(),
                l.vert()
            )));
        }
        if mesh.edge(l.edge()).is_none() {
            return Err(broken(format!(
                "loop {} references missing edge {}",
                l.id(),
                l.edge()
            )));
        }
        *per_face.entry(l.face()).or_insert(0) += 1;
    }

    for f in mesh.face_ids() {
        let found = check_face(mesh, f)?;
        let owned = per_face.get(&f).copied().unwrap_or(0);
        if owned != found {
            return Err(MeshError::BrokenLoopCycle {
                face: f,
                reason: format!("{owned} loop(s) reference the face but {found} are on its cycle"),
            });
        }
    }
    Ok(())
}

fn validate_radial_cycles(mesh: &Mesh) -> Result<(), MeshError> {
    let uses = loops_per_edge(mesh);
    for e in mesh.edge_ids() {
        let expected = uses.get(&e).copied().unwrap_or(0);
        let found = check_radial(mesh, e)?.len();
        if found != expected {
            return Err(MeshError::BrokenRadialCycle {
                edge: e,
                reason: format!("cycle visits {found} of {expected} loop(s)"),
            });
        }
    }
    Ok(())
}

/// Detect edges shared by more than two faces.
fn validate_non_manifold(mesh: &Mesh, handling: NonManifoldHandling) -> Result<(), MeshError> {
    if handling == NonManifoldHandling::Ignore {
        return Ok(());
    }
    let uses = loops_per_edge(mesh);
    for e in mesh.edge_ids() {
        let degree = uses.get(&e).copied().unwrap_or(0);
        if degree > 2 {
            match handling {
                NonManifoldHandling::Warn => {
                    log::warn!("Non-manifold edge detected: edge={e} incident_faces={degree}");
                }
                NonManifoldHandling::Error => {
                    return Err(MeshError::NonManifoldEdge { edge: e, degree });
                }
                NonManifoldHandling::Ignore => {}
            }
        }
    }
    Ok(())
}

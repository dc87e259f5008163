//! # Mesh Cleanup
//!
//! Vertex welding, which keeps faces and voxels one-for-one so their
//! attributes survive, and removal of vertices that do not shape the surface.

use crate::attributes::ElementKind;
use crate::error::MeshResult;
use crate::Mesh;
use config::constants::{COPLANAR_EPSILON, EPSILON};
use glam::DVec3;
use std::collections::{BTreeMap, HashMap};

type Cell = (i64, i64, i64);

fn cell_of(p: DVec3, size: f64) -> Cell {
    (
        (p.x / size).floor() as i64,
        (p.y / size).floor() as i64,
        (p.z / size).floor() as i64,
    )
}

/// Merges vertices closer than `tolerance`.
///
/// The first vertex of each cluster (in index order) is kept; surviving
/// vertices keep their relative order. Faces that collapse are kept, so the
/// face count never changes.
///
/// # Example
///
/// ```rust
/// use mesh_kernel::Mesh;
/// use mesh_kernel::ops::clean::remove_duplicated_vertices;
/// use glam::DVec3;
///
/// let mesh = Mesh::from_parts(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::X, DVec3::ONE],
///     vec![[0, 1, 2], [3, 4, 2]],
///     vec![],
/// ).unwrap();
/// let welded = remove_duplicated_vertices(&mesh, 1e-12).unwrap();
/// assert_eq!(welded.vertex_count(), 4);
/// assert_eq!(welded.faces()[1], [1, 3, 2]);
/// ```
pub fn remove_duplicated_vertices(mesh: &Mesh, tolerance: f64) -> MeshResult<Mesh> {
    let size = tolerance.max(f64::MIN_POSITIVE);
    let mut grid: HashMap<Cell, Vec<u32>> = HashMap::new();
    let mut kept: Vec<DVec3> = Vec::with_capacity(mesh.vertex_count());
    let mut remap: Vec<u32> = Vec::with_capacity(mesh.vertex_count());

    for &p in mesh.vertices() {
        let (cx, cy, cz) = cell_of(p, size);
        let mut found = None;
        'search: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    if let Some(&hit) = bucket
                        .iter()
                        .find(|&&k| kept[k as usize].distance(p) <= tolerance)
                    {
                        found = Some(hit);
                        break 'search;
                    }
                }
            }
        }

        let index = match found {
            Some(index) => index,
            None => {
                let index = kept.len() as u32;
                kept.push(p);
                grid.entry((cx, cy, cz)).or_default().push(index);
                index
            }
        };
        remap.push(index);
    }

    let faces = mesh
        .faces()
        .iter()
        .map(|f| f.map(|i| remap[i as usize]))
        .collect();
    let voxels = mesh
        .voxels()
        .iter()
        .map(|v| v.map(|i| remap[i as usize]))
        .collect();

    let removed = mesh.vertex_count() - kept.len();
    if removed > 0 {
        log::debug!("welded {removed} duplicated vertices");
    }

    let mut result = Mesh::from_parts(kept, faces, voxels)?;
    copy_attributes(mesh, &mut result, &[ElementKind::Face, ElementKind::Voxel])?;
    Ok(result)
}

/// Removes vertices that do not shape the surface.
///
/// A vertex is redundant when all of its faces lie in one plane and it sits
/// either inside that flat patch or on a straight stretch of the patch border.
/// Such a vertex is collapsed onto a neighbor for which no remaining face
/// flips or degenerates; faces spanning the collapsed edge are dropped.
/// Vertices within `tolerance` of a `protected` point and vertices of voxels
/// are never removed.
///
/// Surviving faces keep their relative order and so do the vertices they
/// use. Attributes are not carried over.
///
/// # Example
///
/// ```rust
/// use mesh_kernel::Mesh;
/// use mesh_kernel::ops::clean::remove_redundant_vertices;
/// use glam::DVec3;
///
/// // A unit square split at the midpoint of its bottom edge.
/// let mesh = Mesh::from_parts(
///     vec![DVec3::ZERO, DVec3::new(0.5, 0.0, 0.0), DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
///     vec![[0, 1, 4], [1, 2, 3], [1, 3, 4]],
///     vec![],
/// ).unwrap();
/// let reduced = remove_redundant_vertices(&mesh, &[], 1e-12).unwrap();
/// assert_eq!(reduced.vertex_count(), 4);
/// assert_eq!(reduced.face_count(), 2);
/// ```
pub fn remove_redundant_vertices(
    mesh: &Mesh,
    protected: &[DVec3],
    tolerance: f64,
) -> MeshResult<Mesh> {
    let positions = mesh.vertices();
    let mut locked = protected_vertices(positions, protected, tolerance);
    for &v in mesh.voxels().iter().flatten() {
        locked[v as usize] = true;
    }

    let mut faces = mesh.faces().to_vec();
    let mut alive = vec![true; faces.len()];
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); positions.len()];
    for (f, face) in faces.iter().enumerate() {
        for &v in face {
            incident[v as usize].push(f);
        }
    }

    let mut removed = 0;
    let mut changed = true;
    while changed {
        changed = false;
        for v in 0..positions.len() {
            if locked[v] {
                continue;
            }
            let live: Vec<usize> = incident[v].iter().copied().filter(|&f| alive[f]).collect();
            if live.is_empty() {
                continue;
            }
            let Some(target) = collapse_target(positions, &faces, &live, v as u32) else {
                continue;
            };

            for &f in &live {
                if faces[f].contains(&target) {
                    alive[f] = false;
                } else {
                    for slot in faces[f].iter_mut().filter(|slot| **slot == v as u32) {
                        *slot = target;
                    }
                    incident[target as usize].push(f);
                }
            }
            incident[v].clear();
            removed += 1;
            changed = true;
        }
    }

    let mut used = vec![false; positions.len()];
    let kept_faces: Vec<[u32; 3]> = faces
        .into_iter()
        .zip(alive)
        .filter_map(|(face, alive)| alive.then_some(face))
        .collect();
    for &v in kept_faces.iter().flatten().chain(mesh.voxels().iter().flatten()) {
        used[v as usize] = true;
    }

    let mut remap = vec![0u32; positions.len()];
    let mut vertices = Vec::with_capacity(positions.len() - removed);
    for (i, &p) in positions.iter().enumerate() {
        if used[i] {
            remap[i] = vertices.len() as u32;
            vertices.push(p);
        }
    }

    if removed > 0 {
        log::debug!("dissolved {removed} redundant vertices");
    }

    Mesh::from_parts(
        vertices,
        kept_faces
            .iter()
            .map(|f| f.map(|i| remap[i as usize]))
            .collect(),
        mesh.voxels()
            .iter()
            .map(|v| v.map(|i| remap[i as usize]))
            .collect(),
    )
}

/// Marks the vertices lying within `tolerance` of any protected point.
fn protected_vertices(positions: &[DVec3], protected: &[DVec3], tolerance: f64) -> Vec<bool> {
    let size = tolerance.max(f64::MIN_POSITIVE);
    let mut grid: HashMap<Cell, Vec<DVec3>> = HashMap::new();
    for &p in protected {
        grid.entry(cell_of(p, size)).or_default().push(p);
    }

    positions
        .iter()
        .map(|&p| {
            let (cx, cy, cz) = cell_of(p, size);
            (-1..=1).any(|dx| {
                (-1..=1).any(|dy| {
                    (-1..=1).any(|dz| {
                        grid.get(&(cx + dx, cy + dy, cz + dz)).is_some_and(|bucket| {
                            bucket.iter().any(|q| q.distance(p) <= tolerance)
                        })
                    })
                })
            })
        })
        .collect()
}

/// Picks the neighbor `v` can be collapsed onto without changing the shape
/// of its faces, if there is one.
fn collapse_target(positions: &[DVec3], faces: &[[u32; 3]], live: &[usize], v: u32) -> Option<u32> {
    let p = |i: u32| positions[i as usize];
    let normal = |face: [u32; 3]| (p(face[1]) - p(face[0])).cross(p(face[2]) - p(face[0]));

    let plane = normal(faces[live[0]]).try_normalize()?;
    for &f in live {
        let n = normal(faces[f]).try_normalize()?;
        if n.dot(plane) < 1.0 - COPLANAR_EPSILON {
            return None;
        }
    }

    // Neighbors on a single face of the fan are on the patch border.
    let mut uses: BTreeMap<u32, usize> = BTreeMap::new();
    for &f in live {
        for &x in faces[f].iter().filter(|&&x| x != v) {
            *uses.entry(x).or_default() += 1;
        }
    }
    let border: Vec<u32> = uses
        .iter()
        .filter(|&(_, &count)| count == 1)
        .map(|(&x, _)| x)
        .collect();

    let candidates: Vec<u32> = match border[..] {
        [] => uses.keys().copied().collect(),
        [a, b] if between(p(v), p(a), p(b)) => vec![a, b],
        _ => return None,
    };

    candidates.into_iter().find(|&target| {
        live.iter().all(|&f| {
            let face = faces[f];
            if face.contains(&target) {
                return true;
            }
            let moved = normal(face.map(|x| if x == v { target } else { x }));
            moved.length() >= EPSILON && moved.dot(plane) > 0.0
        })
    })
}

/// True when `p` lies strictly inside the segment `a`-`b`.
fn between(p: DVec3, a: DVec3, b: DVec3) -> bool {
    let d = b - a;
    let len_sq = d.dot(d);
    let w = p - a;
    let t = w.dot(d);
    w.cross(d).length() <= COPLANAR_EPSILON * len_sq && t > 0.0 && t < len_sq
}

/// Copies written attributes of the given kinds between meshes with matching
/// element counts.
pub(crate) fn copy_attributes(from: &Mesh, to: &mut Mesh, kinds: &[ElementKind]) -> MeshResult<()> {
    for name in from.attribute_names() {
        if !kinds.contains(&from.attribute_kind(name)?) {
            continue;
        }
        if let Ok(data) = from.attribute(name) {
            to.add_attribute(name, from.attribute_kind(name)?)?;
            to.set_attribute(name, data.clone())?;
        }
    }
    Ok(())
}

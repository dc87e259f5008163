use electrode_imprint::{electrode_cylinder, imprint};
use glam::DVec3;
use mesh_kernel::primitives::generate_box;
use mesh_kernel::{BspKernel, GeometryKernel, Mesh};

const WIDTH: f64 = 2.0;

fn head() -> Mesh {
    generate_box(DVec3::splat(-5.0), DVec3::splat(5.0))
}

fn electrode_on_top(center: DVec3) -> Mesh {
    electrode_cylinder(&BspKernel, center, DVec3::Z, WIDTH, 1.0, 12).unwrap()
}

/// Flat `n` x `n` vertex grid with unit spacing, centered on the origin.
///
/// With `alternate` set, cell diagonals alternate direction so every
/// diagonal lies on a line `x + y` or `x - y` equal to an odd number.
fn flat_grid(n: u32, alternate: bool) -> Mesh {
    let lo = -f64::from(n / 2);
    let mut mesh = Mesh::new();
    for j in 0..n {
        for i in 0..n {
            mesh.add_vertex(DVec3::new(lo + f64::from(i), lo + f64::from(j), 0.0));
        }
    }
    let at = |i: u32, j: u32| j * n + i;
    for j in 0..n - 1 {
        for i in 0..n - 1 {
            let (v00, v10, v11, v01) = (at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
            if alternate && (i + j) % 2 == 0 {
                mesh.add_face(v00, v10, v01);
                mesh.add_face(v10, v11, v01);
            } else {
                mesh.add_face(v00, v10, v11);
                mesh.add_face(v00, v11, v01);
            }
        }
    }
    mesh
}

fn cap_ring(mesh: &Mesh) -> Vec<DVec3> {
    mesh.vertices()
        .iter()
        .copied()
        .filter(|v| v.z > 1e-6)
        .collect()
}

#[test]
fn imprint_produces_clean_surface() {
    let surface = head();
    let electrode = electrode_on_top(DVec3::new(0.3, -0.2, 5.0));

    let result = imprint(&BspKernel, &surface, &electrode).unwrap();
    assert!(result.conditioned.face_count() > 0);
    assert!(result.outer_diff.face_count() > 0);
    assert!(BspKernel
        .detect_self_intersection(&result.conditioned)
        .unwrap()
        .is_empty());
}

#[test]
fn imprinted_electrode_protrudes_from_surface() {
    let surface = head();
    let electrode = electrode_on_top(DVec3::new(0.3, -0.2, 5.0));

    let result = imprint(&BspKernel, &surface, &electrode).unwrap();
    let (_, max) = result.conditioned.bounding_box();
    assert!(max.z > 5.0 + 1e-6);
    assert!(max.z <= 5.0 + WIDTH / 4.0 + 1e-9);

    let (min, _) = result.conditioned.bounding_box();
    assert!(min.z >= -5.0 - 1e-9);
}

#[test]
fn imprint_records_original_faces() {
    let surface = head();
    let electrode = electrode_on_top(DVec3::new(0.3, -0.2, 5.0));

    let result = imprint(&BspKernel, &surface, &electrode).unwrap();
    let origin = result.conditioned.index_attribute("ori_face_index").unwrap();
    assert_eq!(origin.len(), result.conditioned.face_count());
    assert!(origin.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn reimprinting_stays_free_of_self_intersections() {
    let surface = head();
    let electrode = electrode_on_top(DVec3::new(0.3, -0.2, 5.0));

    let first = imprint(&BspKernel, &surface, &electrode).unwrap();
    let second = imprint(&BspKernel, &first.conditioned, &electrode).unwrap();
    assert!(BspKernel
        .detect_self_intersection(&second.conditioned)
        .unwrap()
        .is_empty());
}

#[test]
fn two_electrodes_at_once() {
    let surface = head();
    let a = electrode_on_top(DVec3::new(-2.5, 0.1, 5.0));
    let b = electrode_on_top(DVec3::new(2.5, -0.1, 5.0));
    let both = Mesh::merged([&a, &b]);

    let result = imprint(&BspKernel, &surface, &both).unwrap();
    assert!(BspKernel
        .detect_self_intersection(&result.conditioned)
        .unwrap()
        .is_empty());
    let tops = result
        .conditioned
        .vertices()
        .iter()
        .filter(|v| v.z > 5.0 + 1e-6)
        .count();
    assert!(tops > 0);
}

#[test]
fn flat_grid_gains_exactly_the_rim_vertices() {
    // A square cylinder of radius 1 at the origin has its rim on grid
    // vertices and its sides along cell diagonals.
    let segments = 4;
    let surface = flat_grid(7, true);
    let electrode =
        electrode_cylinder(&BspKernel, DVec3::ZERO, DVec3::Z, WIDTH, 1.0, segments).unwrap();

    let result = imprint(&BspKernel, &surface, &electrode).unwrap();
    let conditioned = &result.conditioned;
    assert_eq!(
        conditioned.vertex_count(),
        surface.vertex_count() + segments as usize
    );
    assert!(BspKernel
        .detect_self_intersection(conditioned)
        .unwrap()
        .is_empty());

    for &v in surface.vertices() {
        assert!(conditioned.find_vertex(v).is_some(), "surface vertex {v} lost");
    }
    let ring = cap_ring(conditioned);
    assert_eq!(ring.len(), segments as usize);
    for v in ring {
        assert!((v.z - WIDTH / 4.0).abs() < 1e-12);
        assert!((v.truncate().length() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn flat_grid_keeps_surface_and_cap_ring() {
    let segments = 12;
    let surface = flat_grid(7, false);
    let electrode =
        electrode_cylinder(&BspKernel, DVec3::ZERO, DVec3::Z, WIDTH, 1.0, segments).unwrap();

    let result = imprint(&BspKernel, &surface, &electrode).unwrap();
    let conditioned = &result.conditioned;
    assert!(BspKernel
        .detect_self_intersection(conditioned)
        .unwrap()
        .is_empty());

    for &v in surface.vertices() {
        assert!(conditioned.find_vertex(v).is_some(), "surface vertex {v} lost");
    }
    // The cap center lies flat inside the cap and is dissolved.
    assert_eq!(cap_ring(conditioned).len(), segments as usize);

    // Rim crossings on grid edges stay; split points inside flat cells do not.
    let flat = conditioned.vertices().iter().filter(|v| v.z.abs() <= 1e-6).count();
    assert!(flat < surface.vertex_count() + 2 * segments as usize);
}

use approx::assert_relative_eq;
use electrode_imprint::{
    place_on_points, place_on_sphere, ElectrodeAttributes, ElectrodeError, SphericalPosition,
};
use glam::DVec3;
use mesh_kernel::primitives::generate_box;
use mesh_kernel::{BspKernel, Mesh};

/// Flat `n x n` grid of unit cells in the z = 0 plane, connectivity enabled.
fn flat_grid(n: u32) -> Mesh {
    let mut mesh = Mesh::new();
    for j in 0..=n {
        for i in 0..=n {
            mesh.add_vertex(DVec3::new(i as f64, j as f64, 0.0));
        }
    }
    let at = |i: u32, j: u32| j * (n + 1) + i;
    for j in 0..n {
        for i in 0..n {
            let (v00, v10, v11, v01) = (at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
            mesh.add_face(v00, v10, v11);
            mesh.add_face(v00, v11, v01);
        }
    }
    mesh.enable_connectivity();
    mesh
}

fn cap_centers(mesh: &Mesh, segments: u32) -> (DVec3, DVec3) {
    (mesh.vertex(2 * segments), mesh.vertex(2 * segments + 1))
}

#[test]
fn point_target_snaps_to_first_vertex_of_nearest_face() {
    let surface = flat_grid(4);
    let mut attrs = ElectrodeAttributes::with_points(["Fz"], [DVec3::new(0.3, 0.2, 1.0)]);
    attrs.elements = 12;

    let array = place_on_points(&BspKernel, &surface, &attrs).unwrap();
    let record = array.get("Fz").unwrap();
    let (c0, c1) = cap_centers(&record.mesh, 12);

    // Anchor (0, 0, 0), axis +z.
    assert_relative_eq!(c0.z, -0.75, epsilon = 1e-12);
    assert_relative_eq!(c1.z, 0.75, epsilon = 1e-12);
    assert_relative_eq!(c0.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(c1.y, 0.0, epsilon = 1e-12);
}

#[test]
fn cylinder_caps_are_half_width_apart_and_symmetric() {
    let surface = flat_grid(4);
    let mut attrs = ElectrodeAttributes::with_points(
        ["A", "B"],
        [DVec3::new(2.7, 1.2, 0.5), DVec3::new(1.1, 3.8, -2.0)],
    );
    attrs.width = 5.0;
    attrs.radius = 0.5;
    attrs.elements = 8;

    let array = place_on_points(&BspKernel, &surface, &attrs).unwrap();
    assert_eq!(array.names().collect::<Vec<_>>(), ["A", "B"]);
    for (_, record) in array.iter() {
        let (c0, c1) = cap_centers(&record.mesh, 8);
        assert_relative_eq!(c0.distance(c1), 2.5, epsilon = 1e-12);
        let anchor = (c0 + c1) / 2.0;
        assert_relative_eq!(anchor.z, 0.0, epsilon = 1e-12);
        assert_eq!(anchor.x.fract(), 0.0);
        assert_eq!(anchor.y.fract(), 0.0);
    }
}

#[test]
fn bounding_box_is_exact_vertex_extent() {
    let surface = flat_grid(2);
    let mut attrs = ElectrodeAttributes::with_points(["Fz"], [DVec3::new(0.3, 0.2, 1.0)]);
    attrs.radius = 0.5;
    attrs.elements = 16;

    let array = place_on_points(&BspKernel, &surface, &attrs).unwrap();
    let record = array.get("Fz").unwrap();
    let (min, max) = record.mesh.bounding_box();
    assert_eq!(record.dom_roi.min(), min);
    assert_eq!(record.dom_roi.max(), max);
    assert_relative_eq!(record.dom_roi.z_max, 0.75, epsilon = 1e-12);
    assert_relative_eq!(record.dom_roi.x_max, 0.5, epsilon = 1e-12);
}

#[test]
fn mismatched_names_and_coordinates_are_rejected() {
    let surface = flat_grid(2);
    let attrs = ElectrodeAttributes::with_points(["Fz", "Cz"], [DVec3::ZERO]);
    let err = place_on_points(&BspKernel, &surface, &attrs).unwrap_err();
    assert!(matches!(err, ElectrodeError::InvalidAttributes(_)));
}

#[test]
fn point_targets_need_connectivity() {
    let surface = generate_box(DVec3::ZERO, DVec3::ONE);
    let attrs = ElectrodeAttributes::with_points(["Fz"], [DVec3::splat(2.0)]);
    assert!(place_on_points(&BspKernel, &surface, &attrs).is_err());
}

#[test]
fn angular_targets_use_largest_x_as_default_radius() {
    let surface = generate_box(DVec3::splat(-10.0), DVec3::splat(10.0));
    let mut attrs = ElectrodeAttributes {
        cylinder_width: 2.0,
        cylinder_radius: 1.0,
        elements: 8,
        ..ElectrodeAttributes::default()
    };
    attrs
        .electrodes
        .insert("T8".into(), SphericalPosition { theta: 0.0, phi: 0.0 });
    attrs
        .electrodes
        .insert("Fpz".into(), SphericalPosition { theta: 90.0, phi: 0.0 });

    let array = place_on_sphere(&BspKernel, &surface, &attrs).unwrap();
    assert_eq!(array.names().collect::<Vec<_>>(), ["T8", "Fpz"]);

    let (c0, c1) = cap_centers(&array.get("T8").unwrap().mesh, 8);
    let anchor = (c0 + c1) / 2.0;
    assert_relative_eq!(anchor.x, 10.0, epsilon = 1e-12);
    assert_relative_eq!(anchor.y, 0.0, epsilon = 1e-12);
    assert_relative_eq!(c0.distance(c1), 1.0, epsilon = 1e-12);
    // Axis is horizontal: both caps share the anchor height.
    assert_relative_eq!(c0.z, 0.0, epsilon = 1e-12);
    assert_relative_eq!(c1.z, 0.0, epsilon = 1e-12);

    let (c0, c1) = cap_centers(&array.get("Fpz").unwrap().mesh, 8);
    let anchor = (c0 + c1) / 2.0;
    assert_relative_eq!(anchor.y, 10.0, epsilon = 1e-12);
}

#[test]
fn angular_targets_honor_explicit_skin_radius() {
    let surface = generate_box(DVec3::splat(-10.0), DVec3::splat(10.0));
    let mut attrs = ElectrodeAttributes {
        skin_radius: Some(12.0),
        elements: 8,
        ..ElectrodeAttributes::default()
    };
    attrs
        .electrodes
        .insert("T8".into(), SphericalPosition { theta: 0.0, phi: 0.0 });

    let array = place_on_sphere(&BspKernel, &surface, &attrs).unwrap();
    let mesh = &array.get("T8").unwrap().mesh;
    let anchor = (mesh.vertex(16) + mesh.vertex(17)) / 2.0;
    assert_relative_eq!(anchor.x, 12.0, epsilon = 1e-12);
}

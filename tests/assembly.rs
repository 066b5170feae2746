use d20_spin::label::{LabelAtlas, LabelRaster};
use d20_spin::{uv, BuildParameters, DieMesh, Icosahedron, OPPOSITE_PAIRS};

#[test]
fn full_build_from_constant_tables() {
    let shape = Icosahedron::new();
    assert_eq!(shape.vertices.len(), d20_spin::VERTEX_COUNT);
    assert_eq!(shape.faces.len(), d20_spin::FACE_COUNT);

    let atlas = LabelAtlas::build();
    let mesh = DieMesh::build(&shape, &atlas, &BuildParameters::default());
    assert_eq!(mesh.vertices.len(), d20_spin::FACE_COUNT * 3);
    assert_eq!(mesh.edge_vertices.len(), d20_spin::EDGE_COUNT * 2);

    // Rendering every label succeeds and is stable.
    for face in &shape.faces {
        let text = face.label.to_string();
        assert_eq!(LabelRaster::render(&text), LabelRaster::render(&text));
    }
}

#[test]
fn repeated_builds_are_identical() {
    let first = Icosahedron::new();
    let second = Icosahedron::new();
    assert_eq!(first, second);

    for face in 0..d20_spin::FACE_COUNT {
        assert_eq!(first.faces[face].indices, second.faces[face].indices);
        assert_eq!(first.faces[face].label, second.faces[face].label);
    }

    let atlas = LabelAtlas::build();
    let params = BuildParameters::default();
    let mesh_a = DieMesh::build(&first, &atlas, &params);
    let mesh_b = DieMesh::build(&second, &atlas, &params);
    assert_eq!(mesh_a.vertices, mesh_b.vertices);
}

#[test]
fn die_invariants_hold_together() {
    let shape = Icosahedron::new();

    for (i, j) in OPPOSITE_PAIRS {
        assert_eq!(shape.faces[i].label + shape.faces[j].label, 21);
    }

    let corners = uv::face_uvs(uv::DEFAULT_INSET);
    for corner in corners {
        assert!(corner.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}

use glam::Vec3;

/// One triangular face of the die: three vertex indices plus the number
/// printed on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub indices: [u16; 3],
    pub label: u8,
}

/// Golden-ratio icosahedron inscribed in the unit sphere, faces numbered
/// 1..=20 so that opposite faces sum to 21, like a standard d20.
#[derive(Clone, Debug, PartialEq)]
pub struct Icosahedron {
    pub vertices: [Vec3; crate::VERTEX_COUNT],
    pub faces: [Face; crate::FACE_COUNT],
}

/// Geometrically opposite face pairs, fixed by the layout of `FACES`.
pub const OPPOSITE_PAIRS: [(usize, usize); 10] = [
    (0, 13),
    (1, 12),
    (2, 11),
    (3, 10),
    (4, 14),
    (5, 17),
    (6, 18),
    (7, 19),
    (8, 15),
    (9, 16),
];

// (vertex index triple, printed number). The table is fixed data; edits must
// keep the opposite-pair sums intact (see `validate`).
const FACES: [([u16; 3], u8); crate::FACE_COUNT] = [
    // 5 faces around point 0
    ([0, 11, 5], 1),
    ([0, 5, 1], 2),
    ([0, 1, 7], 3),
    ([0, 7, 10], 4),
    ([0, 10, 11], 5),
    // 5 adjacent faces
    ([1, 5, 9], 6),
    ([5, 11, 4], 7),
    ([11, 10, 2], 8),
    ([10, 7, 6], 9),
    ([7, 1, 8], 10),
    // 5 faces around point 3
    ([3, 9, 4], 17),
    ([3, 4, 2], 18),
    ([3, 2, 6], 19),
    ([3, 6, 8], 20),
    ([3, 8, 9], 16),
    // 5 adjacent faces
    ([4, 9, 5], 12),
    ([2, 4, 11], 11),
    ([6, 2, 10], 15),
    ([8, 6, 7], 14),
    ([9, 8, 1], 13),
];

impl Icosahedron {
    pub fn new() -> Self {
        // http://blog.andreaskahler.com/2009/06/creating-icosphere-mesh-in-code.html
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;
        let s = 1.0;
        let raw = [
            [-s, t, 0.0],
            [s, t, 0.0],
            [-s, -t, 0.0],
            [s, -t, 0.0],
            [0.0, -s, t],
            [0.0, s, t],
            [0.0, -s, -t],
            [0.0, s, -t],
            [t, 0.0, -s],
            [t, 0.0, s],
            [-t, 0.0, -s],
            [-t, 0.0, s],
        ];
        let shape = Self {
            vertices: raw.map(|v| Vec3::from_array(v).normalize()),
            faces: FACES.map(|(indices, label)| Face { indices, label }),
        };
        shape.validate();
        shape
    }

    /// Outward unit normal of a face.
    pub fn face_normal(&self, face: usize) -> Vec3 {
        let [a, b, c] = self.face_corners(face);
        (b - a).cross(c - a).normalize()
    }

    /// The 30 unique undirected edges, each as an ascending index pair.
    pub fn edges(&self) -> Vec<[u16; 2]> {
        let mut edges = Vec::with_capacity(crate::EDGE_COUNT);
        for face in &self.faces {
            let [a, b, c] = face.indices;
            for pair in [[a, b], [b, c], [c, a]] {
                let edge = [pair[0].min(pair[1]), pair[0].max(pair[1])];
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        edges
    }

    fn face_corners(&self, face: usize) -> [Vec3; 3] {
        self.faces[face]
            .indices
            .map(|i| self.vertices[i as usize])
    }

    fn face_centroid(&self, face: usize) -> Vec3 {
        let [a, b, c] = self.face_corners(face);
        (a + b + c) / 3.0
    }

    // The tables are static data; an inconsistency is a defect in this file,
    // caught here rather than at render time.
    fn validate(&self) {
        let mut seen = [false; crate::FACE_COUNT];
        for face in &self.faces {
            assert!(
                (1..=crate::FACE_COUNT as u8).contains(&face.label),
                "label {} out of range",
                face.label
            );
            let slot = &mut seen[face.label as usize - 1];
            assert!(!*slot, "duplicate label {}", face.label);
            *slot = true;

            let [a, b, c] = face.indices;
            assert!(a != b && b != c && a != c, "degenerate face {:?}", face);
            for index in face.indices {
                assert!(
                    (index as usize) < self.vertices.len(),
                    "vertex index {} out of range",
                    index
                );
            }
        }
        for &(i, j) in &OPPOSITE_PAIRS {
            assert_eq!(
                self.faces[i].label + self.faces[j].label,
                21,
                "faces {} and {} are opposite",
                i,
                j
            );
        }
    }
}

impl Default for Icosahedron {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1.0e-6;

    #[test]
    fn labels_are_a_permutation() {
        let shape = Icosahedron::new();
        let mut labels: Vec<u8> = shape.faces.iter().map(|f| f.label).collect();
        labels.sort_unstable();
        let expected: Vec<u8> = (1..=20).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn opposite_faces_sum_to_21() {
        let shape = Icosahedron::new();
        assert_eq!(OPPOSITE_PAIRS.len(), 10);
        for (i, j) in OPPOSITE_PAIRS {
            assert_eq!(shape.faces[i].label + shape.faces[j].label, 21);
        }
    }

    #[test]
    fn opposite_pairs_are_antipodal() {
        // The pair table is fixed data; confirm it matches the geometry.
        let shape = Icosahedron::new();
        for (i, j) in OPPOSITE_PAIRS {
            let sum = shape.face_centroid(i) + shape.face_centroid(j);
            assert!(sum.length() < EPSILON, "pair ({}, {}): {:?}", i, j, sum);
        }
    }

    #[test]
    fn vertices_lie_on_the_unit_sphere() {
        let shape = Icosahedron::new();
        for vertex in shape.vertices {
            assert!((vertex.length() - 1.0).abs() < EPSILON, "{:?}", vertex);
        }
    }

    #[test]
    fn faces_reference_distinct_valid_vertices() {
        let shape = Icosahedron::new();
        for face in &shape.faces {
            let [a, b, c] = face.indices;
            assert!(a != b && b != c && a != c);
            assert!(face.indices.iter().all(|&i| (i as usize) < 12));
        }
    }

    #[test]
    fn every_edge_is_shared_by_two_faces() {
        let shape = Icosahedron::new();
        let edges = shape.edges();
        assert_eq!(edges.len(), crate::EDGE_COUNT);
        for edge in edges {
            let shared = shape
                .faces
                .iter()
                .filter(|f| {
                    f.indices.contains(&edge[0]) && f.indices.contains(&edge[1])
                })
                .count();
            assert_eq!(shared, 2, "edge {:?}", edge);
        }
    }

    #[test]
    fn face_winding_points_outward() {
        let shape = Icosahedron::new();
        for face in 0..shape.faces.len() {
            let outward = shape.face_normal(face).dot(shape.face_centroid(face));
            assert!(outward > 0.0, "face {} winds inward", face);
        }
    }

    #[test]
    fn construction_is_deterministic() {
        assert_eq!(Icosahedron::new(), Icosahedron::new());
    }
}

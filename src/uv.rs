//! Placement of a square label texture onto a triangular face.

use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, TAU};

/// Fraction of the tile's half-diagonal left as margin around the glyph.
/// Values below ~0.3 push the top corner off the tile.
pub const DEFAULT_INSET: f32 = 0.3;

/// Texture coordinates for the three corners of a face.
///
/// The points sit at a fixed phase plus 0°, 120° and 240° around the tile
/// center, so the glyph ends up centered in the triangle. Every face is an
/// equilateral triangle and every tile has its glyph centered identically,
/// so the same triple serves all faces.
pub fn face_uvs(inset: f32) -> [[f32; 2]; 3] {
    let radius = (1.0 - inset) * FRAC_1_SQRT_2;
    let mut uvs = [[0.0; 2]; 3];
    for (corner, uv) in uvs.iter_mut().enumerate() {
        let angle = FRAC_PI_2 + corner as f32 * TAU / 3.0;
        *uv = [0.5 + radius * angle.cos(), 0.5 + radius * angle.sin()];
        assert!(
            uv.iter().all(|c| (0.0..=1.0).contains(c)),
            "inset {} pushes {:?} outside the tile",
            inset,
            uv
        );
    }
    uvs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
        ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
    }

    #[test]
    fn corners_stay_inside_the_tile() {
        for uv in face_uvs(DEFAULT_INSET) {
            assert!(uv.iter().all(|c| (0.0..=1.0).contains(c)), "{:?}", uv);
        }
    }

    #[test]
    fn corners_form_an_equilateral_triangle() {
        let [a, b, c] = face_uvs(DEFAULT_INSET);
        let sides = [distance(a, b), distance(b, c), distance(c, a)];
        assert!((sides[0] - sides[1]).abs() < 1.0e-6);
        assert!((sides[1] - sides[2]).abs() < 1.0e-6);
    }

    #[test]
    fn corners_are_centered_on_the_glyph() {
        let uvs = face_uvs(DEFAULT_INSET);
        let center = uvs
            .iter()
            .fold([0.0f32; 2], |acc, uv| [acc[0] + uv[0], acc[1] + uv[1]]);
        assert!((center[0] / 3.0 - 0.5).abs() < 1.0e-6);
        assert!((center[1] / 3.0 - 0.5).abs() < 1.0e-6);
    }

    #[test]
    fn placement_does_not_depend_on_the_face() {
        let reference = face_uvs(DEFAULT_INSET);
        for _ in 0..crate::FACE_COUNT {
            assert_eq!(face_uvs(DEFAULT_INSET), reference);
        }
    }

    #[test]
    fn inset_controls_the_margin() {
        let tight = face_uvs(0.3);
        let loose = face_uvs(0.5);
        assert!(distance(tight[0], tight[1]) > distance(loose[0], loose[1]));
    }
}

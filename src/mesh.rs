use crate::label::LabelAtlas;
use crate::shape::Icosahedron;
use crate::uv;

/// GPU-layout vertex for the numbered faces. UVs point into the label atlas.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Zeroable, bytemuck::Pod)]
pub struct Vertex {
    pub position: [f32; 3],
    pub u: f32,
    pub normal: [f32; 3],
    pub v: f32,
}

/// GPU-layout endpoint of a wireframe edge.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Zeroable, bytemuck::Pod)]
pub struct EdgeVertex {
    pub position: [f32; 3],
    pub pad: f32,
}

pub struct BuildParameters {
    /// Margin around the glyph, see [`uv::DEFAULT_INSET`].
    pub uv_inset: f32,
    /// Faces are pulled slightly toward the center so the full-radius
    /// wireframe always sits on top of them.
    pub face_shrink: f32,
}

impl Default for BuildParameters {
    fn default() -> Self {
        Self {
            uv_inset: uv::DEFAULT_INSET,
            face_shrink: 0.99,
        }
    }
}

/// Flattened, unshared geometry for one die: three vertices per face with
/// flat normals, plus the wireframe endpoints.
pub struct DieMesh {
    pub vertices: Vec<Vertex>,
    pub edge_vertices: Vec<EdgeVertex>,
}

impl DieMesh {
    pub fn build(shape: &Icosahedron, atlas: &LabelAtlas, params: &BuildParameters) -> Self {
        let corner_uvs = uv::face_uvs(params.uv_inset);

        let mut vertices = Vec::with_capacity(shape.faces.len() * 3);
        for (face_index, face) in shape.faces.iter().enumerate() {
            let normal = shape.face_normal(face_index).to_array();
            let (uv_min, uv_max) = atlas.uv_rect(face.label);
            for (corner, &index) in face.indices.iter().enumerate() {
                let position = shape.vertices[index as usize] * params.face_shrink;
                let [cu, cv] = corner_uvs[corner];
                vertices.push(Vertex {
                    position: position.to_array(),
                    u: uv_min[0] + cu * (uv_max[0] - uv_min[0]),
                    normal,
                    v: uv_min[1] + cv * (uv_max[1] - uv_min[1]),
                });
            }
        }

        let edge_vertices = shape
            .edges()
            .iter()
            .flat_map(|&[a, b]| {
                [a, b].map(|index| EdgeVertex {
                    position: shape.vertices[index as usize].to_array(),
                    pad: 0.0,
                })
            })
            .collect();

        Self {
            vertices,
            edge_vertices,
        }
    }
}

#![allow(irrefutable_let_patterns)]

mod die;
pub mod label;
mod mesh;
mod shape;
pub mod uv;

pub use die::Die;
pub use mesh::{BuildParameters, DieMesh, EdgeVertex, Vertex};
pub use shape::{Face, Icosahedron, OPPOSITE_PAIRS};

/// Number of faces on the die.
pub const FACE_COUNT: usize = 20;
/// Number of corners of the icosahedron.
pub const VERTEX_COUNT: usize = 12;
/// Number of unique edges of the icosahedron.
pub const EDGE_COUNT: usize = 30;

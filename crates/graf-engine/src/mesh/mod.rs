//! CPU-side mesh data.
//!
//! - [`Vertex`], [`MeshData`]: the data model every shape factory produces
//! - `face`: shared helpers for authoring faces and their index lists

mod face;
mod vertex;

pub use face::{
    QUAD_TEXTURE_COORDS, TRIANGLE_TEXTURE_COORDS, assign_texture_coordinates, define_face,
    generate_face_indices, set_texture_coordinate,
};
pub use vertex::{IndexList, MeshData, Vertex, VertexList};

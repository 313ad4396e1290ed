//! Built-in shapes.
//!
//! Each [`ShapeKind`] has one factory that authors its mesh; the
//! [`ShapeFactoryManager`] turns factories into cached drawables.
//!
//! Shapes are unit-sized and centred on the origin (the square sits at z = -1).
//! Closed shapes wind counter-clockwise seen from outside; flat shapes wind
//! clockwise seen from +z.

mod circle;
mod config;
mod cube;
mod factory;
mod frustum;
mod kind;
mod manager;
mod pyramid;
mod square;

pub use circle::CircleFactory;
pub use config::ShapeConfig;
pub use cube::CubeFactory;
pub use factory::{ShapeFactory, create_vao_from_data};
pub use frustum::FrustumFactory;
pub use kind::ShapeKind;
pub use manager::ShapeFactoryManager;
pub use pyramid::PyramidFactory;
pub use square::SquareFactory;

#[cfg(test)]
pub(crate) mod testing {
    use crate::mesh::MeshData;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[1] * b[2] - a[2] * b[1], a[2] * b[0] - a[0] * b[2], a[0] * b[1] - a[1] * b[0]]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Triangle normal (unnormalised) from its winding.
    pub(crate) fn normal([a, b, c]: [[f32; 3]; 3]) -> [f32; 3] {
        cross(sub(b, a), sub(c, a))
    }

    /// True when every triangle of a convex mesh around the origin faces away from it.
    pub(crate) fn faces_outward(mesh: &MeshData) -> bool {
        mesh.triangles().all(|tri| {
            let centroid = [0, 1, 2].map(|k| (tri[0][k] + tri[1][k] + tri[2][k]) / 3.0);
            dot(normal(tri), centroid) > 0.0
        })
    }

    pub(crate) fn assert_well_formed(mesh: &MeshData) {
        assert!(mesh.validate().is_ok(), "{:?}", mesh.validate());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }
}

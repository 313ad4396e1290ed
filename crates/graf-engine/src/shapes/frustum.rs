use crate::error::Result;
use crate::mesh::MeshData;

use super::cube::quad_mesh;

/// Top square of side 1, base square of side 2.
const POSITIONS: [[f32; 3]; 8] = [
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [1.0, -0.5, 1.0],
    [-1.0, -0.5, 1.0],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [1.0, -0.5, -1.0],
    [-1.0, -0.5, -1.0],
];

const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // front
    [1, 5, 6, 2], // right
    [5, 4, 7, 6], // back
    [4, 0, 3, 7], // left
    [3, 2, 6, 7], // bottom
    [4, 5, 1, 0], // top
];

/// Truncated square pyramid with trapezoidal sides.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrustumFactory;

impl FrustumFactory {
    pub fn build_mesh(&self) -> Result<MeshData> {
        quad_mesh(&POSITIONS, &FACES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::{assert_well_formed, faces_outward};

    #[test]
    fn frustum_counts() {
        let mesh = FrustumFactory.build_mesh().unwrap();
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn frustum_faces_outward() {
        assert!(faces_outward(&FrustumFactory.build_mesh().unwrap()));
    }

    #[test]
    fn base_is_wider_than_top() {
        let mesh = FrustumFactory.build_mesh().unwrap();
        let width = |y: f32| {
            mesh.vertices
                .iter()
                .filter(|v| v.position[1] == y)
                .map(|v| v.position[0].abs())
                .fold(0.0f32, f32::max)
        };
        assert_eq!(width(0.5), 0.5);
        assert_eq!(width(-0.5), 1.0);
    }
}

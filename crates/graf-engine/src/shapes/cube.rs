use crate::error::Result;
use crate::mesh::{MeshData, QUAD_TEXTURE_COORDS, Vertex, define_face, generate_face_indices};

const POSITIONS: [[f32; 3]; 8] = [
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, -0.5, 0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
    [-0.5, -0.5, -0.5],
];

// Corners listed clockwise seen from outside; the quad split reverses them.
const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // front
    [1, 5, 6, 2], // right
    [4, 5, 1, 0], // top
    [4, 0, 3, 7], // left
    [5, 4, 7, 6], // back
    [3, 2, 6, 7], // bottom
];

/// Unit cube with four vertices per face.
#[derive(Debug, Default, Clone, Copy)]
pub struct CubeFactory;

impl CubeFactory {
    pub fn build_mesh(&self) -> Result<MeshData> {
        quad_mesh(&POSITIONS, &FACES)
    }
}

/// Builds a closed mesh from quad faces, four vertices each.
pub(super) fn quad_mesh(positions: &[[f32; 3]], faces: &[[usize; 4]]) -> Result<MeshData> {
    let mut vertices = vec![Vertex::default(); faces.len() * 4];
    for (i, face) in faces.iter().enumerate() {
        define_face(&mut vertices, i * 4, positions, face, &QUAD_TEXTURE_COORDS)?;
    }

    let mut indices = Vec::new();
    generate_face_indices(&mut indices, faces.len() as u32, 0);

    Ok(MeshData::new(vertices, indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::testing::{assert_well_formed, faces_outward};

    #[test]
    fn cube_counts() {
        let mesh = CubeFactory.build_mesh().unwrap();
        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn cube_faces_outward() {
        assert!(faces_outward(&CubeFactory.build_mesh().unwrap()));
    }

    #[test]
    fn every_face_carries_the_quad_uvs() {
        let mesh = CubeFactory.build_mesh().unwrap();
        for face in mesh.vertices.chunks_exact(4) {
            let uvs: Vec<_> = face.iter().map(|v| v.tex_coord).collect();
            assert_eq!(uvs, QUAD_TEXTURE_COORDS);
        }
    }
}

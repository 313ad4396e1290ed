use crate::error::Result;
use crate::mesh::{
    MeshData, QUAD_TEXTURE_COORDS, TRIANGLE_TEXTURE_COORDS, Vertex, define_face,
    generate_face_indices,
};

const POSITIONS: [[f32; 3]; 5] = [
    [0.0, 0.5, 0.0],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, -0.5, -0.5],
    [-0.5, -0.5, -0.5],
];

// Apex first, then the base edge counter-clockwise seen from outside.
const SIDES: [[usize; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 1]];

const BASE: [usize; 4] = [1, 2, 3, 4];

const BASE_OFFSET: usize = SIDES.len() * 3;

/// Square pyramid: four triangular sides and a quad base, 16 vertices.
#[derive(Debug, Default, Clone, Copy)]
pub struct PyramidFactory;

impl PyramidFactory {
    pub fn build_mesh(&self) -> Result<MeshData> {
        let mut vertices = vec![Vertex::default(); BASE_OFFSET + BASE.len()];
        for (i, side) in SIDES.iter().enumerate() {
            define_face(&mut vertices, i * 3, &POSITIONS, side, &TRIANGLE_TEXTURE_COORDS)?;
        }
        define_face(&mut vertices, BASE_OFFSET, &POSITIONS, &BASE, &QUAD_TEXTURE_COORDS)?;

        let mut indices: Vec<u32> = (0..BASE_OFFSET as u32).collect();
        generate_face_indices(&mut indices, 1, BASE_OFFSET as u32);

        Ok(MeshData::new(vertices, indices))
    }
}

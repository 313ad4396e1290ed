use crate::error::Result;
use crate::mesh::{MeshData, Vertex};

const DEPTH: f32 = -1.0;

/// Two triangles covering [-0.5, 0.5]² at z = -1, with per-triangle vertices.
#[derive(Debug, Default, Clone, Copy)]
pub struct SquareFactory;

impl SquareFactory {
    pub fn build_mesh(&self) -> Result<MeshData> {
        let vertices = vec![
            Vertex::new([-0.5, 0.5, DEPTH], [0.0, 1.0]),
            Vertex::new([0.5, 0.5, DEPTH], [1.0, 1.0]),
            Vertex::new([0.5, -0.5, DEPTH], [1.0, 0.0]),
            Vertex::new([0.5, -0.5, DEPTH], [1.0, 0.0]),
            Vertex::new([-0.5, -0.5, DEPTH], [0.0, 0.0]),
            Vertex::new([-0.5, 0.5, DEPTH], [0.0, 1.0]),
        ];
        let indices = (0..vertices.len() as u32).collect();

        Ok(MeshData::new(vertices, indices))
    }
}

use bytemuck::{Pod, Zeroable};

use crate::error::{GrafError, Result};
use crate::render::{VertexAttributeKind, VertexLayout};

/// Interleaved vertex record: position followed by texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    #[inline]
    pub const fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }

    /// Attribute layout matching the field order above.
    pub fn layout() -> VertexLayout {
        VertexLayout::new()
            .with(VertexAttributeKind::Position)
            .with(VertexAttributeKind::Texture)
    }
}

/// Ordered vertices; positions in this list form the index space.
pub type VertexList = Vec<Vertex>;

/// Triangle list, three indices per triangle.
pub type IndexList = Vec<u32>;

/// Geometry produced by a shape factory, before upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: VertexList,
    pub indices: IndexList,
}

impl MeshData {
    pub fn new(vertices: VertexList, indices: IndexList) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let p = |i: u32| self.vertices.get(i as usize).map(|v| v.position);
            Some([p(tri[0])?, p(tri[1])?, p(tri[2])?])
        })
    }

    /// Checks the mesh is uploadable: non-empty, whole triangles, indices in range.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.is_empty() {
            return Err(GrafError::buffer("mesh has no vertices"));
        }
        if self.indices.is_empty() {
            return Err(GrafError::buffer("mesh has no indices"));
        }
        if self.indices.len() % 3 != 0 {
            return Err(GrafError::buffer(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }

        let count = self.vertices.len();
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(GrafError::buffer(format!(
                "index {bad} out of range for {count} vertices"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_matches_its_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), Vertex::layout().stride() as usize);
        assert_eq!(std::mem::offset_of!(Vertex, tex_coord), 12);
    }

    #[test]
    fn validate_rejects_bad_meshes() {
        let v = vec![Vertex::default(); 3];

        assert!(MeshData::new(vec![], vec![0, 1, 2]).validate().unwrap_err().is_buffer());
        assert!(MeshData::new(v.clone(), vec![]).validate().unwrap_err().is_buffer());
        assert!(MeshData::new(v.clone(), vec![0, 1]).validate().is_err());
        assert!(MeshData::new(v.clone(), vec![0, 1, 3]).validate().is_err());
        assert!(MeshData::new(v, vec![0, 1, 2]).validate().is_ok());
    }

    #[test]
    fn triangles_resolve_positions() {
        let mesh = MeshData::new(
            vec![
                Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0]),
                Vertex::new([1.0, 0.0, 0.0], [1.0, 0.0]),
                Vertex::new([0.0, 1.0, 0.0], [0.0, 1.0]),
            ],
            vec![0, 1, 2],
        );
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        assert_eq!(mesh.triangle_count(), 1);
    }
}

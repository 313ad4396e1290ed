use std::rc::Rc;

use crate::error::{GrafError, Result};
use crate::mesh::{MeshData, Vertex};
use crate::render::backend::RenderBackend;
use crate::render::{IndexBuffer, VertexArray, VertexAttributeKind, VertexBuffer};

use super::{
    CircleFactory, CubeFactory, FrustumFactory, PyramidFactory, ShapeConfig, ShapeKind,
    SquareFactory,
};

/// One factory per [`ShapeKind`].
#[derive(Debug, Clone, Copy)]
pub enum ShapeFactory {
    Circle(CircleFactory),
    Square(SquareFactory),
    Cube(CubeFactory),
    Pyramid(PyramidFactory),
    Frustum(FrustumFactory),
}

impl ShapeFactory {
    pub fn for_kind(kind: ShapeKind, config: &ShapeConfig) -> Result<Self> {
        Ok(match kind {
            ShapeKind::Circle => Self::Circle(CircleFactory::new(config.circle_angle_step)?),
            ShapeKind::Square => Self::Square(SquareFactory),
            ShapeKind::Cube => Self::Cube(CubeFactory),
            ShapeKind::Pyramid => Self::Pyramid(PyramidFactory),
            ShapeKind::Frustum => Self::Frustum(FrustumFactory),
        })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle(_) => ShapeKind::Circle,
            Self::Square(_) => ShapeKind::Square,
            Self::Cube(_) => ShapeKind::Cube,
            Self::Pyramid(_) => ShapeKind::Pyramid,
            Self::Frustum(_) => ShapeKind::Frustum,
        }
    }

    /// Authors the shape's vertices and indices without touching the GPU.
    pub fn build_mesh(&self) -> Result<MeshData> {
        match self {
            Self::Circle(f) => f.build_mesh(),
            Self::Square(f) => f.build_mesh(),
            Self::Cube(f) => f.build_mesh(),
            Self::Pyramid(f) => f.build_mesh(),
            Self::Frustum(f) => f.build_mesh(),
        }
    }

    /// Builds the mesh and uploads it as an unbound drawable.
    pub fn create_shape<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> Result<VertexArray> {
        let mesh = self.build_mesh()?;
        log::debug!(
            "creating {} ({} vertices, {} triangles)",
            self.kind(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        create_vao_from_data(backend, &mesh.vertices, &mesh.indices)
    }
}

/// Uploads `vertices` and `indices` and composes them into a drawable with
/// Position and Texture attributes activated. The drawable is returned unbound.
///
/// Resources created before a failure are released.
pub fn create_vao_from_data<B: RenderBackend + ?Sized>(
    backend: &mut B,
    vertices: &[Vertex],
    indices: &[u32],
) -> Result<VertexArray> {
    if vertices.is_empty() {
        return Err(GrafError::buffer("invalid vertex data"));
    }
    if indices.is_empty() {
        return Err(GrafError::buffer("invalid index data"));
    }

    let vb = Rc::new(VertexBuffer::create(backend, vertices).map_err(setup_failed)?);
    let ib = match IndexBuffer::create(backend, indices) {
        Ok(ib) => Rc::new(ib),
        Err(e) => {
            vb.release(backend);
            return Err(setup_failed(e));
        }
    };
    let mut va = match VertexArray::create(backend) {
        Ok(va) => va,
        Err(e) => {
            vb.release(backend);
            ib.release(backend);
            return Err(setup_failed(e));
        }
    };

    if let Err(e) = configure(backend, &mut va, &vb, &ib) {
        va.release(backend);
        vb.release(backend);
        ib.release(backend);
        return Err(setup_failed(e));
    }
    Ok(va)
}

fn configure<B: RenderBackend + ?Sized>(
    backend: &mut B,
    va: &mut VertexArray,
    vb: &Rc<VertexBuffer>,
    ib: &Rc<IndexBuffer>,
) -> Result<()> {
    va.set_vertex_buffer(backend, Rc::clone(vb))?;
    va.set_index_buffer(backend, Rc::clone(ib))?;
    va.add_vertex_attribute(VertexAttributeKind::Position);
    va.add_vertex_attribute(VertexAttributeKind::Texture);
    va.activate_attributes(backend)?;
    va.unbind(backend)
}

fn setup_failed(e: GrafError) -> GrafError {
    GrafError::buffer(format!("VAO setup failed: {}", e.message()))
}

//! Graphics context seam.
//!
//! Buffers and vertex arrays are written against [`RenderBackend`], a
//! bind-to-edit context in the style of classic GPU APIs. The context is
//! always passed explicitly; there is no global "current context".
//!
//! Implementations:
//! - [`WgpuBackend`]: real GPU resources on a `wgpu::Device`
//! - [`HeadlessBackend`]: records calls without a GPU (tests, tooling)

mod error;
mod headless;
mod wgpu_backend;

pub use self::error::BackendError;
pub use self::headless::{BackendCall, FailPoint, HeadlessBackend};
pub use self::wgpu_backend::WgpuBackend;

use crate::render::layout::VertexAttributeKind;

/// Opaque buffer name issued by a backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BufferHandle(pub(crate) u32);

/// Opaque vertex array name issued by a backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ArrayHandle(pub(crate) u32);

impl BufferHandle {
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl ArrayHandle {
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Binding point for a buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Vertex,
    /// 32-bit triangle-list indices.
    Index,
}

/// Context operations required by the resource layer.
///
/// Binding never fails at the call site. A backend that detects a bad bind
/// stores the failure and hands it out from [`take_error`](Self::take_error),
/// so it surfaces on the next fallible step.
pub trait RenderBackend {
    /// Allocates a buffer and uploads `contents` once. The data is immutable.
    fn create_buffer(
        &mut self,
        target: BufferTarget,
        contents: &[u8],
    ) -> Result<BufferHandle, BackendError>;

    /// Binds `buffer` to `target`, or clears the binding with `None`.
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>);

    /// Frees the buffer. Unknown handles are ignored.
    fn delete_buffer(&mut self, buffer: BufferHandle);

    fn create_vertex_array(&mut self) -> Result<ArrayHandle, BackendError>;

    fn bind_vertex_array(&mut self, array: Option<ArrayHandle>);

    /// Frees the vertex array. Unknown handles are ignored.
    fn delete_vertex_array(&mut self, array: ArrayHandle);

    /// Declares attribute `location` of the bound vertex array, sourced from
    /// the buffer currently bound to [`BufferTarget::Vertex`].
    fn vertex_attribute(
        &mut self,
        location: u32,
        kind: VertexAttributeKind,
        stride: u32,
        offset: u32,
    ) -> Result<(), BackendError>;

    /// Draws `index_count` indices of the bound vertex array as a triangle list.
    fn draw_indexed(&mut self, index_count: u32) -> Result<(), BackendError>;

    /// Returns and clears the pending deferred error, if any.
    fn take_error(&mut self) -> Option<BackendError>;
}

//! Immutable GPU buffers.
//!
//! Lifecycle: created (data uploaded once) → bound ⇄ unbound → released.
//! There is no update or resize; a new shape means a new buffer.
//!
//! Buffers do not release themselves on drop because releasing needs the
//! backend. Owners call [`release`](VertexBuffer::release) explicitly.

use std::cell::Cell;

use bytemuck::Pod;

use crate::error::{GrafError, Result};
use crate::render::backend::{BufferHandle, BufferTarget, RenderBackend};

/// Size of one index element. Index buffers always hold `u32`.
pub const INDEX_SIZE: usize = std::mem::size_of::<u32>();

/// Observable lifecycle state of a GPU resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceState {
    Unbound,
    Bound,
    Released,
}

#[derive(Debug)]
struct RawBuffer {
    target: BufferTarget,
    handle: Cell<Option<BufferHandle>>,
    size_bytes: usize,
    bound: Cell<bool>,
}

impl RawBuffer {
    fn create<B>(backend: &mut B, target: BufferTarget, bytes: &[u8], what: &str) -> Result<Self>
    where
        B: RenderBackend + ?Sized,
    {
        if bytes.is_empty() {
            return Err(GrafError::buffer(format!("invalid {what} data or size")));
        }

        let handle = backend
            .create_buffer(target, bytes)
            .map_err(|e| GrafError::buffer(format!("failed to generate {what}: {e}")))?;

        if let Some(e) = backend.take_error() {
            backend.delete_buffer(handle);
            return Err(GrafError::buffer(format!("{what} creation failed: {e}")));
        }

        log::trace!("created {what} {} ({} bytes)", handle.raw(), bytes.len());

        Ok(Self {
            target,
            handle: Cell::new(Some(handle)),
            size_bytes: bytes.len(),
            bound: Cell::new(false),
        })
    }

    fn bind<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        let Some(handle) = self.handle.get() else { return };
        backend.bind_buffer(self.target, Some(handle));
        self.bound.set(true);
    }

    fn unbind<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        backend.bind_buffer(self.target, None);
        self.bound.set(false);
    }

    fn release<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        if let Some(handle) = self.handle.take() {
            backend.delete_buffer(handle);
            self.bound.set(false);
            log::trace!("released {:?} buffer {}", self.target, handle.raw());
        }
    }

    fn state(&self) -> ResourceState {
        match (self.handle.get(), self.bound.get()) {
            (None, _) => ResourceState::Released,
            (Some(_), true) => ResourceState::Bound,
            (Some(_), false) => ResourceState::Unbound,
        }
    }
}

/// Interleaved per-vertex data.
#[derive(Debug)]
pub struct VertexBuffer {
    raw: RawBuffer,
}

impl VertexBuffer {
    /// Uploads `vertices` into a new immutable buffer.
    pub fn create<B, T>(backend: &mut B, vertices: &[T]) -> Result<Self>
    where
        B: RenderBackend + ?Sized,
        T: Pod,
    {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        RawBuffer::create(backend, BufferTarget::Vertex, bytes, "vertex buffer").map(|raw| Self { raw })
    }

    pub fn bind<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        self.raw.bind(backend);
    }

    pub fn unbind<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        self.raw.unbind(backend);
    }

    /// Frees the buffer. Calling it again is a no-op.
    pub fn release<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        self.raw.release(backend);
    }

    /// Backend name, or `None` once released.
    pub fn handle(&self) -> Option<BufferHandle> {
        self.raw.handle.get()
    }

    pub fn size_bytes(&self) -> usize {
        self.raw.size_bytes
    }

    pub fn state(&self) -> ResourceState {
        self.raw.state()
    }

    pub fn is_released(&self) -> bool {
        self.raw.handle.get().is_none()
    }
}

/// Triangle-list indices, 32 bits each.
#[derive(Debug)]
pub struct IndexBuffer {
    raw: RawBuffer,
    index_count: u32,
}

impl IndexBuffer {
    /// Uploads `indices` into a new immutable buffer.
    pub fn create<B>(backend: &mut B, indices: &[u32]) -> Result<Self>
    where
        B: RenderBackend + ?Sized,
    {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        let raw = RawBuffer::create(backend, BufferTarget::Index, bytes, "index buffer")?;
        let index_count = u32::try_from(raw.size_bytes / INDEX_SIZE).map_err(|_| {
            GrafError::buffer(format!("index buffer of {} bytes is too large", raw.size_bytes))
        })?;
        Ok(Self { raw, index_count })
    }

    pub fn bind<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        self.raw.bind(backend);
    }

    pub fn unbind<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        self.raw.unbind(backend);
    }

    /// Frees the buffer. Calling it again is a no-op.
    pub fn release<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        self.raw.release(backend);
    }

    pub fn handle(&self) -> Option<BufferHandle> {
        self.raw.handle.get()
    }

    /// Number of indices: uploaded bytes / [`INDEX_SIZE`].
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn size_bytes(&self) -> usize {
        self.raw.size_bytes
    }

    pub fn state(&self) -> ResourceState {
        self.raw.state()
    }

    pub fn is_released(&self) -> bool {
        self.raw.handle.get().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::{BackendCall, FailPoint, HeadlessBackend};

    // ── create ────────────────────────────────────────────────────────────

    #[test]
    fn create_rejects_empty_data() {
        let mut be = HeadlessBackend::new();
        let err = VertexBuffer::create::<_, f32>(&mut be, &[]).unwrap_err();
        assert!(err.is_buffer());
        let err = IndexBuffer::create(&mut be, &[]).unwrap_err();
        assert!(err.is_buffer());
        assert_eq!(be.live_buffers(), 0);
    }

    #[test]
    fn create_wraps_allocation_failure() {
        let mut be = HeadlessBackend::new();
        be.fail_next(FailPoint::CreateBuffer);
        let err = VertexBuffer::create(&mut be, &[1.0f32, 2.0, 3.0]).unwrap_err();
        assert!(err.is_buffer());
        assert!(err.message().contains("failed to generate vertex buffer"));
    }

    #[test]
    fn create_uploads_bytes_once() {
        let mut be = HeadlessBackend::new();
        let vb = VertexBuffer::create(&mut be, &[0.0f32; 10]).unwrap();
        assert_eq!(vb.size_bytes(), 40);
        assert_eq!(vb.state(), ResourceState::Unbound);
        assert_eq!(be.buffer_size(vb.handle().unwrap()), Some(40));
    }

    #[test]
    fn index_count_is_bytes_over_four() {
        let mut be = HeadlessBackend::new();
        let ib = IndexBuffer::create(&mut be, &[0, 2, 1, 0, 3, 2]).unwrap();
        assert_eq!(ib.index_count(), 6);
        assert_eq!(ib.size_bytes(), 24);
    }

    // ── bind / release ────────────────────────────────────────────────────

    #[test]
    fn bind_unbind_transitions() {
        let mut be = HeadlessBackend::new();
        let vb = VertexBuffer::create(&mut be, &[0u32; 3]).unwrap();

        vb.bind(&mut be);
        assert_eq!(vb.state(), ResourceState::Bound);
        assert_eq!(be.bound_buffer(BufferTarget::Vertex), vb.handle());

        vb.unbind(&mut be);
        assert_eq!(vb.state(), ResourceState::Unbound);
        assert_eq!(be.bound_buffer(BufferTarget::Vertex), None);
    }

    #[test]
    fn release_is_idempotent() {
        let mut be = HeadlessBackend::new();
        let ib = IndexBuffer::create(&mut be, &[0, 1, 2]).unwrap();

        ib.release(&mut be);
        ib.release(&mut be);

        assert!(ib.is_released());
        assert_eq!(ib.state(), ResourceState::Released);
        assert_eq!(be.live_buffers(), 0);
        let deletes = be
            .calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::DeleteBuffer(_)))
            .count();
        assert_eq!(deletes, 1);
    }

    #[test]
    fn bind_after_release_does_nothing() {
        let mut be = HeadlessBackend::new();
        let vb = VertexBuffer::create(&mut be, &[0u32; 3]).unwrap();
        vb.release(&mut be);
        be.clear_calls();

        vb.bind(&mut be);
        assert!(be.calls().is_empty());
        assert_eq!(vb.state(), ResourceState::Released);
    }
}

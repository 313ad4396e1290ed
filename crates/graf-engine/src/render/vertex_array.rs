//! Drawable composed of one vertex buffer, one index buffer and a layout.
//!
//! Setup order:
//! `create` → `set_vertex_buffer` / `set_index_buffer` → `add_vertex_attribute`*
//! → `activate_attributes` → (`bind` → `draw` → `unbind`)* → `release`.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{GrafError, Result};
use crate::render::backend::{ArrayHandle, RenderBackend};
use crate::render::buffer::{IndexBuffer, ResourceState, VertexBuffer};
use crate::render::layout::{VertexAttributeKind, VertexLayout};

#[derive(Debug)]
pub struct VertexArray {
    handle: Cell<Option<ArrayHandle>>,
    bound: Cell<bool>,

    vertex_buffer: Option<Rc<VertexBuffer>>,
    index_buffer: Option<Rc<IndexBuffer>>,

    layout: VertexLayout,
    activated: bool,
}

impl VertexArray {
    /// Allocates an empty vertex array.
    pub fn create<B: RenderBackend + ?Sized>(backend: &mut B) -> Result<Self> {
        let handle = backend
            .create_vertex_array()
            .map_err(|e| GrafError::buffer(format!("failed to generate vertex array: {e}")))?;

        if let Some(e) = backend.take_error() {
            backend.delete_vertex_array(handle);
            return Err(GrafError::buffer(format!("vertex array generation failed: {e}")));
        }

        Ok(Self {
            handle: Cell::new(Some(handle)),
            bound: Cell::new(false),
            vertex_buffer: None,
            index_buffer: None,
            layout: VertexLayout::new(),
            activated: false,
        })
    }

    pub fn bind<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        let Some(handle) = self.handle.get() else { return };
        backend.bind_vertex_array(Some(handle));
        self.bound.set(true);
    }

    /// Unbinds the array and both attached buffers.
    ///
    /// Both buffers must be attached.
    pub fn unbind<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> Result<()> {
        let (Some(vb), Some(ib)) = (&self.vertex_buffer, &self.index_buffer) else {
            return Err(GrafError::buffer(
                "cannot unbind a vertex array before both buffers are attached",
            ));
        };

        self.unbind_array(backend);
        ib.unbind(backend);
        vb.unbind(backend);
        Ok(())
    }

    /// Attaches `buffer` and binds it with this array bound. A vertex array
    /// holds exactly one vertex buffer; attaching a second one is an error.
    ///
    /// On a bind failure the array is left unbound.
    pub fn set_vertex_buffer<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        buffer: Rc<VertexBuffer>,
    ) -> Result<()> {
        self.ensure_live("set a vertex buffer")?;
        if self.vertex_buffer.is_some() {
            return Err(GrafError::buffer("vertex buffer already attached"));
        }
        if buffer.is_released() {
            return Err(GrafError::buffer("vertex buffer has been released"));
        }

        self.bind(backend);
        buffer.bind(backend);
        self.vertex_buffer = Some(buffer);

        if let Some(e) = backend.take_error() {
            self.unbind_array(backend);
            return Err(GrafError::buffer(format!("failed to set vertex buffer: {e}")));
        }
        Ok(())
    }

    /// Attaches `buffer`; the binding becomes part of this array's state.
    /// Attaching a second index buffer is an error.
    ///
    /// On a bind failure the array is left unbound.
    pub fn set_index_buffer<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        buffer: Rc<IndexBuffer>,
    ) -> Result<()> {
        self.ensure_live("set an index buffer")?;
        if self.index_buffer.is_some() {
            return Err(GrafError::buffer("index buffer already attached"));
        }
        if buffer.is_released() {
            return Err(GrafError::buffer("index buffer has been released"));
        }

        self.bind(backend);
        buffer.bind(backend);
        self.index_buffer = Some(buffer);

        if let Some(e) = backend.take_error() {
            self.unbind_array(backend);
            return Err(GrafError::buffer(format!("failed to set index buffer: {e}")));
        }
        Ok(())
    }

    /// Appends an attribute to the layout. Takes effect on activation.
    pub fn add_vertex_attribute(&mut self, kind: VertexAttributeKind) {
        self.layout.push(kind);
    }

    /// Registers every declared attribute with the backend, locking in the layout.
    pub fn activate_attributes<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) -> Result<()> {
        self.ensure_live("activate attributes")?;
        if self.layout.is_empty() {
            return Err(GrafError::buffer("no vertex attributes specified"));
        }
        let Some(vb) = &self.vertex_buffer else {
            return Err(GrafError::buffer("no vertex buffer attached for attributes"));
        };

        self.bind(backend);
        vb.bind(backend);

        let stride = self.layout.stride();
        for binding in self.layout.bindings() {
            backend
                .vertex_attribute(binding.location, binding.kind, stride, binding.offset)
                .map_err(|e| {
                    GrafError::buffer(format!(
                        "vertex attribute setup failed for location {}: {e}",
                        binding.location
                    ))
                })?;
        }

        if let Some(e) = backend.take_error() {
            return Err(GrafError::buffer(format!("vertex attribute enable failed: {e}")));
        }

        self.activated = true;
        Ok(())
    }

    /// Issues a triangle-list draw of every index in the attached index buffer.
    ///
    /// The array is expected to be bound by the caller.
    pub fn draw<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> Result<()> {
        self.ensure_live("draw")?;
        let Some(ib) = &self.index_buffer else {
            return Err(GrafError::buffer("no index buffer bound for drawing"));
        };
        if !self.activated {
            return Err(GrafError::buffer("vertex attributes have not been activated"));
        }

        backend
            .draw_indexed(ib.index_count())
            .map_err(|e| GrafError::buffer(format!("draw call failed: {e}")))?;

        if let Some(e) = backend.take_error() {
            return Err(GrafError::buffer(format!("draw call failed: {e}")));
        }
        Ok(())
    }

    /// Frees the array and both attached buffers. Calling it again is a no-op.
    pub fn release<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        if let Some(handle) = self.handle.take() {
            backend.delete_vertex_array(handle);
            self.bound.set(false);
            log::trace!("released vertex array {}", handle.raw());
        }
        if let Some(vb) = &self.vertex_buffer {
            vb.release(backend);
        }
        if let Some(ib) = &self.index_buffer {
            ib.release(backend);
        }
    }

    pub fn handle(&self) -> Option<ArrayHandle> {
        self.handle.get()
    }

    pub fn state(&self) -> ResourceState {
        match (self.handle.get(), self.bound.get()) {
            (None, _) => ResourceState::Released,
            (Some(_), true) => ResourceState::Bound,
            (Some(_), false) => ResourceState::Unbound,
        }
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn vertex_buffer(&self) -> Option<&Rc<VertexBuffer>> {
        self.vertex_buffer.as_ref()
    }

    pub fn index_buffer(&self) -> Option<&Rc<IndexBuffer>> {
        self.index_buffer.as_ref()
    }

    /// Indices per draw, or 0 without an index buffer.
    pub fn index_count(&self) -> u32 {
        self.index_buffer.as_ref().map_or(0, |ib| ib.index_count())
    }

    /// Vertices in the attached buffer, derived from the layout stride.
    pub fn vertex_count(&self) -> usize {
        match (&self.vertex_buffer, self.layout.stride()) {
            (Some(vb), stride) if stride > 0 => vb.size_bytes() / stride as usize,
            _ => 0,
        }
    }

    fn unbind_array<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        backend.bind_vertex_array(None);
        self.bound.set(false);
    }

    fn ensure_live(&self, op: &str) -> Result<()> {
        if self.handle.get().is_none() {
            return Err(GrafError::buffer(format!("cannot {op}: vertex array has been released")));
        }
        Ok(())
    }
}

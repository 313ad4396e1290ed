use std::collections::HashMap;

use crate::render::layout::VertexAttributeKind;

use super::{ArrayHandle, BackendError, BufferHandle, BufferTarget, RenderBackend};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    CreateBuffer {
        target: BufferTarget,
        buffer: BufferHandle,
        size: usize,
    },
    BindBuffer {
        target: BufferTarget,
        buffer: Option<BufferHandle>,
    },
    DeleteBuffer(BufferHandle),
    CreateVertexArray(ArrayHandle),
    BindVertexArray(Option<ArrayHandle>),
    DeleteVertexArray(ArrayHandle),
    VertexAttribute {
        location: u32,
        kind: VertexAttributeKind,
        stride: u32,
        offset: u32,
    },
    DrawIndexed {
        array: ArrayHandle,
        index_count: u32,
    },
}

/// Operation that can be made to fail once via [`HeadlessBackend::fail_next`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FailPoint {
    CreateBuffer,
    CreateVertexArray,
    /// Leaves a deferred error behind instead of failing the call.
    BindBuffer,
    /// Leaves a deferred error behind instead of failing the call.
    BindVertexArray,
    VertexAttribute,
    DrawIndexed,
}

#[derive(Debug)]
struct BufferSlot {
    target: BufferTarget,
    size: usize,
}

#[derive(Debug, Default)]
struct ArraySlot {
    index_buffer: Option<BufferHandle>,
    attributes: Vec<(u32, BufferHandle)>,
}

/// Backend that tracks resource names and binding state without a GPU.
///
/// Every call is appended to a log readable through [`calls`](Self::calls).
/// Binding rules mirror a classic vertex-array context: binding the index
/// target while an array is bound stores that buffer in the array, and each
/// declared attribute captures the buffer bound to the vertex target.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_name: u32,
    buffers: HashMap<u32, BufferSlot>,
    arrays: HashMap<u32, ArraySlot>,

    bound_array: Option<ArrayHandle>,
    bound_vertex: Option<BufferHandle>,
    bound_index: Option<BufferHandle>,

    pending_error: Option<BackendError>,
    fail_next: HashMap<FailPoint, u32>,
    calls: Vec<BackendCall>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call at `point` fail.
    pub fn fail_next(&mut self, point: FailPoint) {
        *self.fail_next.entry(point).or_insert(0) += 1;
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn live_arrays(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_live_buffer(&self, buffer: BufferHandle) -> bool {
        self.buffers.contains_key(&buffer.0)
    }

    pub fn is_live_array(&self, array: ArrayHandle) -> bool {
        self.arrays.contains_key(&array.0)
    }

    /// Uploaded size in bytes of a live buffer.
    pub fn buffer_size(&self, buffer: BufferHandle) -> Option<usize> {
        self.buffers.get(&buffer.0).map(|b| b.size)
    }

    pub fn bound_array(&self) -> Option<ArrayHandle> {
        self.bound_array
    }

    pub fn bound_buffer(&self, target: BufferTarget) -> Option<BufferHandle> {
        match target {
            BufferTarget::Vertex => self.bound_vertex,
            BufferTarget::Index => self.bound_index,
        }
    }

    /// Index buffer recorded in a vertex array's state.
    pub fn array_index_buffer(&self, array: ArrayHandle) -> Option<BufferHandle> {
        self.arrays.get(&array.0).and_then(|a| a.index_buffer)
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BackendCall::DrawIndexed { .. }))
            .count()
    }

    fn should_fail(&mut self, point: FailPoint) -> bool {
        match self.fail_next.get_mut(&point) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    fn alloc_name(&mut self) -> Result<u32, BackendError> {
        let next = self
            .next_name
            .checked_add(1)
            .ok_or_else(|| BackendError::ResourceCreationFailed("name space exhausted".into()))?;
        self.next_name = next;
        Ok(next)
    }

    fn set_pending(&mut self, err: BackendError) {
        // First error wins until read, like a sticky context error flag.
        if self.pending_error.is_none() {
            self.pending_error = Some(err);
        }
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_buffer(
        &mut self,
        target: BufferTarget,
        contents: &[u8],
    ) -> Result<BufferHandle, BackendError> {
        if self.should_fail(FailPoint::CreateBuffer) {
            return Err(BackendError::OutOfMemory);
        }
        if contents.is_empty() {
            return Err(BackendError::ResourceCreationFailed("zero-sized buffer".into()));
        }

        let buffer = BufferHandle(self.alloc_name()?);
        self.buffers.insert(buffer.0, BufferSlot { target, size: contents.len() });
        self.calls.push(BackendCall::CreateBuffer {
            target,
            buffer,
            size: contents.len(),
        });
        Ok(buffer)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        self.calls.push(BackendCall::BindBuffer { target, buffer });

        if self.should_fail(FailPoint::BindBuffer) {
            self.set_pending(BackendError::InvalidOperation(format!("bind {target:?} buffer")));
            return;
        }

        if let Some(b) = buffer {
            match self.buffers.get(&b.0) {
                None => {
                    self.set_pending(BackendError::InvalidHandle(format!("buffer {}", b.0)));
                    return;
                }
                Some(slot) if slot.target != target => {
                    self.set_pending(BackendError::InvalidOperation(format!(
                        "buffer {} created for {:?}, bound to {target:?}",
                        b.0, slot.target
                    )));
                    return;
                }
                Some(_) => {}
            }
        }

        match target {
            BufferTarget::Vertex => self.bound_vertex = buffer,
            BufferTarget::Index => {
                self.bound_index = buffer;
                if let Some(array) = self.bound_array.and_then(|a| self.arrays.get_mut(&a.0)) {
                    array.index_buffer = buffer;
                }
            }
        }
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        if self.buffers.remove(&buffer.0).is_none() {
            return;
        }
        self.calls.push(BackendCall::DeleteBuffer(buffer));

        if self.bound_vertex == Some(buffer) {
            self.bound_vertex = None;
        }
        if self.bound_index == Some(buffer) {
            self.bound_index = None;
        }
    }

    fn create_vertex_array(&mut self) -> Result<ArrayHandle, BackendError> {
        if self.should_fail(FailPoint::CreateVertexArray) {
            return Err(BackendError::ResourceCreationFailed("vertex array".into()));
        }

        let array = ArrayHandle(self.alloc_name()?);
        self.arrays.insert(array.0, ArraySlot::default());
        self.calls.push(BackendCall::CreateVertexArray(array));
        Ok(array)
    }

    fn bind_vertex_array(&mut self, array: Option<ArrayHandle>) {
        self.calls.push(BackendCall::BindVertexArray(array));

        if self.should_fail(FailPoint::BindVertexArray) {
            self.set_pending(BackendError::InvalidOperation("bind vertex array".into()));
            return;
        }

        match array {
            Some(a) if !self.arrays.contains_key(&a.0) => {
                self.set_pending(BackendError::InvalidHandle(format!("vertex array {}", a.0)));
            }
            Some(a) => {
                self.bound_array = Some(a);
                // The element binding is part of vertex-array state.
                self.bound_index = self.arrays.get(&a.0).and_then(|s| s.index_buffer);
            }
            None => {
                self.bound_array = None;
                self.bound_index = None;
            }
        }
    }

    fn delete_vertex_array(&mut self, array: ArrayHandle) {
        if self.arrays.remove(&array.0).is_none() {
            return;
        }
        self.calls.push(BackendCall::DeleteVertexArray(array));

        if self.bound_array == Some(array) {
            self.bound_array = None;
            self.bound_index = None;
        }
    }

    fn vertex_attribute(
        &mut self,
        location: u32,
        kind: VertexAttributeKind,
        stride: u32,
        offset: u32,
    ) -> Result<(), BackendError> {
        if self.should_fail(FailPoint::VertexAttribute) {
            return Err(BackendError::InvalidOperation(format!("attribute {location}")));
        }

        let vertex = self.bound_vertex.ok_or_else(|| {
            BackendError::InvalidOperation("no vertex buffer bound for attribute".into())
        })?;
        let array = self
            .bound_array
            .and_then(|a| self.arrays.get_mut(&a.0))
            .ok_or_else(|| BackendError::InvalidOperation("no vertex array bound".into()))?;

        array.attributes.retain(|(loc, _)| *loc != location);
        array.attributes.push((location, vertex));

        self.calls.push(BackendCall::VertexAttribute {
            location,
            kind,
            stride,
            offset,
        });
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<(), BackendError> {
        if self.should_fail(FailPoint::DrawIndexed) {
            return Err(BackendError::InvalidOperation("draw".into()));
        }

        let array = self
            .bound_array
            .ok_or_else(|| BackendError::InvalidOperation("no vertex array bound".into()))?;
        let slot = self
            .arrays
            .get(&array.0)
            .ok_or_else(|| BackendError::InvalidHandle(format!("vertex array {}", array.0)))?;
        let index = slot
            .index_buffer
            .ok_or_else(|| BackendError::InvalidOperation("no index buffer in vertex array".into()))?;
        if slot.attributes.is_empty() {
            return Err(BackendError::InvalidOperation("no attributes enabled".into()));
        }

        let capacity = self
            .buffers
            .get(&index.0)
            .map(|b| b.size / std::mem::size_of::<u32>())
            .ok_or_else(|| BackendError::InvalidHandle(format!("buffer {}", index.0)))?;
        if index_count as usize > capacity {
            return Err(BackendError::InvalidOperation(format!(
                "draw of {index_count} indices from a buffer holding {capacity}"
            )));
        }

        self.calls.push(BackendCall::DrawIndexed { array, index_count });
        Ok(())
    }

    fn take_error(&mut self) -> Option<BackendError> {
        self.pending_error.take()
    }
}

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::device::Gpu;
use crate::render::layout::VertexAttributeKind;

use super::{ArrayHandle, BackendError, BufferHandle, BufferTarget, RenderBackend};

#[derive(Debug, Default)]
struct ArrayState {
    vertex_buffer: Option<BufferHandle>,
    index_buffer: Option<BufferHandle>,
    stride: u32,
    attributes: Vec<wgpu::VertexAttribute>,
}

/// [`RenderBackend`] backed by wgpu.
///
/// wgpu has no bindable vertex-array objects, so their state (attached
/// buffers + attribute layout) is kept here and replayed into the active
/// render pass at draw time.
///
/// Frame usage:
/// 1. open a render pass on the frame encoder and hand it to [`begin_pass`]
/// 2. set pipeline/bind groups through [`pass_mut`], then bind + draw shapes
/// 3. [`end_pass`] before finishing the encoder
///
/// [`begin_pass`]: Self::begin_pass
/// [`pass_mut`]: Self::pass_mut
/// [`end_pass`]: Self::end_pass
pub struct WgpuBackend {
    device: wgpu::Device,

    buffers: HashMap<u32, (BufferTarget, wgpu::Buffer)>,
    arrays: HashMap<u32, ArrayState>,
    next_name: u32,

    bound_array: Option<ArrayHandle>,
    bound_vertex: Option<BufferHandle>,
    bound_index: Option<BufferHandle>,

    pending_error: Option<BackendError>,

    // Lifetime is erased; the encoder stays locked until `end_pass`.
    pass: Option<wgpu::RenderPass<'static>>,
}

impl WgpuBackend {
    pub fn new(gpu: &Gpu) -> Self {
        Self::from_device(gpu.device().clone())
    }

    pub fn from_device(device: wgpu::Device) -> Self {
        Self {
            device,
            buffers: HashMap::new(),
            arrays: HashMap::new(),
            next_name: 0,
            bound_array: None,
            bound_vertex: None,
            bound_index: None,
            pending_error: None,
            pass: None,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Starts recording draws into `pass`. Any previous pass is ended first.
    pub fn begin_pass(&mut self, pass: wgpu::RenderPass<'_>) {
        self.pass = Some(pass.forget_lifetime());
    }

    /// Ends the active pass, unlocking its encoder.
    pub fn end_pass(&mut self) {
        self.pass = None;
    }

    /// Active pass, for pipeline and bind-group setup between draws.
    pub fn pass_mut(&mut self) -> Option<&mut wgpu::RenderPass<'static>> {
        self.pass.as_mut()
    }

    /// Underlying wgpu buffer for a live handle.
    pub fn buffer(&self, buffer: BufferHandle) -> Option<&wgpu::Buffer> {
        self.buffers.get(&buffer.0).map(|(_, b)| b)
    }

    /// Vertex buffer layout declared on `array`, for render pipeline creation.
    pub fn vertex_buffer_layout(&self, array: ArrayHandle) -> Option<wgpu::VertexBufferLayout<'_>> {
        let state = self.arrays.get(&array.0)?;
        Some(wgpu::VertexBufferLayout {
            array_stride: state.stride as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &state.attributes,
        })
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
        if self.pending_error.is_none() {
            self.pending_error = Some(err);
        }
    }
}

fn vertex_format(kind: VertexAttributeKind) -> wgpu::VertexFormat {
    match kind {
        VertexAttributeKind::Position | VertexAttributeKind::Normal => wgpu::VertexFormat::Float32x3,
        VertexAttributeKind::Texture => wgpu::VertexFormat::Float32x2,
        VertexAttributeKind::Color => wgpu::VertexFormat::Float32x4,
    }
}

impl RenderBackend for WgpuBackend {
    fn create_buffer(
        &mut self,
        target: BufferTarget,
        contents: &[u8],
    ) -> Result<BufferHandle, BackendError> {
        if contents.is_empty() {
            return Err(BackendError::ResourceCreationFailed("zero-sized buffer".into()));
        }
        if contents.len() as u64 > self.device.limits().max_buffer_size {
            return Err(BackendError::OutOfMemory);
        }

        let (label, usage) = match target {
            BufferTarget::Vertex => ("graf vertex buffer", wgpu::BufferUsages::VERTEX),
            BufferTarget::Index => ("graf index buffer", wgpu::BufferUsages::INDEX),
        };

        let name = self.alloc_name()?;
        let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        });

        self.buffers.insert(name, (target, buffer));
        Ok(BufferHandle(name))
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferHandle>) {
        if let Some(b) = buffer {
            match self.buffers.get(&b.0) {
                None => {
                    self.set_pending(BackendError::InvalidHandle(format!("buffer {}", b.0)));
                    return;
                }
                Some((created_for, _)) if *created_for != target => {
                    self.set_pending(BackendError::InvalidOperation(format!(
                        "buffer {} created for {created_for:?}, bound to {target:?}",
                        b.0
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
                if let Some(state) = self.bound_array.and_then(|a| self.arrays.get_mut(&a.0)) {
                    state.index_buffer = buffer;
                }
            }
        }
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        let Some((_, raw)) = self.buffers.remove(&buffer.0) else { return };
        raw.destroy();

        if self.bound_vertex == Some(buffer) {
            self.bound_vertex = None;
        }
        if self.bound_index == Some(buffer) {
            self.bound_index = None;
        }
    }

    fn create_vertex_array(&mut self) -> Result<ArrayHandle, BackendError> {
        let name = self.alloc_name()?;
        self.arrays.insert(name, ArrayState::default());
        Ok(ArrayHandle(name))
    }

    fn bind_vertex_array(&mut self, array: Option<ArrayHandle>) {
        match array {
            Some(a) => match self.arrays.get(&a.0) {
                Some(state) => {
                    self.bound_index = state.index_buffer;
                    self.bound_array = Some(a);
                }
                None => {
                    self.set_pending(BackendError::InvalidHandle(format!("vertex array {}", a.0)));
                }
            },
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
        let vertex = self.bound_vertex.ok_or_else(|| {
            BackendError::InvalidOperation("no vertex buffer bound for attribute".into())
        })?;
        let state = self
            .bound_array
            .and_then(|a| self.arrays.get_mut(&a.0))
            .ok_or_else(|| BackendError::InvalidOperation("no vertex array bound".into()))?;

        // A single interleaved buffer per array; a different source buffer
        // would need a second wgpu vertex slot.
        if state.vertex_buffer.is_some_and(|v| v != vertex) {
            return Err(BackendError::InvalidOperation(
                "attributes must share one vertex buffer".into(),
            ));
        }

        state.vertex_buffer = Some(vertex);
        state.stride = stride;
        state.attributes.retain(|a| a.shader_location != location);
        state.attributes.push(wgpu::VertexAttribute {
            format: vertex_format(kind),
            offset: offset as u64,
            shader_location: location,
        });
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32) -> Result<(), BackendError> {
        let array = self
            .bound_array
            .ok_or_else(|| BackendError::InvalidOperation("no vertex array bound".into()))?;
        let state = self
            .arrays
            .get(&array.0)
            .ok_or_else(|| BackendError::InvalidHandle(format!("vertex array {}", array.0)))?;

        let (Some(vertex), Some(index)) = (state.vertex_buffer, state.index_buffer) else {
            return Err(BackendError::InvalidOperation(
                "vertex array is missing a vertex or index buffer".into(),
            ));
        };

        let (_, vb) = self
            .buffers
            .get(&vertex.0)
            .ok_or_else(|| BackendError::InvalidHandle(format!("buffer {}", vertex.0)))?;
        let (_, ib) = self
            .buffers
            .get(&index.0)
            .ok_or_else(|| BackendError::InvalidHandle(format!("buffer {}", index.0)))?;

        let pass = self.pass.as_mut().ok_or(BackendError::NoActivePass)?;
        pass.set_vertex_buffer(0, vb.slice(..));
        pass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..index_count, 0, 0..1);
        Ok(())
    }

    fn take_error(&mut self) -> Option<BackendError> {
        self.pending_error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::GpuInit;

    fn try_backend() -> Option<WgpuBackend> {
        match Gpu::new_blocking(GpuInit::default()) {
            Ok(gpu) => Some(WgpuBackend::new(&gpu)),
            Err(e) => {
                eprintln!("skipping wgpu test: {e:#}");
                None
            }
        }
    }

    #[test]
    fn vertex_format_follows_attribute_kind() {
        assert_eq!(vertex_format(VertexAttributeKind::Position), wgpu::VertexFormat::Float32x3);
        assert_eq!(vertex_format(VertexAttributeKind::Texture), wgpu::VertexFormat::Float32x2);
        assert_eq!(vertex_format(VertexAttributeKind::Color), wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn array_state_becomes_a_pipeline_layout() {
        let Some(mut be) = try_backend() else { return };

        let vb = be.create_buffer(BufferTarget::Vertex, &[0u8; 60]).unwrap();
        let ib = be.create_buffer(BufferTarget::Index, &[0u8; 12]).unwrap();
        let va = be.create_vertex_array().unwrap();

        be.bind_vertex_array(Some(va));
        be.bind_buffer(BufferTarget::Vertex, Some(vb));
        be.bind_buffer(BufferTarget::Index, Some(ib));
        be.vertex_attribute(0, VertexAttributeKind::Position, 20, 0).unwrap();
        be.vertex_attribute(1, VertexAttributeKind::Texture, 20, 12).unwrap();
        assert!(be.take_error().is_none());

        let layout = be.vertex_buffer_layout(va).unwrap();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);

        // No pass has been handed over.
        assert_eq!(be.draw_indexed(3), Err(BackendError::NoActivePass));

        be.delete_vertex_array(va);
        be.delete_buffer(vb);
        be.delete_buffer(ib);
        assert!(be.buffer(vb).is_none());
    }

    #[test]
    fn every_shape_uploads_to_the_device() {
        use crate::shapes::{ShapeConfig, ShapeFactoryManager, ShapeKind};

        let Some(mut be) = try_backend() else { return };
        let mut shapes = ShapeFactoryManager::new(&ShapeConfig::default()).unwrap();

        for kind in ShapeKind::ALL {
            let shape = shapes.create_shape(kind, &mut be).unwrap();
            let layout = be.vertex_buffer_layout(shape.handle().unwrap()).unwrap();
            assert_eq!(layout.array_stride, 20);
        }

        shapes.release_all(&mut be);
        assert!(be.buffers.is_empty());
        assert!(be.arrays.is_empty());
    }
}

use anyhow::{Context, Result};

use super::GpuInit;

/// Owns the wgpu device and queue used to create shape resources.
///
/// Unlike a windowed context this type has no surface; presentation belongs
/// to whoever owns the window. A windowed host can hand its own device over
/// with [`Gpu::from_parts`].
pub struct Gpu {
    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Adapter description, when this context created the device itself.
    adapter_info: Option<wgpu::AdapterInfo>,
}

impl Gpu {
    /// Creates a headless GPU context.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(init: GpuInit) -> Result<Self> {
        let GpuInit {
            power_preference,
            force_fallback_adapter,
            required_features,
            required_limits,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: None,
                force_fallback_adapter,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let adapter_info = adapter.get_info();
        log::debug!("graf adapter: {} ({:?})", adapter_info.name, adapter_info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("graf-engine device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self {
            device,
            queue,
            adapter_info: Some(adapter_info),
        })
    }

    /// Blocking variant of [`Gpu::new`] for callers without an executor.
    pub fn new_blocking(init: GpuInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }

    /// Wraps a device/queue pair created elsewhere (e.g. by a windowed runtime).
    pub fn from_parts(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            adapter_info: None,
        }
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Adapter description, if known.
    pub fn adapter_info(&self) -> Option<&wgpu::AdapterInfo> {
        self.adapter_info.as_ref()
    }
}

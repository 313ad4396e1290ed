/// Initialization parameters for the GPU layer.
///
/// Keep this structure minimal. Add flags only when a concrete backend
/// requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Accept only a software (fallback) adapter.
    ///
    /// Useful on CI machines without a hardware GPU.
    pub force_fallback_adapter: bool,

    /// Required wgpu features.
    ///
    /// Shape meshes need nothing beyond the core feature set.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}

//! GPU context creation.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a surface
//! - wrapping an existing device handed over by a windowing layer
//!
//! Shapes never touch this directly; they go through a
//! [`RenderBackend`](crate::render::backend::RenderBackend) built from a [`Gpu`].

mod gpu;
mod init;

pub use gpu::Gpu;
pub use init::GpuInit;

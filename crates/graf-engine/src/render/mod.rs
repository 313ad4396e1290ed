//! GPU resource layer.
//!
//! Mesh data reaches the GPU through three owned resource types written
//! against the [`backend::RenderBackend`] seam:
//! - [`VertexBuffer`] / [`IndexBuffer`]: immutable uploads
//! - [`VertexArray`]: binds one of each plus a [`VertexLayout`] into a drawable
//!
//! Resources never free themselves on drop; call `release` with the backend
//! that created them.

pub mod backend;
mod buffer;
mod layout;
mod vertex_array;

pub use buffer::{INDEX_SIZE, IndexBuffer, ResourceState, VertexBuffer};
pub use layout::{AttributeBinding, VertexAttributeKind, VertexLayout};
pub use vertex_array::VertexArray;

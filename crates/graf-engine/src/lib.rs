//! Graf engine crate.
//!
//! Procedural shape meshes and the GPU resources that draw them:
//! shape factories author vertices and indices, the render layer uploads
//! them as vertex/index buffers composed into vertex arrays.

pub mod device;
pub mod logging;

pub mod error;
pub mod mesh;
pub mod render;
pub mod shapes;

pub use error::{GrafError, Result};

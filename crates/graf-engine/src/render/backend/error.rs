use std::fmt;

/// Failure reported by a [`RenderBackend`](super::RenderBackend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Failed to allocate a resource name or its storage.
    ResourceCreationFailed(String),
    /// A handle that was never issued, or already deleted.
    InvalidHandle(String),
    /// The operation is not allowed in the current binding state.
    InvalidOperation(String),
    /// Out of GPU memory (or over the device's buffer size limit).
    OutOfMemory,
    /// A draw was issued with no render pass to record into.
    NoActivePass,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceCreationFailed(msg) => write!(f, "resource creation failed: {msg}"),
            Self::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            Self::InvalidOperation(msg) => write!(f, "invalid operation: {msg}"),
            Self::OutOfMemory => write!(f, "out of GPU memory"),
            Self::NoActivePass => write!(f, "no active render pass"),
        }
    }
}

impl std::error::Error for BackendError {}

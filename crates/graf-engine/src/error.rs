//! Engine error taxonomy.

use std::fmt;

/// Errors raised by mesh generation and the GPU resource layer.
///
/// Errors are never logged or retried here; they carry enough context for
/// the caller to decide whether to skip a frame or abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrafError {
    /// GPU resource allocation/configuration failure, or empty/invalid
    /// geometry reaching the resource layer.
    Buffer(String),
    /// Index-range violation while authoring faces or texture coordinates.
    ///
    /// Always a bug in a factory's topology tables, never a runtime condition.
    Domain(String),
    /// Invalid shape configuration or an unknown shape kind.
    Config(String),
}

impl GrafError {
    pub(crate) fn buffer(msg: impl Into<String>) -> Self {
        Self::Buffer(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Buffer(m) | Self::Domain(m) | Self::Config(m) => m,
        }
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl fmt::Display for GrafError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer(msg) => write!(f, "buffer error: {msg}"),
            Self::Domain(msg) => write!(f, "graphics error: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for GrafError {}

pub type Result<T> = std::result::Result<T, GrafError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_category_prefix() {
        assert_eq!(
            GrafError::buffer("no index buffer").to_string(),
            "buffer error: no index buffer"
        );
        assert_eq!(GrafError::domain("x").to_string(), "graphics error: x");
        assert_eq!(GrafError::config("y").to_string(), "config error: y");
    }

    #[test]
    fn message_strips_prefix() {
        let e = GrafError::config("unknown shape type");
        assert_eq!(e.message(), "unknown shape type");
        assert!(e.is_config());
        assert!(!e.is_buffer());
    }
}

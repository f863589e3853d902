//! Snapshot error types.

/// Errors that can occur when photographing a galaxy.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// A dimension or exposure is zero, negative, or not finite.
    #[error("invalid snapshot parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

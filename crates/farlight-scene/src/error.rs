//! Scene error types.

use farlight_render::RenderError;

/// Errors that can occur while taking a picture of a scene.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// The starfield pass rejected its parameters.
    #[error("starfield render failed: {0}")]
    Render(#[from] RenderError),
}

//! Probes and the local scenes they photograph.
//!
//! A [`LocalScene`] composites a foreground over the starfield rendered by
//! [`farlight_render::SnapshotRenderer`]. Foreground content is anything
//! implementing [`ForegroundLayer`]; this crate ships [`Beacon`], a
//! screen-space disc marking a local-tier point.

pub mod error;
pub mod layer;
pub mod probe;
pub mod scene;

pub use error::SceneError;
pub use layer::{Beacon, ForegroundLayer};
pub use probe::Probe;
pub use scene::LocalScene;

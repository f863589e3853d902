//! Galaxy photography: accumulate star light into a sensor and develop it into an RGBA image.
//!
//! [`SnapshotRenderer`] consumes any [`StarCamera`] for orientation and
//! projection; [`ProbeCamera`] is the look-at camera carried by probes.

pub mod camera;
pub mod error;
pub mod sensor;
pub mod snapshot;

pub use camera::{ProbeCamera, RotateDirection, StarCamera};
pub use error::RenderError;
pub use sensor::{DevelopSettings, Sensor, tone_map};
pub use snapshot::{EDGE_MARGIN, Exposure, ExposureStats, SnapshotParams, SnapshotRenderer};

//! Procedural spiral galaxy: a seeded, immutable catalog of stars, gas, dust, and halo points.

pub mod generator;
pub mod star;

pub use generator::{GalaxyGenerator, GalaxyParams};
pub use star::{Galaxy, Population, Star, StarKind};

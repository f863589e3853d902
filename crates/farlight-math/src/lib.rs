//! Distance units shared by the coordinate tiers and the galaxy renderer.

mod units;

pub use units::{AU_PER_LY, MM_PER_AU, MM_PER_LY, au_to_light_years, format_distance};

//! Three-tier galactic coordinates: sector (light-years), system (AU), and local (millimeters).
//!
//! A single `f64` cannot hold a millimeter-resolution position anywhere in a
//! 100,000 light-year galaxy, so [`GalacticPosition`] splits each axis into
//! three nested tiers and keeps every finer tier small:
//!
//! 1. **Sector**: `i64` light-years, unbounded
//! 2. **System**: `i64` astronomical units, `|system| <= AU_PER_LY / 2`
//! 3. **Local**: `f64` millimeters, `|local| <= MM_PER_AU / 2`
//!
//! Every mutation runs [`GalacticPosition::normalize`], which rolls overflow
//! from the local tier into the system tier and from the system tier into
//! the sector tier.
//!
//! ```rust
//! use farlight_coords::GalacticPosition;
//! use farlight_math::MM_PER_AU;
//! use glam::{DVec3, I64Vec3};
//!
//! let mut pos = GalacticPosition::new(I64Vec3::ZERO, I64Vec3::ZERO, DVec3::ZERO);
//! pos.translate(DVec3::new(2.0 * MM_PER_AU, 0.0, 0.0));
//! assert_eq!(pos.system().x, 2);
//! assert_eq!(pos.local().x, 0.0);
//! ```
//!
//! The sector tier is not overflow-checked. Reaching `i64::MAX` light-years
//! is outside any galaxy this crate is meant to describe, so callers must
//! treat it as an unchecked precondition.

use std::fmt;

use farlight_math::{AU_PER_LY, MM_PER_AU, au_to_light_years};
use glam::{DVec3, I64Vec3};

/// A position in the galaxy expressed as three nested coordinate tiers.
///
/// The fields are private so that every value observed through the public
/// API is normalized.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GalacticPosition {
    sector: I64Vec3,
    system: I64Vec3,
    local: DVec3,
}

impl GalacticPosition {
    /// Create a position from raw tier values and normalize it immediately.
    ///
    /// The inputs do not need to be in range; `local` may hold any number of
    /// AU worth of millimeters and `system` any number of light-years.
    pub fn new(sector: I64Vec3, system: I64Vec3, local: DVec3) -> Self {
        let mut pos = Self {
            sector,
            system,
            local,
        };
        pos.normalize();
        pos
    }

    /// The position at the galactic origin.
    pub fn origin() -> Self {
        Self::default()
    }

    /// Light-year tier.
    pub fn sector(&self) -> I64Vec3 {
        self.sector
    }

    /// Astronomical-unit tier.
    pub fn system(&self) -> I64Vec3 {
        self.system
    }

    /// Millimeter tier.
    pub fn local(&self) -> DVec3 {
        self.local
    }

    /// Translate by `delta` millimeters, then normalize.
    ///
    /// There is no limit on the size of `delta`; a single call may cascade
    /// through any number of AU and light-year boundaries.
    pub fn translate(&mut self, delta: DVec3) {
        self.local += delta;
        self.normalize();
    }

    /// Roll tier overflow upward: millimeters spill into AU, AU into light-years.
    ///
    /// Each axis is handled independently. The float tier is always
    /// processed first so that AU produced by it can cascade into sectors
    /// within the same call.
    pub fn normalize(&mut self) {
        (self.local.x, self.system.x) = normalize_float_tier(self.local.x, self.system.x, MM_PER_AU);
        (self.local.y, self.system.y) = normalize_float_tier(self.local.y, self.system.y, MM_PER_AU);
        (self.local.z, self.system.z) = normalize_float_tier(self.local.z, self.system.z, MM_PER_AU);

        (self.system.x, self.sector.x) = normalize_int_tier(self.system.x, self.sector.x, AU_PER_LY);
        (self.system.y, self.sector.y) = normalize_int_tier(self.system.y, self.sector.y, AU_PER_LY);
        (self.system.z, self.sector.z) = normalize_int_tier(self.system.z, self.sector.z, AU_PER_LY);
    }

    /// Returns true if every tier is within its half-range bound.
    pub fn is_normalized(&self) -> bool {
        let half_au = MM_PER_AU / 2.0;
        let half_ly = AU_PER_LY / 2;
        self.local.abs().max_element() <= half_au && self.system.abs().max_element() <= half_ly
    }

    /// Continuous position in galaxy space, in fractional light-years.
    ///
    /// Combines the sector tier with the system tier so the starfield
    /// shifts smoothly while crossing a star system. The local tier is too
    /// small to matter at galactic scale and is ignored.
    pub fn to_galaxy_space(&self) -> DVec3 {
        let system = DVec3::new(
            au_to_light_years(self.system.x as f64),
            au_to_light_years(self.system.y as f64),
            au_to_light_years(self.system.z as f64),
        );
        self.sector.as_dvec3() + system
    }
}

impl fmt::Display for GalacticPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sector({}, {}, {}) System({}, {}, {}) Local({:.3}, {:.3}, {:.3})",
            self.sector.x,
            self.sector.y,
            self.sector.z,
            self.system.x,
            self.system.y,
            self.system.z,
            self.local.x,
            self.local.y,
            self.local.z,
        )
    }
}

/// Center a float tier inside `[-limit/2, limit/2]`, carrying whole units into the parent.
fn normalize_float_tier(micro: f64, parent: i64, limit: f64) -> (f64, i64) {
    if micro.abs() > limit / 2.0 {
        // f64::round rounds half away from zero.
        let crossed = (micro / limit).round();
        (micro - crossed * limit, parent + crossed as i64)
    } else {
        (micro, parent)
    }
}

/// Center an integer tier inside `[-limit/2, limit/2]`, carrying whole units into the parent.
fn normalize_int_tier(micro: i64, parent: i64, limit: i64) -> (i64, i64) {
    let half = limit / 2;
    // Integer division truncates toward zero, so biasing by `half` in the
    // direction of travel floors (positive) or ceils (negative) the carry.
    let crossed = if micro > half {
        (micro + half) / limit
    } else if micro < -half {
        (micro - half) / limit
    } else {
        return (micro, parent);
    };
    (micro - crossed * limit, parent + crossed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farlight_math::MM_PER_LY;

    const HALF_LY: i64 = AU_PER_LY / 2;

    /// Physical displacement `b - a` in millimeters, keeping the integer tiers exact.
    fn displacement_mm(a: &GalacticPosition, b: &GalacticPosition) -> DVec3 {
        let au = (b.sector - a.sector) * AU_PER_LY + (b.system - a.system);
        au.as_dvec3() * MM_PER_AU + (b.local - a.local)
    }

    fn sample_positions() -> Vec<GalacticPosition> {
        vec![
            GalacticPosition::origin(),
            GalacticPosition::new(
                I64Vec3::new(10_000, 25_000, 35_000),
                I64Vec3::ZERO,
                DVec3::new(0.0, -200.0, -400.0),
            ),
            GalacticPosition::new(
                I64Vec3::new(-3, 7, 0),
                I64Vec3::new(HALF_LY, -HALF_LY, 12),
                DVec3::new(MM_PER_AU / 2.0, -MM_PER_AU / 2.0, 1.0),
            ),
            GalacticPosition::new(
                I64Vec3::new(1, 2, 3),
                I64Vec3::new(1_000_000, -1_000_000, 63_241),
                DVec3::new(7.5 * MM_PER_AU, -3.2 * MM_PER_AU, 0.25),
            ),
        ]
    }

    #[test]
    fn test_new_normalizes_local_overflow() {
        let pos = GalacticPosition::new(
            I64Vec3::ZERO,
            I64Vec3::ZERO,
            DVec3::new(1.5 * MM_PER_AU, 0.0, -2.0 * MM_PER_AU),
        );
        assert_eq!(pos.system(), I64Vec3::new(2, 0, -2));
        assert!((pos.local().x + 0.5 * MM_PER_AU).abs() < 1.0);
        assert_eq!(pos.local().z, 0.0);
    }

    #[test]
    fn test_local_at_exact_half_is_left_in_place() {
        let pos = GalacticPosition::new(
            I64Vec3::ZERO,
            I64Vec3::ZERO,
            DVec3::new(MM_PER_AU / 2.0, -MM_PER_AU / 2.0, 0.0),
        );
        assert_eq!(pos.system(), I64Vec3::ZERO);
        assert_eq!(pos.local().x, MM_PER_AU / 2.0);
    }

    #[test]
    fn test_system_overflow_carries_into_sector() {
        let pos = GalacticPosition::new(
            I64Vec3::ZERO,
            I64Vec3::new(HALF_LY + 1, -(HALF_LY + 1), HALF_LY),
            DVec3::ZERO,
        );
        assert_eq!(pos.sector(), I64Vec3::new(1, -1, 0));
        assert_eq!(pos.system(), I64Vec3::new(-HALF_LY, HALF_LY, HALF_LY));
    }

    #[test]
    fn test_large_system_value_carries_many_sectors() {
        let pos = GalacticPosition::new(
            I64Vec3::new(5, 0, 0),
            I64Vec3::new(10 * AU_PER_LY + 17, -4 * AU_PER_LY - 9, 0),
            DVec3::ZERO,
        );
        assert_eq!(pos.sector(), I64Vec3::new(15, -4, 0));
        assert_eq!(pos.system(), I64Vec3::new(17, -9, 0));
    }

    #[test]
    fn test_translate_cascades_through_both_tiers() {
        let mut pos = GalacticPosition::origin();
        pos.translate(DVec3::new(3.0 * MM_PER_LY, -2.0 * MM_PER_LY, 0.0));
        assert_eq!(pos.sector(), I64Vec3::new(3, -2, 0));
        assert_eq!(pos.system(), I64Vec3::ZERO);
        assert!(pos.local().abs().max_element() < 1.0e5);
    }

    #[test]
    fn test_translate_small_delta_stays_local() {
        let mut pos = GalacticPosition::origin();
        pos.translate(DVec3::new(250.0, -10.0, 0.5));
        assert_eq!(pos.system(), I64Vec3::ZERO);
        assert_eq!(pos.sector(), I64Vec3::ZERO);
        assert_eq!(pos.local(), DVec3::new(250.0, -10.0, 0.5));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for pos in sample_positions() {
            let mut again = pos;
            again.normalize();
            assert_eq!(again, pos, "normalize changed an already-normalized {pos}");
        }
    }

    #[test]
    fn test_tier_bounds_after_normalization() {
        for pos in sample_positions() {
            assert!(pos.is_normalized(), "{pos} is out of bounds");
            assert!(pos.system().abs().max_element() <= HALF_LY);
            assert!(pos.local().abs().max_element() <= MM_PER_AU / 2.0);
        }
    }

    #[test]
    fn test_translate_conserves_displacement() {
        let deltas = [
            DVec3::new(1.0, -1.0, 0.0),
            DVec3::new(0.75 * MM_PER_AU, -0.75 * MM_PER_AU, 0.3 * MM_PER_AU),
            DVec3::new(42.0 * MM_PER_AU + 13.0, -9.5 * MM_PER_AU, 1.0e15),
            DVec3::new(-1.0e16, 3.0e16, -5.0e15),
        ];
        for start in sample_positions() {
            for delta in deltas {
                let mut moved = start;
                moved.translate(delta);
                assert!(moved.is_normalized());

                let actual = displacement_mm(&start, &moved);
                let tolerance = 1.0e-9 * delta.abs().max_element().max(1.0) + 1.0;
                assert!(
                    (actual - delta).abs().max_element() <= tolerance,
                    "moving {start} by {delta} displaced by {actual}"
                );
            }
        }
    }

    #[test]
    fn test_repeated_small_moves_cross_au_boundary() {
        let mut pos = GalacticPosition::origin();
        let step = MM_PER_AU / 10.0;
        for _ in 0..23 {
            pos.translate(DVec3::new(step, 0.0, 0.0));
            assert!(pos.is_normalized());
        }
        assert_eq!(pos.system().x, 2);
        assert!((pos.local().x - 0.3 * MM_PER_AU).abs() < 1.0e3);
    }

    #[test]
    fn test_to_galaxy_space_combines_sector_and_system() {
        let pos = GalacticPosition::new(
            I64Vec3::new(10, -20, 0),
            I64Vec3::new(HALF_LY, 0, -HALF_LY),
            DVec3::new(1.0e13, 0.0, 0.0),
        );
        let galaxy = pos.to_galaxy_space();
        assert!((galaxy.x - (10.0 + HALF_LY as f64 / AU_PER_LY as f64)).abs() < 1e-12);
        assert_eq!(galaxy.y, -20.0);
        assert!((galaxy.z + HALF_LY as f64 / AU_PER_LY as f64).abs() < 1e-12);
    }

    #[test]
    fn test_to_galaxy_space_does_not_mutate() {
        let pos = sample_positions()[3];
        let before = pos;
        let _ = pos.to_galaxy_space();
        assert_eq!(pos, before);
    }

    #[test]
    fn test_display() {
        let pos = GalacticPosition::new(I64Vec3::new(1, 2, 3), I64Vec3::new(4, 5, 6), DVec3::ZERO);
        assert_eq!(
            format!("{pos}"),
            "Sector(1, 2, 3) System(4, 5, 6) Local(0.000, 0.000, 0.000)"
        );
    }
}

//! Deterministic spiral galaxy generation from a star budget and a seed.
//!
//! Four populations are emitted in order: a Gaussian core bulge, the
//! spiral arm disk (with a share of gas clouds), dark dust lanes along the
//! inner edge of each arm, and a sparse spherical halo. Dust and halo are
//! layered on top of the budget rather than taken from it.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::star::{Galaxy, Population, Star, StarKind};

const CORE_COLOR: [u8; 3] = [255, 230, 200];
const ARM_COLOR: [u8; 3] = [200, 220, 255];
const GAS_MAGENTA: [u8; 3] = [220, 50, 150];
const GAS_CYAN: [u8; 3] = [50, 200, 250];
const HALO_COLOR: [u8; 3] = [255, 150, 150];

/// Shape parameters for a spiral galaxy. Distances are in light-years.
#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParams {
    /// Number of major spiral arms.
    pub num_arms: u32,
    /// Radians the arms twist between the core and the rim.
    pub arm_wrap: f64,
    pub max_radius: f64,
    /// Radius of the central bulge. The core Gaussian uses a third of this as its std-dev.
    pub core_radius: f64,
    pub disk_thickness: f64,
    /// Share of the star budget placed in the core.
    pub core_ratio: f64,
    /// Probability an arm entry becomes a gas cloud.
    pub gas_chance: f64,
    /// Dust entries per budgeted star, added on top of the budget.
    pub dust_ratio: f64,
    /// Angular offset of the dust lanes relative to the arm center.
    pub dust_arm_offset: f64,
    /// Halo stars per budgeted star, added on top of the budget.
    pub halo_ratio: f64,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            num_arms: 2,
            arm_wrap: 5.0,
            max_radius: 50_000.0,
            core_radius: 8_000.0,
            disk_thickness: 2_000.0,
            core_ratio: 0.3,
            gas_chance: 0.15,
            dust_ratio: 0.5,
            dust_arm_offset: -0.15,
            halo_ratio: 0.15,
        }
    }
}

impl GalaxyParams {
    /// Number of core and arm entries for a budget. They always sum to `total_stars`.
    pub fn budget_split(&self, total_stars: usize) -> (usize, usize) {
        let core = (total_stars as f64 * self.core_ratio) as usize;
        (core, total_stars - core)
    }

    pub fn dust_count(&self, total_stars: usize) -> usize {
        (total_stars as f64 * self.dust_ratio).round() as usize
    }

    pub fn halo_count(&self, total_stars: usize) -> usize {
        (total_stars as f64 * self.halo_ratio).round() as usize
    }
}

/// Generates a deterministic galaxy catalog from a seed.
pub struct GalaxyGenerator {
    seed: u64,
    total_stars: usize,
    params: GalaxyParams,
}

impl GalaxyGenerator {
    /// Create a generator with the default galaxy shape.
    pub fn new(seed: u64, total_stars: usize) -> Self {
        Self::with_params(seed, total_stars, GalaxyParams::default())
    }

    pub fn with_params(seed: u64, total_stars: usize, params: GalaxyParams) -> Self {
        Self {
            seed,
            total_stars,
            params,
        }
    }

    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    /// Generate the catalog. Identical seeds and parameters produce identical catalogs.
    pub fn generate(&self) -> Galaxy {
        let p = &self.params;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let (num_core, num_arm) = p.budget_split(self.total_stars);
        let num_dust = p.dust_count(self.total_stars);
        let num_halo = p.halo_count(self.total_stars);

        let mut stars = Vec::with_capacity(num_core + num_arm + num_dust + num_halo);

        let core_sigma = p.core_radius / 3.0;
        for _ in 0..num_core {
            let position = gaussian_vec3(&mut rng) * core_sigma;
            // Older bulge stars: heavily biased toward dim.
            let luminosity = rng.random::<f64>().powi(4) * 2_000.0 + 5.0;
            stars.push(Star {
                position,
                luminosity,
                color: CORE_COLOR,
                kind: StarKind::Normal,
                population: Population::Core,
            });
        }

        for _ in 0..num_arm {
            let (radius, base_angle) = self.arm_placement(&mut rng);
            let spread = 0.5 * radius / p.max_radius;
            let theta = base_angle + gaussian(&mut rng) * spread;

            let thickness = p.disk_thickness * (1.0 + radius / p.max_radius);
            let height = gaussian(&mut rng) * (thickness / 4.0);

            // Rare, extremely bright super-giants.
            let lum = rng.random::<f64>().powi(6) * 10_000.0;

            let star = if rng.random::<f64>() < p.gas_chance {
                let color = if rng.random::<f64>() > 0.5 {
                    GAS_MAGENTA
                } else {
                    GAS_CYAN
                };
                Star {
                    position: polar_to_disk(radius, theta, height),
                    luminosity: lum * 1.5,
                    color,
                    kind: StarKind::Gas,
                    population: Population::Arm,
                }
            } else {
                Star {
                    position: polar_to_disk(radius, theta, height),
                    luminosity: lum + 10.0,
                    color: ARM_COLOR,
                    kind: StarKind::Normal,
                    population: Population::Arm,
                }
            };
            stars.push(star);
        }

        for _ in 0..num_dust {
            let (radius, base_angle) = self.arm_placement(&mut rng);
            let spread = 0.2 * radius / p.max_radius;
            let theta = base_angle + p.dust_arm_offset + gaussian(&mut rng) * spread;
            let height = gaussian(&mut rng) * (p.disk_thickness / 8.0);

            stars.push(Star {
                position: polar_to_disk(radius, theta, height),
                luminosity: rng.random::<f64>() * 8_000.0,
                color: [0, 0, 0],
                kind: StarKind::Dust,
                population: Population::Dust,
            });
        }

        for _ in 0..num_halo {
            let position = gaussian_vec3(&mut rng) * p.max_radius;
            stars.push(Star {
                position,
                luminosity: rng.random::<f64>() * 20_000.0 + 100.0,
                color: HALO_COLOR,
                kind: StarKind::Normal,
                population: Population::Halo,
            });
        }

        log::info!(
            "Generated galaxy seed={} core={} arm={} dust={} halo={}",
            self.seed,
            num_core,
            num_arm,
            num_dust,
            num_halo
        );

        Galaxy::from_stars(stars)
    }

    /// Draw a disk radius and the un-fuzzed spiral angle for a random arm.
    ///
    /// The square root keeps areal density even across the disk.
    fn arm_placement(&self, rng: &mut ChaCha8Rng) -> (f64, f64) {
        let p = &self.params;
        let radius = rng.random::<f64>().sqrt() * p.max_radius;
        let arm = rng.random_range(0..p.num_arms.max(1));
        let arm_offset = arm as f64 / p.num_arms.max(1) as f64 * TAU;
        (radius, p.arm_wrap * radius / p.max_radius + arm_offset)
    }
}

fn gaussian(rng: &mut ChaCha8Rng) -> f64 {
    rng.sample(StandardNormal)
}

fn gaussian_vec3(rng: &mut ChaCha8Rng) -> DVec3 {
    let x = gaussian(rng);
    let y = gaussian(rng);
    let z = gaussian(rng);
    DVec3::new(x, y, z)
}

/// The galactic disk lies in the XZ plane with Y as height.
fn polar_to_disk(radius: f64, theta: f64, height: f64) -> DVec3 {
    DVec3::new(radius * theta.cos(), height, radius * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_population(galaxy: &Galaxy, population: Population) -> Vec<&Star> {
        galaxy
            .iter()
            .filter(|s| s.population == population)
            .collect()
    }

    fn mean(values: impl Iterator<Item = f64>) -> f64 {
        let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        sum / n as f64
    }

    #[test]
    fn test_population_counts() {
        let galaxy = GalaxyGenerator::new(42, 1000).generate();
        assert_eq!(galaxy.count(Population::Core), 300);
        assert_eq!(galaxy.count(Population::Arm), 700);
        assert_eq!(galaxy.count(Population::Dust), 500);
        assert_eq!(galaxy.count(Population::Halo), 150);
        assert_eq!(galaxy.len(), 1650);
    }

    #[test]
    fn test_population_counts_with_odd_budget() {
        let galaxy = GalaxyGenerator::new(7, 7).generate();
        // core = floor(2.1), dust = round(3.5), halo = round(1.05)
        assert_eq!(galaxy.count(Population::Core), 2);
        assert_eq!(galaxy.count(Population::Arm), 5);
        assert_eq!(galaxy.count(Population::Dust), 4);
        assert_eq!(galaxy.count(Population::Halo), 1);
    }

    #[test]
    fn test_core_and_arm_fill_budget_exactly() {
        for n in [1, 3, 10, 333, 1001] {
            let galaxy = GalaxyGenerator::new(1, n).generate();
            assert_eq!(
                galaxy.count(Population::Core) + galaxy.count(Population::Arm),
                n
            );
        }
    }

    #[test]
    fn test_zero_budget_is_empty() {
        assert!(GalaxyGenerator::new(42, 0).generate().is_empty());
    }

    #[test]
    fn test_populations_emitted_in_order() {
        let galaxy = GalaxyGenerator::new(11, 200).generate();
        let order: Vec<Population> = galaxy.iter().map(|s| s.population).collect();
        let mut sorted = order.clone();
        sorted.sort_by_key(|p| match p {
            Population::Core => 0,
            Population::Arm => 1,
            Population::Dust => 2,
            Population::Halo => 3,
        });
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_same_seed_produces_same_galaxy() {
        let a = GalaxyGenerator::new(1_772_054_134_190_328_000, 2000).generate();
        let b = GalaxyGenerator::new(1_772_054_134_190_328_000, 2000).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_produces_different_galaxy() {
        let a = GalaxyGenerator::new(1, 1000).generate();
        let b = GalaxyGenerator::new(9999, 1000).generate();
        let differences = a
            .iter()
            .zip(b.iter())
            .filter(|(x, y)| (x.position - y.position).length() > 1.0)
            .count();
        assert!(
            differences > 1500,
            "Expected most entries to differ between seeds, only {differences} differed"
        );
    }

    #[test]
    fn test_kinds_match_populations() {
        let galaxy = GalaxyGenerator::new(5, 3000).generate();
        for star in galaxy.iter() {
            match star.population {
                Population::Core | Population::Halo => assert_eq!(star.kind, StarKind::Normal),
                Population::Dust => assert_eq!(star.kind, StarKind::Dust),
                Population::Arm => assert_ne!(star.kind, StarKind::Dust),
            }
        }
    }

    #[test]
    fn test_gas_share_of_arms() {
        let galaxy = GalaxyGenerator::new(42, 20_000).generate();
        let arms = by_population(&galaxy, Population::Arm);
        let gas = arms.iter().filter(|s| s.kind == StarKind::Gas).count();
        let share = gas as f64 / arms.len() as f64;
        assert!(
            (0.12..0.18).contains(&share),
            "gas share {share} far from 0.15"
        );
    }

    #[test]
    fn test_gas_colors_are_magenta_or_cyan() {
        let galaxy = GalaxyGenerator::new(42, 5000).generate();
        let gas: Vec<&Star> = galaxy.iter().filter(|s| s.kind == StarKind::Gas).collect();
        assert!(!gas.is_empty());
        assert!(gas.iter().all(|s| s.color == GAS_MAGENTA || s.color == GAS_CYAN));
        assert!(gas.iter().any(|s| s.color == GAS_MAGENTA));
        assert!(gas.iter().any(|s| s.color == GAS_CYAN));
    }

    #[test]
    fn test_luminosity_ranges() {
        let galaxy = GalaxyGenerator::new(3, 5000).generate();
        for star in galaxy.iter() {
            let l = star.luminosity;
            let ok = match (star.population, star.kind) {
                (Population::Core, _) => (5.0..=2005.0).contains(&l),
                (Population::Arm, StarKind::Gas) => (0.0..=15_000.0).contains(&l),
                (Population::Arm, _) => (10.0..=10_010.0).contains(&l),
                (Population::Dust, _) => (0.0..8_000.0).contains(&l),
                (Population::Halo, _) => (100.0..20_100.0).contains(&l),
            };
            assert!(ok, "{:?}/{:?} has luminosity {l}", star.population, star.kind);
        }
    }

    #[test]
    fn test_arm_and_dust_stay_within_disk_radius() {
        let galaxy = GalaxyGenerator::new(8, 5000).generate();
        let max_radius = GalaxyParams::default().max_radius;
        for star in galaxy
            .iter()
            .filter(|s| matches!(s.population, Population::Arm | Population::Dust))
        {
            let planar = (star.position.x.powi(2) + star.position.z.powi(2)).sqrt();
            assert!(planar <= max_radius + 1e-6, "planar radius {planar}");
        }
    }

    #[test]
    fn test_dust_is_flatter_than_arms() {
        let galaxy = GalaxyGenerator::new(21, 10_000).generate();
        let arm_height = mean(
            by_population(&galaxy, Population::Arm)
                .iter()
                .map(|s| s.position.y.abs()),
        );
        let dust_height = mean(
            by_population(&galaxy, Population::Dust)
                .iter()
                .map(|s| s.position.y.abs()),
        );
        assert!(
            dust_height * 2.0 < arm_height,
            "dust mean |y| {dust_height} vs arm mean |y| {arm_height}"
        );
    }

    #[test]
    fn test_core_is_concentrated_and_halo_is_diffuse() {
        let galaxy = GalaxyGenerator::new(13, 10_000).generate();
        let radius = |p: Population| {
            mean(
                by_population(&galaxy, p)
                    .iter()
                    .map(|s| s.position.length()),
            )
        };
        let core = radius(Population::Core);
        let arm = radius(Population::Arm);
        let halo = radius(Population::Halo);
        assert!(core < arm, "core {core} should be tighter than arms {arm}");
        assert!(arm < halo, "arms {arm} should be tighter than halo {halo}");
    }

    #[test]
    fn test_custom_params_change_budget_split() {
        let params = GalaxyParams {
            core_ratio: 0.5,
            dust_ratio: 0.0,
            halo_ratio: 0.0,
            ..GalaxyParams::default()
        };
        let galaxy = GalaxyGenerator::with_params(9, 100, params).generate();
        assert_eq!(galaxy.count(Population::Core), 50);
        assert_eq!(galaxy.count(Population::Arm), 50);
        assert_eq!(galaxy.len(), 100);
    }
}

//! Catalog entries and the immutable catalog that holds them.

use glam::DVec3;

/// How a catalog entry interacts with light when photographed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarKind {
    /// A point source, splatted tightly with optional lens-flare spikes.
    Normal,
    /// A glowing nebula cloud, splatted wide and tinted by its color.
    Gas,
    /// Obscuring dust. Its luminosity is a darkness strength.
    Dust,
}

/// The generation pass an entry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Population {
    Core,
    Arm,
    Dust,
    Halo,
}

/// A single entry in the galaxy catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// Position in galaxy space, in light-years from the galactic center.
    pub position: DVec3,
    /// Emitted light, or darkness strength for [`StarKind::Dust`].
    pub luminosity: f64,
    /// Base sRGB color. Unused for dust.
    pub color: [u8; 3],
    pub kind: StarKind,
    pub population: Population,
}

impl Star {
    /// Base color as linear multipliers in [0, 1].
    pub fn tint(&self) -> [f64; 3] {
        self.color.map(|c| c as f64 / 255.0)
    }
}

/// An immutable, ordered star catalog.
///
/// Built once and shared by reference (typically behind an `Arc`) across
/// every renderer that photographs it. There is no way to mutate a
/// `Galaxy` after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Galaxy {
    stars: Vec<Star>,
}

impl Galaxy {
    /// Wrap an existing list of stars, preserving order.
    pub fn from_stars(stars: Vec<Star>) -> Self {
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Star> {
        self.stars.iter()
    }

    /// Number of entries emitted by the given generation pass.
    pub fn count(&self, population: Population) -> usize {
        self.stars
            .iter()
            .filter(|s| s.population == population)
            .count()
    }

    /// Number of entries of the given kind.
    pub fn count_kind(&self, kind: StarKind) -> usize {
        self.stars.iter().filter(|s| s.kind == kind).count()
    }
}

impl<'a> IntoIterator for &'a Galaxy {
    type Item = &'a Star;
    type IntoIter = std::slice::Iter<'a, Star>;

    fn into_iter(self) -> Self::IntoIter {
        self.stars.iter()
    }
}

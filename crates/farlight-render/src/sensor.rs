//! Light-accumulating sensor and its development into an 8-bit image.

use image::{Rgba, RgbaImage};
use rand::Rng;

/// How an exposed [`Sensor`] is turned into a displayable image.
#[derive(Clone, Debug, PartialEq)]
pub struct DevelopSettings {
    /// Constant RGB tint added after tone mapping.
    pub background: [f64; 3],
    /// Per-pixel grain is drawn uniformly from `[-noise_amplitude, noise_amplitude)`.
    /// Zero disables grain and leaves the RNG untouched.
    pub noise_amplitude: f64,
    /// Multiplier applied to every even row after quantization.
    pub scanline_gain: f64,
}

impl Default for DevelopSettings {
    fn default() -> Self {
        Self {
            background: [0.02, 0.02, 0.03],
            noise_amplitude: 0.004,
            scanline_gain: 0.8,
        }
    }
}

impl DevelopSettings {
    /// Default development with grain turned off.
    pub fn noiseless() -> Self {
        Self {
            noise_amplitude: 0.0,
            ..Self::default()
        }
    }
}

/// Compress unbounded brightness into `[0, 1)`. Negative input reads as black.
pub fn tone_map(value: f64) -> f64 {
    let v = value.max(0.0);
    v / (1.0 + v)
}

/// A `width * height` grid of RGB accumulators, stored row-major.
///
/// Values may go negative while dust is being splatted; development
/// clamps them back to zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Sensor {
    width: u32,
    height: u32,
    pixels: Vec<[f64; 3]>,
}

impl Sensor {
    /// A zeroed sensor.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 3]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[f64; 3]] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width as usize && y < self.height as usize);
        y * self.width as usize + x
    }

    pub fn get(&self, x: usize, y: usize) -> [f64; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Add `amount` of light tinted by `tint` to one pixel.
    #[inline]
    pub fn add(&mut self, x: usize, y: usize, amount: f64, tint: [f64; 3]) {
        let i = self.index(x, y);
        let p = &mut self.pixels[i];
        p[0] += amount * tint[0];
        p[1] += amount * tint[1];
        p[2] += amount * tint[2];
    }

    /// Remove `amount` from every channel of one pixel.
    #[inline]
    pub fn darken(&mut self, x: usize, y: usize, amount: f64) {
        let i = self.index(x, y);
        for c in &mut self.pixels[i] {
            *c -= amount;
        }
    }

    /// Accumulate another sensor of the same size into this one.
    pub fn merge(&mut self, other: &Sensor) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        for (a, b) in self.pixels.iter_mut().zip(&other.pixels) {
            a[0] += b[0];
            a[1] += b[1];
            a[2] += b[2];
        }
    }

    /// True if no light has been added or removed anywhere.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| *p == [0.0; 3])
    }

    /// Develop the exposure: clamp, tone map, tint, add grain, quantize to 8 bits,
    /// and darken even rows. The sensor is consumed.
    pub fn develop<R: Rng>(self, settings: &DevelopSettings, rng: &mut R) -> RgbaImage {
        let width = self.width;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let noise = if settings.noise_amplitude > 0.0 {
                (rng.random::<f64>() * 2.0 - 1.0) * settings.noise_amplitude
            } else {
                0.0
            };
            let sample = self.pixels[y as usize * width as usize + x as usize];

            let mut rgb = [0u8; 3];
            for c in 0..3 {
                let value = tone_map(sample[c]) + settings.background[c] + noise;
                let mut level = ((value * 255.0) as i64).clamp(0, 255);
                if y % 2 == 0 {
                    level = (level as f64 * settings.scanline_gain) as i64;
                }
                rgb[c] = level.clamp(0, 255) as u8;
            }
            Rgba([rgb[0], rgb[1], rgb[2], 255])
        })
    }
}

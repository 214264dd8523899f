//! 2D Perlin noise implementation
//!
//! Classic gradient noise over a seeded permutation table. The table is the
//! only state: it is derived once from the seed when the generator is built,
//! and every sample afterwards is a pure function of `(x, y)`.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded 2D Perlin noise generator
///
/// # Example
///
/// ```
/// use hex_island::PerlinNoise;
///
/// let noise = PerlinNoise::new(42);
/// let v = noise.sample(3.3, 7.1);
/// assert!((-1.0..=1.0).contains(&v));
/// assert_eq!(v, PerlinNoise::new(42).sample(3.3, 7.1));
/// ```
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    /// Permutation of 0..256, repeated twice so corner hashes never wrap
    perm: [u8; 512],
}

impl PerlinNoise {
    /// Build a generator whose permutation is shuffled by a ChaCha8 stream seeded with `seed`
    pub fn new(seed: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
        Self::from_rng(&mut rng)
    }

    /// Build a generator from a caller-supplied random source
    ///
    /// Determinism is inherited from the source: the same RNG state always
    /// yields the same table.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    /// Sample noise at `(x, y)`; result in [-1, 1], exactly 0 on lattice points
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;

        let xf = x - x0;
        let yf = y - y0;

        let u = fade(xf);
        let v = fade(yf);

        let p = &self.perm;
        let aa = p[p[xi] as usize + yi];
        let ab = p[p[xi] as usize + yi + 1];
        let ba = p[p[xi + 1] as usize + yi];
        let bb = p[p[xi + 1] as usize + yi + 1];

        let x1 = lerp(gradient(aa, xf, yf), gradient(ba, xf - 1.0, yf), u);
        let x2 = lerp(
            gradient(ab, xf, yf - 1.0),
            gradient(bb, xf - 1.0, yf - 1.0),
            u,
        );

        lerp(x1, x2, v).clamp(-1.0, 1.0)
    }
}

/// Dot product of the offset `(x, y)` with one of eight gradient directions
#[inline]
fn gradient(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

/// Quintic smoothstep: 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

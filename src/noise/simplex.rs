//! Seeded 2D simplex gradient noise.
//!
//! The permutation table is derived once from the seed and never mutated, so a
//! [`NoiseSource`] can be shared freely between callers without synchronization.

const LEHMER_MODULUS: u64 = 2_147_483_647;
const LEHMER_MULTIPLIER: u64 = 16_807;

const NOISE_SCALE: f64 = 70.0;

const GRAD2: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

/// Deterministic 2D simplex noise generator.
#[derive(Clone)]
pub struct NoiseSource {
    seed: i64,
    perm: [u8; 512],
}

impl std::fmt::Debug for NoiseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseSource")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl NoiseSource {
    /// Build the permutation table for `seed`.
    ///
    /// `[0, 255]` is shuffled Fisher-Yates style, with swap indices drawn from a
    /// Lehmer generator (`s = s * 16807 mod 2^31-1`) starting from the seed
    /// reduced mod 2^31-1. A zero state would repeat forever, so it becomes 1.
    pub fn new(seed: i64) -> Self {
        let mut state = lehmer_state(seed);
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        for i in (1..256usize).rev() {
            state = (state * LEHMER_MULTIPLIER) % LEHMER_MODULUS;
            let j = (state % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        let perm = std::array::from_fn(|i| p[i & 255]);
        Self { seed, perm }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Noise value at `(x, y)`, roughly in `[-1, 1]`. Total over all finite inputs.
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let f2 = 0.5 * (3f64.sqrt() - 1.0);
        let g2 = (3.0 - 3f64.sqrt()) / 6.0;

        let s = (x + y) * f2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * g2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let ii = wrap_cell(i);
        let jj = wrap_cell(j);
        let gi0 = self.gradient_index(ii, jj);
        let gi1 = self.gradient_index(ii + i1, jj + j1);
        let gi2 = self.gradient_index(ii + 1, jj + 1);

        let n0 = corner(gi0, x0, y0);
        let n1 = corner(gi1, x1, y1);
        let n2 = corner(gi2, x2, y2);

        NOISE_SCALE * (n0 + n1 + n2)
    }

    fn gradient_index(&self, i: usize, j: usize) -> usize {
        let inner = usize::from(self.perm[j]);
        usize::from(self.perm[i + inner]) % GRAD2.len()
    }
}

// Seeds in `[1, 2^31-2]` are used as-is; everything else is reduced mod 2^31-1,
// with a zero residue bumped to 1.
fn lehmer_state(seed: i64) -> u64 {
    match seed.rem_euclid(LEHMER_MODULUS as i64) {
        0 => 1,
        s => s as u64,
    }
}

// Lattice coordinates are masked, not reduced with `%`, so negative cells wrap.
fn wrap_cell(v: f64) -> usize {
    if !v.is_finite() {
        return 0;
    }
    ((v as i64) & 255) as usize
}

fn corner(gi: usize, dx: f64, dy: f64) -> f64 {
    let t = 0.5 - dx * dx - dy * dy;
    if t < 0.0 {
        return 0.0;
    }
    let (gx, gy) = GRAD2[gi];
    let t2 = t * t;
    t2 * t2 * (gx * dx + gy * dy)
}

#[cfg(test)]
#[path = "../../tests/unit/noise/simplex.rs"]
mod tests;

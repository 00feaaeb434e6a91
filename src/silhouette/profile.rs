use crate::foundation::{
    error::{MorphError, MorphResult},
    math::wrap_degrees,
};

/// Entries in a [`RadialProfile`], one per integer degree.
pub const PROFILE_LEN: usize = 360;

/// Radius-per-degree outline of a shape around its viewBox center.
///
/// Radii are fractions of the source's half-extent. Every entry is finite and
/// `>= 0`; indexing wraps, so entry `360` is entry `0`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RadialProfile {
    radii: Vec<f64>,
}

impl RadialProfile {
    pub fn from_radii(radii: Vec<f64>) -> MorphResult<Self> {
        if radii.len() != PROFILE_LEN {
            return Err(MorphError::invalid_source(format!(
                "radial profile must have {PROFILE_LEN} entries, got {}",
                radii.len()
            )));
        }
        if let Some((i, r)) = radii
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r < 0.0)
        {
            return Err(MorphError::invalid_source(format!(
                "radial profile entry {i} is {r}, expected finite and >= 0"
            )));
        }
        Ok(Self { radii })
    }

    /// A perfect circle of radius `r`.
    pub fn circle(r: f64) -> MorphResult<Self> {
        Self::from_radii(vec![r; PROFILE_LEN])
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Entry at `index` modulo [`PROFILE_LEN`]; negative indices wrap too.
    pub fn at(&self, index: i64) -> f64 {
        self.radii[index.rem_euclid(PROFILE_LEN as i64) as usize]
    }

    /// Smooth cyclic radius at any real angle in degrees.
    ///
    /// Uniform Catmull-Rom over the entries at `floor-1, floor, floor+1, floor+2`,
    /// so the result is C1 across degree boundaries. Overshoot below zero is clamped.
    pub fn sample_at(&self, angle_deg: f64) -> f64 {
        let a = wrap_degrees(angle_deg);
        let base = a.floor();
        let t = a - base;
        let i = base as i64;

        let p0 = self.at(i - 1);
        let p1 = self.at(i);
        let p2 = self.at(i + 1);
        let p3 = self.at(i + 2);

        catmull_rom(p0, p1, p2, p3, t).max(0.0)
    }

    pub fn max_radius(&self) -> f64 {
        self.radii.iter().copied().fold(0.0, f64::max)
    }
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/profile.rs"]
mod tests;

use std::f64::consts::TAU;

use crate::{
    foundation::error::{MorphError, MorphResult},
    silhouette::{
        measure::PathMeasurer,
        profile::{PROFILE_LEN, RadialProfile},
        source::SilhouetteSource,
    },
};

/// Tunables for [`extract_profile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Points sampled along the outline by arc length.
    pub samples: usize,
    /// Gaussian smoothing window is `±half_width` degrees; 0 disables smoothing.
    pub smoothing_half_width: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            samples: 1440,
            smoothing_half_width: 25,
        }
    }
}

/// Convert a vector outline into a 360-entry radial profile.
///
/// Points are bucketed into one-degree bins keeping the largest radius (outer
/// envelope), empty bins are linearly filled from their nearest hit neighbours,
/// then the whole ring is Gaussian-smoothed.
pub fn extract_profile(
    source: &SilhouetteSource,
    measurer: &dyn PathMeasurer,
    opts: ExtractOptions,
) -> MorphResult<RadialProfile> {
    source.validate()?;
    if opts.samples < 3 {
        return Err(MorphError::invalid_source(format!(
            "silhouette '{}': need at least 3 samples, got {}",
            source.name, opts.samples
        )));
    }

    let points = measurer.sample_evenly(&source.outline, opts.samples)?;
    if points.len() < 3 {
        return Err(MorphError::invalid_source(format!(
            "silhouette '{}': only {} points sampled",
            source.name,
            points.len()
        )));
    }

    let center = source.view_box.center();
    let half = source.view_box.half_extent();

    let mut bins = [0.0f64; PROFILE_LEN];
    let mut hits = [0u32; PROFILE_LEN];
    for p in &points {
        let d = *p - center;
        let r = d.hypot() / half;
        if !r.is_finite() {
            return Err(MorphError::invalid_source(format!(
                "silhouette '{}': non-finite sample at {p:?}",
                source.name
            )));
        }
        let angle = d.y.atan2(d.x).rem_euclid(TAU);
        let bin = (angle.to_degrees().floor() as usize) % PROFILE_LEN;
        bins[bin] = bins[bin].max(r);
        hits[bin] += 1;
    }

    let filled = fill_gaps(&bins, &hits);
    let smoothed = smooth_ring(&filled, opts.smoothing_half_width);
    RadialProfile::from_radii(smoothed)
}

/// Linear fill of empty bins from the nearest hit bin on each side, wrapping.
pub(crate) fn fill_gaps(bins: &[f64; PROFILE_LEN], hits: &[u32; PROFILE_LEN]) -> [f64; PROFILE_LEN] {
    let mut out = *bins;
    if hits.iter().all(|&h| h == 0) {
        return out;
    }

    for i in 0..PROFILE_LEN {
        if hits[i] > 0 {
            continue;
        }
        let (prev, dp) = nearest_hit(hits, i, PROFILE_LEN - 1);
        let (next, dn) = nearest_hit(hits, i, 1);
        let w = dp as f64 / (dp + dn) as f64;
        out[i] = bins[prev] + (bins[next] - bins[prev]) * w;
    }
    out
}

// `step` of PROFILE_LEN - 1 walks backwards.
fn nearest_hit(hits: &[u32; PROFILE_LEN], from: usize, step: usize) -> (usize, usize) {
    let mut idx = from;
    for dist in 1..=PROFILE_LEN {
        idx = (idx + step) % PROFILE_LEN;
        if hits[idx] > 0 {
            return (idx, dist);
        }
    }
    (from, PROFILE_LEN)
}

/// Circular Gaussian-weighted average over `±half_width` entries, sigma `half_width / 2`.
pub(crate) fn smooth_ring(values: &[f64; PROFILE_LEN], half_width: usize) -> Vec<f64> {
    if half_width == 0 {
        return values.to_vec();
    }

    let k = half_width.min(PROFILE_LEN / 2) as i64;
    let sigma = k as f64 / 2.0;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-k..=k).map(|o| (-((o * o) as f64) / denom).exp()).collect();
    let sum: f64 = weights.iter().sum();

    (0..PROFILE_LEN as i64)
        .map(|i| {
            let acc: f64 = (-k..=k)
                .zip(&weights)
                .map(|(o, w)| w * values[(i + o).rem_euclid(PROFILE_LEN as i64) as usize])
                .sum();
            acc / sum
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/extract.rs"]
mod tests;

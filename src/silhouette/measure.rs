use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point};

use crate::foundation::error::{MorphError, MorphResult};

/// Capability to locate points along an outline by arc length.
///
/// Implementations backed by a host surface may not be ready yet; they report
/// that with [`MorphError::SurfaceUnavailable`] so callers can retry later.
pub trait PathMeasurer {
    /// Point at `fraction` (`0..=1`) of the outline's total arc length.
    fn point_at_fraction(&self, outline: &BezPath, fraction: f64) -> MorphResult<Point>;

    /// `count` points spaced evenly by arc length, starting at fraction 0.
    ///
    /// The outline is treated as closed, so fraction 1 is not repeated.
    fn sample_evenly(&self, outline: &BezPath, count: usize) -> MorphResult<Vec<Point>> {
        (0..count)
            .map(|i| self.point_at_fraction(outline, i as f64 / count as f64))
            .collect()
    }
}

/// Pure-geometry measurer using kurbo's adaptive-subdivision arc length.
#[derive(Clone, Copy, Debug)]
pub struct ArcLengthMeasurer {
    pub accuracy: f64,
}

impl Default for ArcLengthMeasurer {
    fn default() -> Self {
        Self { accuracy: 1e-3 }
    }
}

impl PathMeasurer for ArcLengthMeasurer {
    fn point_at_fraction(&self, outline: &BezPath, fraction: f64) -> MorphResult<Point> {
        let table = ArcTable::build(outline, self.accuracy)?;
        Ok(table.point_at(fraction.clamp(0.0, 1.0) * table.total, self.accuracy))
    }

    fn sample_evenly(&self, outline: &BezPath, count: usize) -> MorphResult<Vec<Point>> {
        let table = ArcTable::build(outline, self.accuracy)?;
        let step = table.total / count as f64;
        Ok((0..count)
            .map(|i| table.point_at(i as f64 * step, self.accuracy))
            .collect())
    }
}

struct ArcTable {
    segs: Vec<PathSeg>,
    // starts[i] is the arc length before segs[i].
    starts: Vec<f64>,
    total: f64,
}

impl ArcTable {
    fn build(outline: &BezPath, accuracy: f64) -> MorphResult<Self> {
        if !accuracy.is_finite() || accuracy <= 0.0 {
            return Err(MorphError::validation("arc length accuracy must be > 0"));
        }

        let mut segs = Vec::new();
        let mut starts = Vec::new();
        let mut total = 0.0;
        for seg in outline.segments() {
            let len = seg.arclen(accuracy);
            if !len.is_finite() {
                return Err(MorphError::invalid_source(
                    "outline contains a non-finite segment",
                ));
            }
            if len <= 0.0 {
                continue;
            }
            segs.push(seg);
            starts.push(total);
            total += len;
        }

        if segs.is_empty() || total <= 0.0 {
            return Err(MorphError::invalid_source("outline has zero arc length"));
        }
        Ok(Self {
            segs,
            starts,
            total,
        })
    }

    fn point_at(&self, s: f64, accuracy: f64) -> Point {
        let s = s.clamp(0.0, self.total);
        let idx = match self.starts.partition_point(|&start| start <= s) {
            0 => 0,
            n => n - 1,
        };
        let seg = self.segs[idx];
        let local = s - self.starts[idx];
        let t = seg.inv_arclen(local, accuracy).clamp(0.0, 1.0);
        seg.eval(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/measure.rs"]
mod tests;

use crate::foundation::{
    error::{MorphError, MorphResult},
    math::smoothstep,
};

/// Seconds spent in each phase of one morph cycle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    pub blob_hold: f64,
    pub morph_in: f64,
    pub silhouette_hold: f64,
    pub morph_out: f64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            blob_hold: 5.0,
            morph_in: 3.0,
            silhouette_hold: 4.0,
            morph_out: 3.0,
        }
    }
}

impl PhaseDurations {
    pub fn total(&self) -> f64 {
        self.blob_hold + self.morph_in + self.silhouette_hold + self.morph_out
    }

    pub fn validate(&self) -> MorphResult<()> {
        for (name, v) in [
            ("blob_hold", self.blob_hold),
            ("morph_in", self.morph_in),
            ("silhouette_hold", self.silhouette_hold),
            ("morph_out", self.morph_out),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(MorphError::validation(format!(
                    "phases.{name} must be finite and >= 0"
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(MorphError::validation(
                "phase durations must sum to more than 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MorphPhase {
    BlobHold,
    MorphIn,
    SilhouetteHold,
    MorphOut,
}

/// Scheduler output for one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphCycleState {
    pub silhouette_index: usize,
    pub phase: MorphPhase,
    /// Raw blob-to-silhouette weight in `[0, 1]`.
    pub fraction: f64,
    /// `fraction * max_morph_cap`; what the renderer blends with.
    pub effective_fraction: f64,
}

/// Stateless morph timeline: every query is a pure function of elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MorphScheduler {
    phases: PhaseDurations,
    max_morph_cap: f64,
}

impl MorphScheduler {
    pub fn new(phases: PhaseDurations, max_morph_cap: f64) -> MorphResult<Self> {
        phases.validate()?;
        if !max_morph_cap.is_finite() || max_morph_cap <= 0.0 || max_morph_cap > 1.0 {
            return Err(MorphError::validation("max_morph_cap must be in (0, 1]"));
        }
        Ok(Self {
            phases,
            max_morph_cap,
        })
    }

    pub fn phases(&self) -> PhaseDurations {
        self.phases
    }

    pub fn max_morph_cap(&self) -> f64 {
        self.max_morph_cap
    }

    pub fn cycle_len(&self) -> f64 {
        self.phases.total()
    }

    /// State at `elapsed` seconds for a catalog of `catalog_len` silhouettes.
    ///
    /// Negative or non-finite time is treated as 0. An empty catalog pins the
    /// state to blob-only.
    pub fn state_at(&self, elapsed: f64, catalog_len: usize) -> MorphCycleState {
        let t = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let total = self.cycle_len();
        let cycle = (t / total).floor();
        let local = t - cycle * total;

        let p = &self.phases;
        let (phase, fraction) = if local < p.blob_hold {
            (MorphPhase::BlobHold, 0.0)
        } else if local < p.blob_hold + p.morph_in {
            let u = progress(local - p.blob_hold, p.morph_in);
            (MorphPhase::MorphIn, smoothstep(u))
        } else if local < p.blob_hold + p.morph_in + p.silhouette_hold {
            (MorphPhase::SilhouetteHold, 1.0)
        } else {
            let u = progress(
                local - p.blob_hold - p.morph_in - p.silhouette_hold,
                p.morph_out,
            );
            (MorphPhase::MorphOut, 1.0 - smoothstep(u))
        };

        if catalog_len == 0 {
            return MorphCycleState {
                silhouette_index: 0,
                phase,
                fraction: 0.0,
                effective_fraction: 0.0,
            };
        }

        let silhouette_index = (cycle as u64 % catalog_len as u64) as usize;
        MorphCycleState {
            silhouette_index,
            phase,
            fraction,
            effective_fraction: fraction * self.max_morph_cap,
        }
    }
}

fn progress(elapsed_in_phase: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    elapsed_in_phase / duration
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;

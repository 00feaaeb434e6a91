use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    animation::{
        palette::{Palette, default_palettes},
        schedule::PhaseDurations,
    },
    foundation::{
        core::{LAYER_COUNT, Rgb8},
        error::{MorphError, MorphResult},
    },
    silhouette::{
        builtin::builtin_sources,
        extract::ExtractOptions,
        source::{SilhouetteSource, ViewBox},
    },
};

/// One noise octave perturbing the blob radius.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NoiseOctave {
    pub frequency: f64,
    pub amplitude: f64,
}

/// Geometry and shading knobs of the render loop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    pub octaves: Vec<NoiseOctave>,
    /// Multiplier turning elapsed seconds into noise-space drift.
    pub time_scale: f64,
    /// Noise-space x offset between consecutive layers.
    pub layer_phase: f64,
    /// Silhouette radius multiplier so figures fill like the blob.
    pub overscan: f64,
    pub pulse_amp: f64,
    pub pulse_frequency: f64,
    pub breath_amp: f64,
    pub breath_speed: f64,
    /// Outer layer radius as a fraction of the smaller surface dimension.
    pub base_radius: f64,
    /// Radius lost per layer, as a fraction of `base_radius`.
    pub layer_shrink: f64,
    pub base_opacity: f64,
    pub opacity_step: f64,
    /// Center shift per unit of normalized pointer, as a fraction of the smaller dimension.
    pub parallax_gain: f64,
    /// Upward center drift at full scroll, as a fraction of surface height.
    pub scroll_drift: f64,
    /// Per-frame approach factor of the eased pointer, in `(0, 1]`.
    pub pointer_smoothing: f64,
    pub core_noise_amp: f64,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            octaves: vec![
                NoiseOctave {
                    frequency: 1.5,
                    amplitude: 0.18,
                },
                NoiseOctave {
                    frequency: 3.0,
                    amplitude: 0.07,
                },
                NoiseOctave {
                    frequency: 5.0,
                    amplitude: 0.03,
                },
            ],
            time_scale: 0.15,
            layer_phase: 1.7,
            overscan: 1.15,
            pulse_amp: 0.04,
            pulse_frequency: 2.0,
            breath_amp: 0.02,
            breath_speed: 0.8,
            base_radius: 0.3,
            layer_shrink: 0.14,
            base_opacity: 0.55,
            opacity_step: 0.1,
            parallax_gain: 0.06,
            scroll_drift: 0.25,
            pointer_smoothing: 0.08,
            core_noise_amp: 0.04,
        }
    }
}

impl ShapeParams {
    pub fn validate(&self) -> MorphResult<()> {
        let mut scalars = vec![
            ("time_scale", self.time_scale),
            ("layer_phase", self.layer_phase),
            ("overscan", self.overscan),
            ("pulse_amp", self.pulse_amp),
            ("pulse_frequency", self.pulse_frequency),
            ("breath_amp", self.breath_amp),
            ("breath_speed", self.breath_speed),
            ("base_radius", self.base_radius),
            ("layer_shrink", self.layer_shrink),
            ("base_opacity", self.base_opacity),
            ("opacity_step", self.opacity_step),
            ("parallax_gain", self.parallax_gain),
            ("scroll_drift", self.scroll_drift),
            ("pointer_smoothing", self.pointer_smoothing),
            ("core_noise_amp", self.core_noise_amp),
        ];
        for o in &self.octaves {
            scalars.push(("octaves.frequency", o.frequency));
            scalars.push(("octaves.amplitude", o.amplitude));
        }
        for (name, v) in scalars {
            if !v.is_finite() {
                return Err(MorphError::validation(format!(
                    "shape.{name} must be finite"
                )));
            }
        }

        if self.base_radius <= 0.0 {
            return Err(MorphError::validation("shape.base_radius must be > 0"));
        }
        if self.overscan <= 0.0 {
            return Err(MorphError::validation("shape.overscan must be > 0"));
        }
        let innermost = 1.0 - self.layer_shrink * (LAYER_COUNT - 1) as f64;
        if self.layer_shrink < 0.0 || innermost <= 0.0 {
            return Err(MorphError::validation(
                "shape.layer_shrink must keep every layer radius > 0",
            ));
        }
        let faintest = self.base_opacity - self.opacity_step * (LAYER_COUNT - 1) as f64;
        if self.base_opacity > 1.0 || self.opacity_step < 0.0 || faintest < 0.0 {
            return Err(MorphError::validation(
                "shape.base_opacity/opacity_step must keep every layer opacity in [0, 1]",
            ));
        }
        if self.pointer_smoothing <= 0.0 || self.pointer_smoothing > 1.0 {
            return Err(MorphError::validation(
                "shape.pointer_smoothing must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Where a configured silhouette's artwork comes from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SilhouetteSourceRef {
    /// Inline SVG path data with its authoring box.
    PathData { d: String, view_box: ViewBox },
    /// An SVG document, relative paths resolved against the config's directory.
    SvgFile { svg: PathBuf },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SilhouetteEntry {
    pub name: String,
    #[serde(flatten)]
    pub source: SilhouetteSourceRef,
}

impl SilhouetteEntry {
    pub fn load(&self, base_dir: &Path) -> MorphResult<SilhouetteSource> {
        match &self.source {
            SilhouetteSourceRef::PathData { d, view_box } => {
                SilhouetteSource::from_path_data(self.name.clone(), d, *view_box)
            }
            SilhouetteSourceRef::SvgFile { svg } => {
                let path = base_dir.join(svg);
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("read silhouette svg '{}'", path.display()))?;
                SilhouetteSource::from_svg(self.name.clone(), &bytes)
            }
        }
    }
}

/// Every recognized engine option. All fields fall back to their defaults
/// when absent from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub seed: i64,
    pub phases: PhaseDurations,
    pub max_morph_cap: f64,
    pub render_samples: usize,
    pub extraction_samples: usize,
    pub smoothing_half_width: usize,
    pub core_scale: f64,
    pub palette_rate: f64,
    pub palettes: Vec<Palette>,
    /// `None` selects the bundled silhouettes; an empty list means blob-only.
    pub silhouettes: Option<Vec<SilhouetteEntry>>,
    pub background: Rgb8,
    pub shape: ShapeParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            phases: PhaseDurations::default(),
            max_morph_cap: 0.88,
            render_samples: 360,
            extraction_samples: 1440,
            smoothing_half_width: 25,
            core_scale: 0.32,
            palette_rate: 0.125,
            palettes: default_palettes(),
            silhouettes: None,
            background: Rgb8::new(10, 10, 14),
            shape: ShapeParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        serde_json::from_str(s).map_err(|e| MorphError::serde(e.to_string()))
    }

    pub fn to_json_string(&self) -> MorphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MorphError::serde(e.to_string()))
    }

    pub fn validate(&self) -> MorphResult<()> {
        self.phases.validate()?;
        if !self.max_morph_cap.is_finite() || self.max_morph_cap <= 0.0 || self.max_morph_cap > 1.0
        {
            return Err(MorphError::validation("max_morph_cap must be in (0, 1]"));
        }
        if self.render_samples < 3 {
            return Err(MorphError::validation("render_samples must be >= 3"));
        }
        if self.extraction_samples < 3 {
            return Err(MorphError::validation("extraction_samples must be >= 3"));
        }
        if self.smoothing_half_width > 180 {
            return Err(MorphError::validation(
                "smoothing_half_width must be <= 180 degrees",
            ));
        }
        if !self.core_scale.is_finite() || self.core_scale <= 0.0 || self.core_scale > 1.0 {
            return Err(MorphError::validation("core_scale must be in (0, 1]"));
        }
        if !self.palette_rate.is_finite() || self.palette_rate < 0.0 {
            return Err(MorphError::validation(
                "palette_rate must be finite and >= 0",
            ));
        }
        if self.palettes.is_empty() {
            return Err(MorphError::validation(
                "palettes must contain at least one palette",
            ));
        }
        if let Some(entries) = &self.silhouettes {
            for e in entries {
                if e.name.trim().is_empty() {
                    return Err(MorphError::validation("silhouette name must be non-empty"));
                }
            }
        }
        self.shape.validate()
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            samples: self.extraction_samples,
            smoothing_half_width: self.smoothing_half_width,
        }
    }

    /// Load the configured silhouette artwork. Entries that fail to load are
    /// logged and dropped; the catalog simply gets shorter.
    pub fn resolve_sources(&self, base_dir: &Path) -> Vec<SilhouetteSource> {
        let Some(entries) = &self.silhouettes else {
            return builtin_sources();
        };
        entries
            .iter()
            .filter_map(|entry| match entry.load(base_dir) {
                Ok(src) => Some(src),
                Err(err) => {
                    tracing::warn!(silhouette = %entry.name, %err, "silhouette source not loaded");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;

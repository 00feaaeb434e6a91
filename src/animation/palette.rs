use crate::foundation::{
    core::{LAYER_COUNT, Rgb8},
    error::{MorphError, MorphResult},
    math::smoothstep,
};

/// One color per rendered layer, outermost first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Palette(pub [Rgb8; LAYER_COUNT]);

impl Palette {
    pub fn layer(&self, layer: usize) -> Rgb8 {
        self.0[layer.min(LAYER_COUNT - 1)]
    }
}

/// The four bundled moods.
pub fn default_palettes() -> Vec<Palette> {
    vec![
        // ember
        Palette([
            Rgb8::new(255, 94, 58),
            Rgb8::new(255, 149, 0),
            Rgb8::new(255, 204, 102),
            Rgb8::new(255, 236, 179),
        ]),
        // lagoon
        Palette([
            Rgb8::new(0, 119, 182),
            Rgb8::new(0, 180, 216),
            Rgb8::new(72, 202, 228),
            Rgb8::new(202, 240, 248),
        ]),
        // orchid
        Palette([
            Rgb8::new(114, 9, 183),
            Rgb8::new(181, 23, 158),
            Rgb8::new(247, 37, 133),
            Rgb8::new(255, 182, 217),
        ]),
        // moss
        Palette([
            Rgb8::new(45, 106, 79),
            Rgb8::new(64, 145, 108),
            Rgb8::new(116, 198, 157),
            Rgb8::new(216, 243, 220),
        ]),
    ]
}

/// Ordered palettes cycled continuously over time.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteCatalog {
    palettes: Vec<Palette>,
    rate: f64,
}

impl PaletteCatalog {
    /// `rate` is palettes advanced per second.
    pub fn new(palettes: Vec<Palette>, rate: f64) -> MorphResult<Self> {
        if palettes.is_empty() {
            return Err(MorphError::validation(
                "palette catalog must contain at least one palette",
            ));
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(MorphError::validation("palette_rate must be finite and >= 0"));
        }
        Ok(Self { palettes, rate })
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    /// Blended color of `layer` at `elapsed` seconds.
    ///
    /// The integer part of `elapsed * rate` (mod palette count) picks the
    /// current palette; the smoothstepped fractional part blends toward the
    /// next one, wrapping after the last. Out-of-range layers use the innermost.
    pub fn color_at(&self, elapsed: f64, layer: usize) -> Rgb8 {
        let t = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let count = self.palettes.len();
        let position = (t * self.rate).rem_euclid(count as f64);
        let base = position.floor();
        let current = (base as usize).min(count - 1);
        let next = (current + 1) % count;
        let w = smoothstep(position - base);

        let a = self.palettes[current].layer(layer);
        let b = self.palettes[next].layer(layer);
        a.mix(b, w)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/palette.rs"]
mod tests;

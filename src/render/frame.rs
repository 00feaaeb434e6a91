//! Per-frame orchestration of the morphing visual.
//!
//! [`MorphEngine`] holds the immutable pieces (noise table, silhouette and
//! palette catalogs, scheduler). Everything that changes between frames is
//! either passed in as [`RenderFrameInput`] or lives in the caller-owned
//! [`FrameContext`], so the engine itself is shared read-only across frames.

use std::{f64::consts::TAU, path::Path};

use kurbo::{Point, Vec2};

use crate::{
    animation::{
        palette::PaletteCatalog,
        schedule::{MorphCycleState, MorphScheduler},
    },
    foundation::{
        config::EngineConfig,
        core::{Canvas, LAYER_COUNT, Rgb8},
        error::MorphResult,
        math::lerp,
    },
    noise::simplex::NoiseSource,
    silhouette::{
        catalog::{CatalogBuilder, SilhouetteCatalog},
        measure::PathMeasurer,
        profile::RadialProfile,
    },
    render::surface::{GradientStop, RadialFill, Surface},
};

/// Signals supplied by the host for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderFrameInput {
    /// Pointer position normalized to `[-1, 1]` around the surface center.
    pub pointer_x: f64,
    pub pointer_y: f64,
    /// Page scroll progress in `[0, 1]`.
    pub scroll_progress: f64,
    /// Seconds since the animation started.
    pub elapsed: f64,
}

impl RenderFrameInput {
    pub fn at(elapsed: f64) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    fn sanitized(&self) -> Self {
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        Self {
            pointer_x: finite_or(self.pointer_x, 0.0).clamp(-1.0, 1.0),
            pointer_y: finite_or(self.pointer_y, 0.0).clamp(-1.0, 1.0),
            scroll_progress: finite_or(self.scroll_progress, 0.0).clamp(0.0, 1.0),
            elapsed: finite_or(self.elapsed, 0.0).max(0.0),
        }
    }
}

/// Caller-owned easing state carried from one frame to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameContext {
    smoothed_pointer: Vec2,
    frames: u64,
}

impl FrameContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smoothed_pointer(&self) -> Vec2 {
        self.smoothed_pointer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn advance(&mut self, target: Vec2, smoothing: f64) -> Vec2 {
        self.smoothed_pointer += (target - self.smoothed_pointer) * smoothing;
        self.frames += 1;
        self.smoothed_pointer
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// Concentric layer, 0 is outermost.
    Layer(usize),
    /// Bright focal point drawn after all layers.
    CoreGlow,
}

/// One filled closed polygon of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerShape {
    pub kind: ShapeKind,
    pub polygon: Vec<Point>,
    pub center: Point,
    pub color: Rgb8,
    pub opacity: f64,
    pub fill: RadialFill,
}

/// Everything one frame draws, in draw order: `layers` then `core`.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub canvas: Canvas,
    pub state: MorphCycleState,
    pub layers: Vec<LayerShape>,
    pub core: LayerShape,
}

impl FramePlan {
    pub fn shapes(&self) -> impl Iterator<Item = &LayerShape> {
        self.layers.iter().chain(std::iter::once(&self.core))
    }
}

/// The morphing animation engine.
#[derive(Debug)]
pub struct MorphEngine {
    config: EngineConfig,
    noise: NoiseSource,
    catalog: SilhouetteCatalog,
    palettes: PaletteCatalog,
    scheduler: MorphScheduler,
}

impl MorphEngine {
    /// Build an engine over an already extracted catalog. An empty catalog
    /// renders blob-only for as long as it stays empty.
    pub fn new(config: EngineConfig, catalog: SilhouetteCatalog) -> MorphResult<Self> {
        config.validate()?;
        let noise = NoiseSource::new(config.seed);
        let palettes = PaletteCatalog::new(config.palettes.clone(), config.palette_rate)?;
        let scheduler = MorphScheduler::new(config.phases, config.max_morph_cap)?;
        if catalog.is_empty() {
            tracing::warn!("silhouette catalog is empty; rendering blob-only");
        } else {
            tracing::info!(silhouettes = ?catalog.names(), "morph engine ready");
        }
        Ok(Self {
            config,
            noise,
            catalog,
            palettes,
            scheduler,
        })
    }

    /// Resolve the configured silhouettes, run one extraction pass, and build
    /// the engine over whatever succeeded. `base_dir` anchors relative SVG
    /// paths.
    ///
    /// The returned builder still holds sources the measurer deferred; hand it
    /// to [`MorphEngine::retry_deferred`] at the next opportunity.
    pub fn from_config(
        config: EngineConfig,
        base_dir: &Path,
        measurer: &dyn PathMeasurer,
    ) -> MorphResult<(Self, CatalogBuilder)> {
        config.validate()?;
        let sources = config.resolve_sources(base_dir);
        let mut builder = CatalogBuilder::new(sources, config.extract_options());
        builder.build_pass(measurer);
        if builder.has_deferred() {
            tracing::info!(
                deferred = ?builder.report().deferred,
                "silhouettes deferred until the measurer is ready"
            );
        }
        let engine = Self::new(config, builder.catalog())?;
        Ok((engine, builder))
    }

    /// Give deferred sources another pass and install the grown catalog.
    /// Returns `true` when at least one more silhouette was built.
    pub fn retry_deferred(
        &mut self,
        builder: &mut CatalogBuilder,
        measurer: &dyn PathMeasurer,
    ) -> bool {
        if !builder.has_deferred() {
            return false;
        }
        let before = builder.report().built.len();
        builder.build_pass(measurer);
        let grew = builder.report().built.len() > before;
        if grew {
            self.install_catalog(builder.catalog());
        }
        grew
    }

    /// Swap in a catalog that finished building later (for example after
    /// deferred sources were retried).
    pub fn install_catalog(&mut self, catalog: SilhouetteCatalog) {
        tracing::info!(silhouettes = ?catalog.names(), "silhouette catalog installed");
        self.catalog = catalog;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SilhouetteCatalog {
        &self.catalog
    }

    pub fn palettes(&self) -> &PaletteCatalog {
        &self.palettes
    }

    pub fn scheduler(&self) -> &MorphScheduler {
        &self.scheduler
    }

    pub fn noise(&self) -> &NoiseSource {
        &self.noise
    }

    /// Compute a frame's geometry and paints without drawing anything.
    pub fn plan_frame(
        &self,
        ctx: &mut FrameContext,
        input: &RenderFrameInput,
        canvas: Canvas,
    ) -> FramePlan {
        let input = input.sanitized();
        let shape = &self.config.shape;
        let t = input.elapsed;

        let state = self.scheduler.state_at(t, self.catalog.len());
        let profile = self.catalog.profile(state.silhouette_index);
        let morph = if profile.is_some() {
            state.effective_fraction
        } else {
            0.0
        };

        let pointer = ctx.advance(
            Vec2::new(input.pointer_x, input.pointer_y),
            shape.pointer_smoothing,
        );
        let min_dim = canvas.min_dim();
        let center = canvas.center() + pointer * (shape.parallax_gain * min_dim)
            - Vec2::new(
                0.0,
                input.scroll_progress * shape.scroll_drift * f64::from(canvas.height),
            );

        let layers: Vec<LayerShape> = (0..LAYER_COUNT)
            .map(|layer| self.plan_layer(layer, t, center, min_dim, profile, morph))
            .collect();
        let core = self.plan_core(&layers[LAYER_COUNT - 1], t);

        tracing::trace!(
            elapsed = t,
            silhouette = state.silhouette_index,
            morph,
            "frame planned"
        );

        FramePlan {
            canvas,
            state,
            layers,
            core,
        }
    }

    /// Plan a frame and draw it: background, the concentric layers outermost
    /// first, then the core glow.
    pub fn render_frame(
        &self,
        ctx: &mut FrameContext,
        input: &RenderFrameInput,
        surface: &mut dyn Surface,
    ) -> MorphResult<FramePlan> {
        let plan = self.plan_frame(ctx, input, surface.canvas());
        surface.clear(self.config.background)?;
        for shape in plan.shapes() {
            surface.fill_polygon(&shape.polygon, &shape.fill)?;
        }
        Ok(plan)
    }

    fn plan_layer(
        &self,
        layer: usize,
        t: f64,
        center: Point,
        min_dim: f64,
        profile: Option<&RadialProfile>,
        morph: f64,
    ) -> LayerShape {
        let shape = &self.config.shape;
        let n = self.config.render_samples;
        let slow = t * shape.time_scale;
        let layer_offset = layer as f64 * shape.layer_phase;
        let layer_radius = shape.base_radius * min_dim * (1.0 - shape.layer_shrink * layer as f64);

        let polygon = (0..n)
            .map(|k| {
                let angle = TAU * k as f64 / n as f64;
                let (sin, cos) = angle.sin_cos();

                let blob = 1.0
                    + shape
                        .octaves
                        .iter()
                        .map(|o| {
                            o.amplitude
                                * self.noise.noise2d(
                                    cos * o.frequency + slow + layer_offset,
                                    sin * o.frequency + slow,
                                )
                        })
                        .sum::<f64>();
                let radius = match profile {
                    Some(p) => lerp(blob, p.sample_at(angle.to_degrees()) * shape.overscan, morph),
                    None => blob,
                };

                let pulse = shape.pulse_amp
                    * self.noise.noise2d(
                        cos * shape.pulse_frequency + slow * 1.3 + layer_offset,
                        sin * shape.pulse_frequency - slow * 1.1,
                    );
                let breath = (t * shape.breath_speed + angle * 2.0).sin() * shape.breath_amp;

                let r = (radius + pulse + breath).max(0.0) * layer_radius;
                center + Vec2::new(cos, sin) * r
            })
            .collect();

        let color = self.palettes.color_at(t, layer);
        let opacity = shape.base_opacity - shape.opacity_step * layer as f64;
        let a = opacity as f32;
        let fill = RadialFill {
            center,
            radius: layer_radius * 1.25,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: color.mix(Rgb8::WHITE, 0.2),
                    alpha: a,
                },
                GradientStop {
                    offset: 0.55,
                    color,
                    alpha: a * 0.7,
                },
                GradientStop {
                    offset: 1.0,
                    color,
                    alpha: 0.0,
                },
            ],
        };

        LayerShape {
            kind: ShapeKind::Layer(layer),
            polygon,
            center,
            color,
            opacity,
            fill,
        }
    }

    fn plan_core(&self, innermost: &LayerShape, t: f64) -> LayerShape {
        let shape = &self.config.shape;
        let scale = self.config.core_scale;
        let slow = t * shape.time_scale;
        let center = innermost.center;
        let n = innermost.polygon.len().max(1);

        let polygon = innermost
            .polygon
            .iter()
            .enumerate()
            .map(|(k, v)| {
                let angle = TAU * k as f64 / n as f64;
                let (sin, cos) = angle.sin_cos();
                let wobble = shape.core_noise_amp
                    * self
                        .noise
                        .noise2d(cos * 2.0 + slow * 2.0, sin * 2.0 + slow * 2.0 + 9.0);
                center + (*v - center) * (scale + wobble).max(0.0)
            })
            .collect();

        let reach = innermost
            .polygon
            .iter()
            .map(|v| (*v - center).hypot())
            .fold(0.0, f64::max);
        let radius = (reach * scale * 1.3).max(1.0);

        let color = innermost.color;
        let fill = RadialFill {
            center,
            radius,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: color.mix(Rgb8::WHITE, 0.85),
                    alpha: 0.95,
                },
                GradientStop {
                    offset: 0.45,
                    color,
                    alpha: 0.6,
                },
                GradientStop {
                    offset: 1.0,
                    color,
                    alpha: 0.0,
                },
            ],
        };

        LayerShape {
            kind: ShapeKind::CoreGlow,
            polygon,
            center,
            color,
            opacity: 0.95,
            fill,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;

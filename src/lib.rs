//! Blobmorph is a procedural "living blob" animation engine.
//!
//! Four concentric, noise-perturbed closed curves breathe in place and
//! periodically morph into human silhouettes extracted from vector artwork,
//! then relax back into a blob. Colors drift continuously through a catalog of
//! four-color palettes.
//!
//! # Pipeline overview
//!
//! 1. **Extract** (once): `SilhouetteSource -> RadialProfile` via a [`PathMeasurer`]
//! 2. **Schedule**: `elapsed -> MorphCycleState` (which silhouette, how far morphed)
//! 3. **Plan**: `RenderFrameInput + FrameContext -> FramePlan` (polygons and gradients)
//! 4. **Draw**: `FramePlan -> Surface` (CPU raster via `vello_cpu`, or a recording surface)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: a seed fixes every frame for a given input.
//! - **No IO per frame**: artwork is loaded and measured up front.
//! - **Graceful degradation**: without silhouettes the engine renders blob-only.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod noise;
mod render;
mod silhouette;

pub use animation::palette::{Palette, PaletteCatalog, default_palettes};
pub use animation::schedule::{MorphCycleState, MorphPhase, MorphScheduler, PhaseDurations};
pub use foundation::config::{
    EngineConfig, NoiseOctave, ShapeParams, SilhouetteEntry, SilhouetteSourceRef,
};
pub use foundation::core::{BezPath, Canvas, LAYER_COUNT, Point, Rect, Rgb8, Vec2};
pub use foundation::error::{MorphError, MorphResult};
pub use foundation::math::{lerp, smoothstep, wrap_degrees};
pub use noise::simplex::NoiseSource;
pub use render::cpu::{CpuSurface, FrameRgba};
pub use render::frame::{
    FrameContext, FramePlan, LayerShape, MorphEngine, RenderFrameInput, ShapeKind,
};
pub use render::surface::{DrawCommand, GradientStop, RadialFill, RecordingSurface, Surface};
pub use silhouette::builtin::{builtin_names, builtin_sources};
pub use silhouette::catalog::{
    CatalogBuilder, CatalogEntry, CatalogReport, SilhouetteCatalog, SkippedSource,
};
pub use silhouette::extract::{ExtractOptions, extract_profile};
pub use silhouette::measure::{ArcLengthMeasurer, PathMeasurer};
pub use silhouette::profile::{PROFILE_LEN, RadialProfile};
pub use silhouette::source::{SilhouetteSource, ViewBox};

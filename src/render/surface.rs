use kurbo::Point;

use crate::foundation::{
    core::{Canvas, Rgb8},
    error::MorphResult,
};

/// One color stop of a radial gradient, alpha as straight `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgb8,
    pub alpha: f32,
}

/// Radial gradient paint centered on `center`, fully transparent past `radius`
/// when the last stop is.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialFill {
    pub center: Point,
    pub radius: f64,
    pub stops: Vec<GradientStop>,
}

/// Caller-owned 2D raster target the engine draws onto.
pub trait Surface {
    fn canvas(&self) -> Canvas;

    /// Fill the whole surface with an opaque color.
    fn clear(&mut self, color: Rgb8) -> MorphResult<()>;

    /// Fill a closed polygon (implicitly closed from last vertex to first).
    fn fill_polygon(&mut self, polygon: &[Point], fill: &RadialFill) -> MorphResult<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb8),
    FillPolygon {
        polygon: Vec<Point>,
        fill: RadialFill,
    },
}

/// Surface that records draw commands instead of rasterizing.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas { width, height },
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Rgb8) -> MorphResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn fill_polygon(&mut self, polygon: &[Point], fill: &RadialFill) -> MorphResult<()> {
        self.commands.push(DrawCommand::FillPolygon {
            polygon: polygon.to_vec(),
            fill: fill.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

use kurbo::Point;

use crate::{
    foundation::{
        core::{Canvas, Rgb8},
        error::{MorphError, MorphResult},
    },
    render::surface::{RadialFill, Surface},
};

/// Rendered pixels, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRgba {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// `vello_cpu` raster surface. Draw calls accumulate until [`CpuSurface::finish`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| MorphError::render("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| MorphError::render("surface height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(MorphError::render("surface width/height must be > 0"));
        }
        Ok(Self {
            width: w,
            height: h,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Rasterize everything drawn since the last clear and read the pixels back.
    pub fn finish(&mut self) -> FrameRgba {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRgba {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    fn clear(&mut self, color: Rgb8) -> MorphResult<()> {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, 255));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        Ok(())
    }

    fn fill_polygon(&mut self, polygon: &[Point], fill: &RadialFill) -> MorphResult<()> {
        if polygon.len() < 3 {
            return Ok(());
        }
        if !fill.radius.is_finite() || fill.radius <= 0.0 {
            return Err(MorphError::render("gradient radius must be finite and > 0"));
        }

        let stops: Vec<(f32, vello_cpu::peniko::Color)> = fill
            .stops
            .iter()
            .map(|s| {
                let a = (s.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
                (
                    s.offset.clamp(0.0, 1.0),
                    vello_cpu::peniko::Color::from_rgba8(s.color.r, s.color.g, s.color.b, a),
                )
            })
            .collect();
        let gradient =
            vello_cpu::peniko::Gradient::new_radial(point_to_cpu(fill.center), fill.radius as f32)
                .with_stops(stops.as_slice());

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(gradient);
        self.ctx.fill_path(&polygon_to_cpu(polygon));
        Ok(())
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn polygon_to_cpu(polygon: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut pts = polygon.iter().copied().map(point_to_cpu);
    if let Some(first) = pts.next() {
        out.move_to(first);
        for p in pts {
            out.line_to(p);
        }
        out.close_path();
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

use anyhow::Context as _;
use kurbo::{BezPath, Point, Rect};

use crate::foundation::error::{MorphError, MorphResult};

/// Coordinate box the outline was authored in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn validate(&self) -> MorphResult<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.width <= 0.0 || self.height <= 0.0 {
            return Err(MorphError::invalid_source(format!(
                "viewBox {}x{} must have positive finite area",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half of the larger dimension; radii are normalized by this.
    pub fn half_extent(&self) -> f64 {
        self.width.max(self.height) * 0.5
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// A named vector outline waiting to be turned into a radial profile.
#[derive(Clone, Debug)]
pub struct SilhouetteSource {
    pub name: String,
    pub outline: BezPath,
    pub view_box: ViewBox,
}

impl SilhouetteSource {
    /// Parse SVG path data (`d` attribute syntax).
    pub fn from_path_data(
        name: impl Into<String>,
        d: &str,
        view_box: ViewBox,
    ) -> MorphResult<Self> {
        let name = name.into();
        if d.trim().is_empty() {
            return Err(MorphError::invalid_source(format!(
                "silhouette '{name}': path data must be non-empty"
            )));
        }
        let outline = BezPath::from_svg(d).map_err(|e| {
            MorphError::invalid_source(format!("silhouette '{name}': invalid path data: {e}"))
        })?;
        Ok(Self {
            name,
            outline,
            view_box,
        })
    }

    /// Parse a whole SVG document; every path node is merged into one outline
    /// with its absolute transform applied. The document size is the viewBox.
    pub fn from_svg(name: impl Into<String>, bytes: &[u8]) -> MorphResult<Self> {
        let name = name.into();
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts)
            .with_context(|| format!("parse svg for silhouette '{name}'"))
            .map_err(|e| MorphError::invalid_source(format!("{e:#}")))?;

        let size = tree.size();
        let view_box = ViewBox::new(
            0.0,
            0.0,
            f64::from(size.width()),
            f64::from(size.height()),
        );

        let mut outline = BezPath::new();
        append_group_paths(tree.root(), &mut outline);
        if outline.elements().is_empty() {
            return Err(MorphError::invalid_source(format!(
                "silhouette '{name}': svg contains no path geometry"
            )));
        }

        Ok(Self {
            name,
            outline,
            view_box,
        })
    }

    pub fn validate(&self) -> MorphResult<()> {
        self.view_box.validate().map_err(|e| {
            MorphError::invalid_source(format!("silhouette '{}': {e}", self.name))
        })?;
        if self.outline.elements().is_empty() {
            return Err(MorphError::invalid_source(format!(
                "silhouette '{}': outline is empty",
                self.name
            )));
        }
        Ok(())
    }
}

fn append_group_paths(group: &usvg::Group, out: &mut BezPath) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => append_group_paths(g.as_ref(), out),
            usvg::Node::Path(p) => append_path(p.as_ref(), out),
            _ => {}
        }
    }
}

fn append_path(path: &usvg::Path, out: &mut BezPath) {
    use usvg::tiny_skia_path::PathSegment;

    let ts = path.abs_transform();
    let map = |p: usvg::tiny_skia_path::Point| -> Point {
        let (x, y) = (f64::from(p.x), f64::from(p.y));
        Point::new(
            f64::from(ts.sx) * x + f64::from(ts.kx) * y + f64::from(ts.tx),
            f64::from(ts.ky) * x + f64::from(ts.sy) * y + f64::from(ts.ty),
        )
    };

    for seg in path.data().segments() {
        match seg {
            PathSegment::MoveTo(p) => out.move_to(map(p)),
            PathSegment::LineTo(p) => out.line_to(map(p)),
            PathSegment::QuadTo(p1, p2) => out.quad_to(map(p1), map(p2)),
            PathSegment::CubicTo(p1, p2, p3) => out.curve_to(map(p1), map(p2), map(p3)),
            PathSegment::Close => out.close_path(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/source.rs"]
mod tests;

use crate::foundation::error::{MeshError, MeshResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Solid background painted under every shape.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Background {
    /// Hex or CSS color.
    pub color: String,
}

/// Logical drawing area. Shape coordinates are expressed in these units.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Logical width, > 0.
    pub width: u32,
    /// Logical height, > 0.
    pub height: u32,
    /// Background fill.
    pub background: Background,
}

impl Canvas {
    /// Create a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32, background: impl Into<String>) -> MeshResult<Self> {
        let canvas = Self {
            width,
            height,
            background: Background {
                color: background.into(),
            },
        };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Check that both dimensions are positive.
    pub fn validate(&self) -> MeshResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MeshError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Canvas rectangle in logical units.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Logical size as a [`Size`].
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// Pixel dimensions of an output image or surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size without validation.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Arithmetic mean of `points`. Returns the origin for an empty slice.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Axis-aligned bounds of `points`, or `None` for an empty slice.
pub fn point_bounds(points: &[Point]) -> Option<Rect> {
    let (first, rest) = points.split_first()?;
    Some(
        rest.iter()
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

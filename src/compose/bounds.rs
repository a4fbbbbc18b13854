use crate::{
    foundation::core::{Affine, Rect, point_bounds},
    scene::model::{SceneDocument, Shape},
};

/// Smallest outward margin added around the filter region.
pub const MIN_FILTER_MARGIN: f64 = 64.0;

/// Render-time transform for a shape: its rotation hint about the stored center.
pub fn shape_transform(shape: &Shape) -> Affine {
    match shape.rotation {
        Some(deg) if deg.is_finite() && deg != 0.0 => {
            Affine::rotate_about(deg.to_radians(), shape.center)
        }
        _ => Affine::IDENTITY,
    }
}

/// Largest blur any shape renders with, including the global setting.
pub fn max_effective_blur(doc: &SceneDocument) -> f64 {
    doc.shapes
        .iter()
        .map(|s| s.effective_blur(&doc.filters))
        .fold(doc.filters.effective_blur(), f64::max)
}

/// Region blur and grain filters operate on, in canvas logical units.
///
/// Union of the canvas and every raw shape outline, grown by `max(2 * blur, 64)` on all sides so
/// blurred edges are never clipped. Filters are resolved in the user space of the element that
/// references them, which for a rotated path is the space before its `rotate(..)`. Rotation is
/// not applied here.
pub fn filter_region(doc: &SceneDocument) -> Rect {
    let margin = (max_effective_blur(doc) * 2.0).max(MIN_FILTER_MARGIN);
    let region = doc
        .shapes
        .iter()
        .filter_map(|shape| point_bounds(&shape.points))
        .fold(doc.canvas.rect(), |acc, r| acc.union(r));
    region.inflate(margin, margin)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/bounds.rs"]
mod tests;

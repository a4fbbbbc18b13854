use std::collections::HashSet;

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Point, centroid},
    foundation::error::{MeshError, MeshResult},
    scene::color::{PaletteColor, Rgba8},
};

/// Upper bound for global and per-shape blur.
pub const MAX_BLUR: f64 = 256.0;
/// Accepted range for [`Filters::spread`].
pub const SPREAD_RANGE: (f64, f64) = (50.0, 150.0);

/// One organic filled polygon in the mesh.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Stable identifier, unique within a document.
    pub id: String,
    /// Closed outline, at least 3 points, in canvas logical units.
    pub points: Vec<Point>,
    /// Stored centroid of `points`. Every mutator keeps it in sync.
    pub center: Point,
    /// Index into the document palette.
    pub fill_index: usize,
    /// Per-shape opacity override, `0..=100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Per-shape blur override, `0..=256`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    /// Render-time rotation in degrees about `center`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Shape {
    /// Build a shape from its outline; `center` is derived from `points`.
    pub fn new(id: impl Into<String>, points: Vec<Point>, fill_index: usize) -> MeshResult<Self> {
        let id = id.into();
        validate_points(&id, &points)?;
        Ok(Self {
            center: centroid(&points),
            id,
            points,
            fill_index,
            opacity: None,
            blur: None,
            rotation: None,
        })
    }

    /// Recompute and store the centroid after the outline moved.
    pub fn recompute_center(&mut self) {
        self.center = centroid(&self.points);
    }

    /// Opacity used at render time, in `0..=1`.
    pub fn effective_opacity(&self, filters: &Filters) -> f64 {
        self.opacity.unwrap_or(filters.opacity).clamp(0.0, 100.0) / 100.0
    }

    /// Blur radius used at render time, clamped to `0..=256`.
    pub fn effective_blur(&self, filters: &Filters) -> f64 {
        clamp_blur(self.blur.unwrap_or(filters.blur))
    }
}

fn clamp_blur(b: f64) -> f64 {
    if b.is_finite() { b.clamp(0.0, MAX_BLUR) } else { 0.0 }
}

fn validate_points(id: &str, points: &[Point]) -> MeshResult<()> {
    if points.len() < 3 {
        return Err(MeshError::validation(format!(
            "shape '{id}' needs at least 3 points, got {}",
            points.len()
        )));
    }
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(MeshError::validation(format!(
            "shape '{id}' has non-finite points"
        )));
    }
    Ok(())
}

/// Global filter settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Gaussian blur radius, `0..=256`.
    pub blur: f64,
    /// Whether the grain overlay is drawn.
    pub grain_enabled: bool,
    /// Grain overlay strength, `0..=100`.
    pub grain: f64,
    /// Shape fill opacity, `0..=100`.
    pub opacity: f64,
    /// Blob radius scale, `50..=150`. Only read when shapes are generated.
    pub spread: f64,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            blur: 96.0,
            grain_enabled: false,
            grain: 20.0,
            opacity: 100.0,
            spread: 100.0,
        }
    }
}

impl Filters {
    /// Global blur clamped to `0..=256`.
    pub fn effective_blur(&self) -> f64 {
        clamp_blur(self.blur)
    }

    /// Check every value lies in its documented range.
    pub fn validate(&self) -> MeshResult<()> {
        fn in_range(name: &str, v: f64, lo: f64, hi: f64) -> MeshResult<()> {
            if !(lo..=hi).contains(&v) {
                return Err(MeshError::validation(format!(
                    "filter {name} must be in {lo}..={hi}, got {v}"
                )));
            }
            Ok(())
        }
        in_range("blur", self.blur, 0.0, MAX_BLUR)?;
        in_range("grain", self.grain, 0.0, 100.0)?;
        in_range("opacity", self.opacity, 0.0, 100.0)?;
        in_range("spread", self.spread, SPREAD_RANGE.0, SPREAD_RANGE.1)?;
        Ok(())
    }
}

/// Full in-memory description of one gradient.
///
/// This is the unit of history snapshots, of JSON share-links and of composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDocument {
    /// Logical canvas.
    pub canvas: Canvas,
    /// Ordered palette.
    pub palette: Vec<PaletteColor>,
    /// Shapes in paint order.
    pub shapes: Vec<Shape>,
    /// Global filters.
    pub filters: Filters,
}

impl SceneDocument {
    /// Document with no shapes yet.
    pub fn new(canvas: Canvas, palette: Vec<PaletteColor>, filters: Filters) -> MeshResult<Self> {
        let doc = Self {
            canvas,
            palette,
            shapes: Vec::new(),
            filters,
        };
        doc.validate()?;
        Ok(doc)
    }

    /// Structural validation used on construction and on JSON load.
    ///
    /// A `fill_index` past the palette end is accepted; composition clamps it.
    pub fn validate(&self) -> MeshResult<()> {
        self.canvas.validate()?;
        Rgba8::parse(&self.canvas.background.color)?;
        self.filters.validate()?;

        let mut ids = HashSet::new();
        for c in &self.palette {
            if !ids.insert(c.id.as_str()) {
                return Err(MeshError::validation(format!(
                    "duplicate palette color id '{}'",
                    c.id
                )));
            }
            Rgba8::parse(&c.value)?;
        }

        let mut ids = HashSet::new();
        for s in &self.shapes {
            if !ids.insert(s.id.as_str()) {
                return Err(MeshError::validation(format!(
                    "duplicate shape id '{}'",
                    s.id
                )));
            }
            validate_points(&s.id, &s.points)?;
            if let Some(o) = s.opacity
                && !(0.0..=100.0).contains(&o)
            {
                return Err(MeshError::validation(format!(
                    "shape '{}' opacity must be in 0..=100",
                    s.id
                )));
            }
            if let Some(b) = s.blur
                && !(0.0..=MAX_BLUR).contains(&b)
            {
                return Err(MeshError::validation(format!(
                    "shape '{}' blur must be in 0..=256",
                    s.id
                )));
            }
        }
        Ok(())
    }

    /// Look up a shape by id.
    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub(crate) fn shape_mut(&mut self, id: &str) -> MeshResult<&mut Shape> {
        self.shapes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| MeshError::UnknownShape(id.to_string()))
    }

    /// Palette color a shape renders with, clamping stale indices.
    ///
    /// Returns `None` only when the palette is empty.
    pub fn fill_for(&self, shape: &Shape) -> Option<&PaletteColor> {
        let last = self.palette.len().checked_sub(1)?;
        self.palette.get(shape.fill_index.min(last))
    }

    /// Serialize as compact JSON.
    pub fn to_json(&self) -> MeshResult<String> {
        serde_json::to_string(self).map_err(|e| MeshError::serde(e.to_string()))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> MeshResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MeshError::serde(e.to_string()))
    }

    /// Parse and validate a JSON snapshot.
    ///
    /// Stored centers are recomputed from the points, so a hand-edited snapshot cannot pivot
    /// rotation or drags on a stale center.
    pub fn from_json(s: &str) -> MeshResult<Self> {
        let mut doc: Self = serde_json::from_str(s)
            .context("parse scene JSON")
            .map_err(|e| MeshError::serde(format!("{e:#}")))?;
        doc.validate()?;
        for shape in &mut doc.shapes {
            shape.recompute_center();
        }
        Ok(doc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

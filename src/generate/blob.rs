use std::f64::consts::TAU;

use crate::{
    foundation::core::{Point, Vec2},
    foundation::rng::{RandomSource, shuffle},
    scene::model::Shape,
};

/// Fewest seed points a mesh can be built from.
pub const MIN_MESH_POINTS: usize = 3;

/// Blob outline configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobOpts {
    /// Base radius band, times `min(width, height)`.
    pub radius_range: (f64, f64),
    /// Extra radius gain applied on top of `spread / 100`.
    pub spread_gain: f64,
    /// Inclusive band for the number of outline points.
    pub vertex_range: (usize, usize),
    /// Band for the per-blob elongation factor.
    pub elongation_range: (f64, f64),
    /// Amplitude of the `cos(2(θ - axis))` stretch.
    pub elongation_amp: f64,
    /// Amplitude of the `sin(3.7θ) + cos(5.3θ)` wobble.
    pub noise_amp: f64,
    /// Per-vertex radius jitter band.
    pub jitter_range: (f64, f64),
}

impl Default for BlobOpts {
    fn default() -> Self {
        Self {
            radius_range: (0.29, 0.33),
            spread_gain: 1.25,
            vertex_range: (10, 15),
            elongation_range: (0.7, 1.2),
            elongation_amp: 0.3,
            noise_amp: 0.08,
            jitter_range: (0.85, 1.10),
        }
    }
}

/// Turn seed points into blob shapes with the default options.
pub fn synthesize_shapes(
    points: &[Point],
    width: u32,
    height: u32,
    num_colors: usize,
    spread: f64,
    rng: &mut dyn RandomSource,
) -> Vec<Shape> {
    synthesize_shapes_with(
        points,
        width,
        height,
        num_colors,
        spread,
        &BlobOpts::default(),
        rng,
    )
}

/// Turn seed points into blob shapes, one per point.
///
/// Fewer than [`MIN_MESH_POINTS`] seeds yields no shapes. Outlines are not clamped to the canvas.
#[tracing::instrument(skip(points, opts, rng), fields(points = points.len()))]
pub fn synthesize_shapes_with(
    points: &[Point],
    width: u32,
    height: u32,
    num_colors: usize,
    spread: f64,
    opts: &BlobOpts,
    rng: &mut dyn RandomSource,
) -> Vec<Shape> {
    if points.len() < MIN_MESH_POINTS {
        tracing::warn!(
            points = points.len(),
            "not enough seed points for a mesh, producing no shapes"
        );
        return Vec::new();
    }

    let fills = assign_colors(points.len(), num_colors, rng);
    let min_side = f64::from(width.min(height));
    let spread = if spread.is_finite() { spread } else { 100.0 };

    points
        .iter()
        .zip(fills)
        .enumerate()
        .filter_map(|(i, (&seed, fill))| {
            let outline = blob_outline(seed, min_side, spread, opts, rng);
            match Shape::new(format!("shape-{i}"), outline, fill) {
                Ok(shape) => Some(shape),
                Err(err) => {
                    tracing::warn!(%err, "skipping malformed blob");
                    None
                }
            }
        })
        .collect()
}

/// Palette index for each of `n` shapes.
///
/// Every color in `0..num_colors` appears once before any repeats; extra slots go to the least
/// used color (ties broken at random); the whole list is then shuffled. When `n < num_colors`
/// the shuffled list is truncated and some colors go unused.
pub fn assign_colors(n: usize, num_colors: usize, rng: &mut dyn RandomSource) -> Vec<usize> {
    if num_colors == 0 {
        return vec![0; n];
    }

    let mut slots: Vec<usize> = (0..num_colors).collect();
    let mut usage = vec![1usize; num_colors];
    for _ in num_colors..n {
        let least = usage.iter().copied().min().unwrap_or(0);
        let tied: Vec<usize> = (0..num_colors).filter(|&c| usage[c] == least).collect();
        let pick = tied[rng.index(tied.len())];
        usage[pick] += 1;
        slots.push(pick);
    }

    shuffle(&mut slots, rng);
    slots.truncate(n);
    slots
}

fn blob_outline(
    center: Point,
    min_side: f64,
    spread: f64,
    opts: &BlobOpts,
    rng: &mut dyn RandomSource,
) -> Vec<Point> {
    let axis = rng.range_f64(0.0, TAU);
    let elongation = rng.range_f64(opts.elongation_range.0, opts.elongation_range.1);
    let base = min_side * rng.range_f64(opts.radius_range.0, opts.radius_range.1);
    let max_radius = base * (spread / 100.0) * opts.spread_gain;
    let n = rng.range_inclusive(opts.vertex_range.0, opts.vertex_range.1);

    (0..n)
        .map(|j| {
            let theta = j as f64 / n as f64 * TAU;
            let stretch = opts.elongation_amp * elongation * (2.0 * (theta - axis)).cos();
            let wobble = opts.noise_amp * ((3.7 * theta).sin() + (5.3 * theta).cos());
            let jitter = rng.range_f64(opts.jitter_range.0, opts.jitter_range.1);
            let r = max_radius * (1.0 + stretch) * (1.0 + wobble) * jitter;
            center + Vec2::from_angle(theta) * r
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/generate/blob.rs"]
mod tests;

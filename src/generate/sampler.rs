use crate::foundation::{core::Point, rng::RandomSource};

/// Point sampler configuration. Distances are fractions of the canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerOpts {
    /// Lower bound on the target point count.
    pub min_points: usize,
    /// Target points per palette color.
    pub points_per_color: f64,
    /// Share of the target sampled with the inside (tighter) separation.
    pub inside_fraction: f64,
    /// Inside-tier minimum separation, times `max(width, height)`.
    pub inside_min_dist: f64,
    /// Outside-tier minimum separation, times `max(width, height)`.
    pub outside_min_dist: f64,
    /// Placement inset from every edge, times `min(width, height)`.
    pub edge_margin: f64,
    /// Rejection attempts per point before it is dropped.
    pub max_attempts: usize,
}

impl Default for SamplerOpts {
    fn default() -> Self {
        Self {
            min_points: 9,
            points_per_color: 1.7,
            inside_fraction: 0.6,
            inside_min_dist: 0.27,
            outside_min_dist: 0.52,
            edge_margin: 0.05,
            max_attempts: 300,
        }
    }
}

impl SamplerOpts {
    /// Number of points the sampler aims for: `max(floor(n * 1.7), 9)`.
    pub fn target_count(&self, num_colors: usize) -> usize {
        ((num_colors as f64 * self.points_per_color).floor() as usize).max(self.min_points)
    }
}

/// Separation tier a seed point was accepted under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    /// Tighter minimum distance.
    Inside,
    /// Looser minimum distance.
    Outside,
}

/// An accepted seed point with the tier it was tested against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedPoint {
    /// Location in canvas logical units.
    pub point: Point,
    /// Tier whose minimum distance this point satisfies against every earlier point.
    pub tier: Tier,
    /// Minimum distance, in logical units, this point was checked with.
    pub min_dist: f64,
}

/// Scatter seed points over the canvas with the default options.
///
/// The result may be shorter than the target when points cannot be placed.
pub fn sample_points(
    width: u32,
    height: u32,
    num_colors: usize,
    spread: f64,
    rng: &mut dyn RandomSource,
) -> Vec<Point> {
    sample_seed_points(
        width,
        height,
        num_colors,
        spread,
        &SamplerOpts::default(),
        rng,
    )
    .into_iter()
    .map(|s| s.point)
    .collect()
}

/// Scatter seed points, keeping the tier each one was accepted under.
///
/// Separation distances scale with `spread / 100` so wider blobs get sparser seeds.
#[tracing::instrument(skip(opts, rng))]
pub fn sample_seed_points(
    width: u32,
    height: u32,
    num_colors: usize,
    spread: f64,
    opts: &SamplerOpts,
    rng: &mut dyn RandomSource,
) -> Vec<SeedPoint> {
    let (w, h) = (f64::from(width), f64::from(height));
    let size = w.max(h);
    let margin = w.min(h) * opts.edge_margin;
    let spread_scale = if spread.is_finite() && spread > 0.0 {
        spread / 100.0
    } else {
        1.0
    };

    let target = opts.target_count(num_colors);
    let inside = ((target as f64) * opts.inside_fraction).round() as usize;

    let mut accepted: Vec<SeedPoint> = Vec::with_capacity(target);
    for i in 0..target {
        let (tier, factor) = if i < inside {
            (Tier::Inside, opts.inside_min_dist)
        } else {
            (Tier::Outside, opts.outside_min_dist)
        };
        let min_dist = size * factor * spread_scale;

        let placed = (0..opts.max_attempts).find_map(|_| {
            let p = Point::new(
                rng.range_f64(margin, w - margin),
                rng.range_f64(margin, h - margin),
            );
            accepted
                .iter()
                .all(|s| s.point.distance(p) >= min_dist)
                .then_some(p)
        });

        match placed {
            Some(point) => accepted.push(SeedPoint {
                point,
                tier,
                min_dist,
            }),
            None => tracing::trace!(index = i, ?tier, "seed point dropped after max attempts"),
        }
    }

    tracing::debug!(target, placed = accepted.len(), "sampled seed points");
    accepted
}

#[cfg(test)]
#[path = "../../tests/unit/generate/sampler.rs"]
mod tests;

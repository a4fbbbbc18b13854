//! Procedural mesh generation: seed points, then one organic blob per seed.

pub(crate) mod blob;
pub(crate) mod sampler;

use crate::{foundation::rng::RandomSource, scene::model::Shape};

/// Sample seed points and synthesize a full shape list for a palette of `num_colors`.
///
/// Returns an empty list when fewer than three seeds could be placed; the document then renders
/// only its background.
#[tracing::instrument(skip(rng))]
pub fn generate_shapes(
    width: u32,
    height: u32,
    num_colors: usize,
    spread: f64,
    rng: &mut dyn RandomSource,
) -> Vec<Shape> {
    let points = sampler::sample_points(width, height, num_colors, spread, rng);
    blob::synthesize_shapes(&points, width, height, num_colors, spread, rng)
}

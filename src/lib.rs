//! meshgrad generates organic mesh gradients.
//!
//! A mesh is built in four steps:
//!
//! - Scatter seed points across a canvas ([`sample_points`])
//! - Grow one irregular blob per seed, colored from a palette ([`synthesize_shapes`])
//! - Edit the resulting [`SceneDocument`] in place (drag centers, vertices, overrides)
//! - Compose it to SVG ([`compose`]) and rasterize through a [`RasterBridge`]
//!
//! Every stochastic step takes an injectable [`RandomSource`]; composition and rasterization are
//! deterministic for a given document. [`Editor`] wraps a document with undo/redo history.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod editor;
mod foundation;
mod generate;
mod raster;
mod scene;

pub use crate::compose::bounds::{filter_region, max_effective_blur, shape_transform};
pub use crate::compose::svg::{ComposeOpts, compose, compose_with};
pub use crate::editor::{Editor, EditorOpts};
pub use crate::foundation::core::{
    Affine, Background, Canvas, Point, Rect, Size, Vec2, centroid, point_bounds,
};
pub use crate::foundation::error::{MeshError, MeshResult};
pub use crate::foundation::rng::{RandomSource, Rng64, shuffle};
pub use crate::generate::blob::{
    BlobOpts, MIN_MESH_POINTS, assign_colors, synthesize_shapes, synthesize_shapes_with,
};
pub use crate::generate::generate_shapes;
pub use crate::generate::sampler::{
    SamplerOpts, SeedPoint, Tier, sample_points, sample_seed_points,
};
pub use crate::raster::bridge::{PreviewOutcome, RasterBridge, RasterOpts};
pub use crate::raster::encode::{ExportFormat, encode_surface};
pub use crate::raster::surface::Surface;
pub use crate::scene::color::{PaletteColor, Rgba8};
pub use crate::scene::edit::{RANDOMIZE_MARGIN, RANDOMIZE_MAX_OFFSET, randomize_shapes};
pub use crate::scene::model::{Filters, MAX_BLUR, SPREAD_RANGE, SceneDocument, Shape};
pub use crate::scene::presets::{DEFAULT_COLORS, Preset, builtin as builtin_presets};

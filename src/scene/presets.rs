use crate::{
    foundation::core::Canvas,
    foundation::error::{MeshError, MeshResult},
    foundation::rng::RandomSource,
    scene::color::PaletteColor,
    scene::model::{Filters, SceneDocument},
};

/// Colors used when a palette grows past its explicit entries.
pub const DEFAULT_COLORS: &[&str] = &[
    "#ff6b6b", "#feca57", "#48dbfb", "#ff9ff3", "#1dd1a1", "#5f27cd", "#54a0ff", "#ee5253",
];

/// A named starting point: canvas size, background and palette.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    /// Lookup name.
    pub name: &'static str,
    /// Canvas width in logical units.
    pub width: u32,
    /// Canvas height in logical units.
    pub height: u32,
    /// Background color.
    pub background: &'static str,
    /// Palette values in order.
    pub colors: &'static [&'static str],
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "sunset",
        width: 1920,
        height: 1080,
        background: "#1b1035",
        colors: &["#ff7e5f", "#feb47b", "#ff5e62", "#6a3093", "#f9d423"],
    },
    Preset {
        name: "ocean",
        width: 1920,
        height: 1080,
        background: "#021b2e",
        colors: &["#00c6ff", "#0072ff", "#3a7bd5", "#00d2ff"],
    },
    Preset {
        name: "aurora",
        width: 1280,
        height: 720,
        background: "#050a18",
        colors: &["#43e97b", "#38f9d7", "#a18cd1", "#fbc2eb", "#667eea", "#30cfd0"],
    },
    Preset {
        name: "square-pastel",
        width: 1080,
        height: 1080,
        background: "#fdf6f0",
        colors: &["#ffd1dc", "#c1e1c1", "#aec6cf", "#fdfd96"],
    },
];

/// Built-in presets, in display order.
pub fn builtin() -> &'static [Preset] {
    PRESETS
}

impl Preset {
    /// Look up a built-in preset by name.
    pub fn find(name: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.name == name)
    }

    /// Palette entries with stable ids (`color-0`, `color-1`, ...).
    pub fn palette(&self) -> Vec<PaletteColor> {
        self.colors
            .iter()
            .enumerate()
            .map(|(i, v)| PaletteColor::new(format!("color-{i}"), *v))
            .collect()
    }
}

impl SceneDocument {
    /// Create a document from a built-in preset and generate its shapes.
    pub fn from_preset(name: &str, rng: &mut dyn RandomSource) -> MeshResult<Self> {
        let preset = Preset::find(name)
            .ok_or_else(|| MeshError::validation(format!("unknown preset '{name}'")))?;
        let canvas = Canvas::new(preset.width, preset.height, preset.background)?;
        let mut doc = Self::new(canvas, preset.palette(), Filters::default())?;
        doc.regenerate(rng);
        Ok(doc)
    }
}

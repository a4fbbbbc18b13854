pub(crate) mod color;
pub(crate) mod edit;
pub(crate) mod model;
pub(crate) mod presets;

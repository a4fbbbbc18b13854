pub(crate) mod bounds;
pub(crate) mod svg;

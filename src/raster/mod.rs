pub(crate) mod bridge;
pub(crate) mod encode;
pub(crate) mod surface;

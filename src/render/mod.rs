//! Counter frame rendering.

/// Frame renderer and PNG sequence output.
pub(crate) mod frames;
/// CPU glyph rasterization.
pub(crate) mod raster;

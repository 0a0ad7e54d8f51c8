//! Frame sinks and the GIF assembler.

/// Animated GIF output.
pub(crate) mod gif;
/// Palette quantization with a reserved transparent slot.
pub(crate) mod palette;
/// Frame sink trait and built-in sinks.
pub(crate) mod sink;

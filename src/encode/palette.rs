use image::RgbaImage;

use crate::foundation::error::{CounterError, CounterResult};

/// Palette slot reserved for fully transparent pixels.
pub const TRANSPARENT_INDEX: u8 = 255;

/// Colors available to the quantizer once the transparent slot is reserved.
pub const MAX_OPAQUE_COLORS: usize = 255;

/// Default NeuQuant sampling factor (1 = best quality, 30 = fastest).
pub const DEFAULT_SAMPLE_FACTOR: i32 = 10;

/// A frame reduced to palette indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// 256 RGB triplets; entry [`TRANSPARENT_INDEX`] is black and only used for transparency.
    pub palette: Vec<u8>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    /// Number of pixels mapped to [`TRANSPARENT_INDEX`].
    pub fn transparent_pixels(&self) -> usize {
        self.indices
            .iter()
            .filter(|&&i| i == TRANSPARENT_INDEX)
            .count()
    }
}

/// Quantize a straight-alpha RGBA frame to at most [`MAX_OPAQUE_COLORS`] colors plus one
/// transparent slot.
///
/// Transparency is a hard threshold: only alpha 0 maps to [`TRANSPARENT_INDEX`]. Partially
/// transparent antialiased edges become opaque palette colors, which gives glyph outlines a
/// jagged rim in the final GIF.
pub fn quantize_with_transparency(
    frame: &RgbaImage,
    sample_factor: i32,
) -> CounterResult<IndexedFrame> {
    let width: u16 = frame
        .width()
        .try_into()
        .map_err(|_| CounterError::validation("frame width exceeds u16"))?;
    let height: u16 = frame
        .height()
        .try_into()
        .map_err(|_| CounterError::validation("frame height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(CounterError::validation("frame width/height must be non-zero"));
    }

    let transparent: Vec<bool> = frame.pixels().map(|p| p.0[3] == 0).collect();

    // Drop alpha; NeuQuant still wants four bytes per pixel.
    let mut flattened = Vec::with_capacity(frame.as_raw().len());
    for p in frame.pixels() {
        flattened.extend_from_slice(&[p.0[0], p.0[1], p.0[2], 255]);
    }

    let nq = color_quant::NeuQuant::new(sample_factor.clamp(1, 30), MAX_OPAQUE_COLORS, &flattened);

    let mut palette = nq.color_map_rgb();
    palette.resize(256 * 3, 0);

    let mut indices = Vec::with_capacity(transparent.len());
    for (px, &clear) in flattened.chunks_exact(4).zip(&transparent) {
        if clear {
            indices.push(TRANSPARENT_INDEX);
        } else {
            indices.push(nq.index_of(px) as u8);
        }
    }

    Ok(IndexedFrame {
        width,
        height,
        palette,
        indices,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/palette.rs"]
mod tests;

use crate::foundation::error::{CounterError, CounterResult};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed 1280x720 canvas every counter frame is rendered on.
    pub const HD_720: Canvas = Canvas {
        width: 1280,
        height: 720,
    };

    /// Width and height as `u16`, the limit shared by the rasterizer and the GIF format.
    pub fn dims_u16(self) -> CounterResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| CounterError::validation("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| CounterError::validation("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(CounterError::validation("canvas width/height must be non-zero"));
        }
        Ok((w, h))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::HD_720
    }
}

/// Zero-based frame index within a rendered sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// File name of this frame inside a frame directory, e.g. `frame_0007.png`.
    pub fn file_name(self) -> String {
        format!("frame_{:04}.png", self.0)
    }
}

/// Straight-alpha RGBA8 color. Doubles as the Parley text brush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Solid green (0, 255, 0) at full opacity.
    pub const GREEN: Rgba8 = Rgba8 {
        r: 0,
        g: 255,
        b: 0,
        a: 255,
    };

    /// Channels as an array, in RGBA order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::RgbaImage;

pub fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "salary_counter_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A TrueType font to render with, from `SALARY_COUNTER_TEST_FONT` or a common system path.
pub fn test_font() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os("SALARY_COUNTER_TEST_FONT").map(PathBuf::from)
        && p.is_file()
    {
        return Some(p);
    }
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Transparent frame with an opaque green block at column `offset` and a faint rim pixel.
pub fn synthetic_frame(width: u32, height: u32, offset: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    for x in offset..(offset + 4).min(width) {
        for y in 2..6.min(height) {
            img.put_pixel(x, y, image::Rgba([0, 255, 0, 255]));
        }
    }
    if offset > 0 {
        img.put_pixel(offset - 1, 2, image::Rgba([0, 255, 0, 40]));
    }
    img
}

pub fn write_png(path: &Path, img: &RgbaImage) {
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

pub fn green_opaque_pixels(img: &RgbaImage) -> usize {
    img.pixels().filter(|p| p.0 == [0, 255, 0, 255]).count()
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of all pixels with non-zero alpha.
pub fn ink_box(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in img.enumerate_pixels() {
        if p.0[3] == 0 {
            continue;
        }
        bbox = Some(match bbox {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bbox
}

#[derive(Debug)]
pub struct DecodedFrame {
    pub transparent: Option<u8>,
    pub dispose: gif::DisposalMethod,
    pub delay: u16,
    pub indices: Vec<u8>,
    pub has_local_palette: bool,
}

#[derive(Debug)]
pub struct DecodedGif {
    pub width: u16,
    pub height: u16,
    pub repeat: gif::Repeat,
    pub has_global_palette: bool,
    pub frames: Vec<DecodedFrame>,
}

pub fn decode_gif(path: &Path) -> DecodedGif {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let file = std::fs::File::open(path).unwrap();
    let mut decoder = opts.read_info(file).unwrap();

    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        frames.push(DecodedFrame {
            transparent: frame.transparent,
            dispose: frame.dispose,
            delay: frame.delay,
            indices: frame.buffer.to_vec(),
            has_local_palette: frame.palette.is_some(),
        });
    }

    DecodedGif {
        width: decoder.width(),
        height: decoder.height(),
        repeat: decoder.repeat(),
        has_global_palette: decoder.global_palette().is_some(),
        frames,
    }
}

//! A salary counter renderer.
//!
//! Given an annual amount and timing parameters, the crate renders a sequence of transparent
//! 1280x720 frames showing the amount accrued so far as centered green currency text, then
//! assembles those frames into an infinitely looping animated GIF.
//!
//! # Pipeline overview
//!
//! 1. **Schedule**: `RenderRequest -> AccrualSchedule` (frame count and per-frame value)
//! 2. **Render**: `AccrualSchedule + font -> RgbaImage` per frame (Parley shaping, CPU raster)
//! 3. **Hand-off**: frames go to a [`FrameSink`], by default `frame_NNNN.png` files on disk
//! 4. **Assemble**: PNG frames -> palette-quantized GIF with a reserved transparent index
//!
//! The pipeline is single-threaded and blocking. Each call owns its output directory and GIF
//! path for its duration; concurrent calls targeting the same paths must be serialized by the
//! caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod accrual;
mod encode;
mod foundation;
mod pipeline;
mod render;
mod request;
mod text;

pub use accrual::currency::format_currency;
pub use accrual::schedule::{AccrualSchedule, SECONDS_PER_YEAR};
pub use encode::gif::{
    DEFAULT_DELAY_MS, DEFAULT_GIF_PATH, GifAsset, GifOptions, GifSink, assemble_gif, encode_gif,
    list_frame_files,
};
pub use encode::palette::{
    DEFAULT_SAMPLE_FACTOR, IndexedFrame, MAX_OPAQUE_COLORS, TRANSPARENT_INDEX,
    quantize_with_transparency,
};
pub use encode::sink::{
    FrameSink, InMemorySink, PngSequenceSink, SinkConfig, ensure_parent_dir,
};
pub use foundation::core::{Canvas, FrameIndex, Rgba8};
pub use foundation::error::{CounterError, CounterResult};
pub use pipeline::{render_gif_direct, run_pipeline};
pub use render::frames::{
    FONT_SIZE_PX, FrameRenderer, TEXT_COLOR, render_frames, render_frames_into,
};
pub use render::raster::{TextRasterizer, centered_origin};
pub use request::form::{
    DEFAULT_ANNUAL_AMOUNT, DEFAULT_DURATION_SECONDS, DEFAULT_FONT_PATH, DEFAULT_FPS,
    DEFAULT_OUTPUT_DIRECTORY, RenderRequest,
};
pub use text::layout::{TextExtent, TextLayoutEngine};

use std::path::Path;

use image::RgbaImage;

use crate::{
    accrual::{currency::format_currency, schedule::AccrualSchedule},
    encode::sink::{FrameSink, PngSequenceSink, SinkConfig},
    foundation::{
        core::{Canvas, Rgba8},
        error::CounterResult,
    },
    render::raster::TextRasterizer,
    request::form::RenderRequest,
    text::layout::TextLayoutEngine,
};

/// Counter text size in pixels.
pub const FONT_SIZE_PX: f32 = 80.0;

/// Counter text color.
pub const TEXT_COLOR: Rgba8 = Rgba8::GREEN;

/// Renders counter values as centered green text on a transparent canvas.
pub struct FrameRenderer {
    engine: TextLayoutEngine,
    rasterizer: TextRasterizer,
}

impl FrameRenderer {
    /// Load the font at `font_path` and bind to the fixed 1280x720 canvas.
    pub fn new(font_path: &Path) -> CounterResult<Self> {
        Self::with_engine(TextLayoutEngine::from_font_file(font_path)?, Canvas::HD_720)
    }

    /// Build from an already-registered font on an arbitrary canvas.
    pub fn with_engine(engine: TextLayoutEngine, canvas: Canvas) -> CounterResult<Self> {
        let rasterizer = TextRasterizer::new(canvas)?;
        Ok(Self { engine, rasterizer })
    }

    /// Canvas every frame is drawn on.
    pub fn canvas(&self) -> Canvas {
        self.rasterizer.canvas()
    }

    /// Family name of the loaded font.
    pub fn font_family(&self) -> &str {
        self.engine.family_name()
    }

    /// Rasterize arbitrary text with the counter styling.
    pub fn render_text(&mut self, text: &str) -> CounterResult<RgbaImage> {
        let layout = self.engine.layout_plain(text, FONT_SIZE_PX, TEXT_COLOR)?;
        self.rasterizer.draw_centered(&layout)
    }

    /// Rasterize `value` formatted as currency.
    pub fn render_image(&mut self, value: f64) -> CounterResult<RgbaImage> {
        self.render_text(&format_currency(value))
    }
}

/// Render every frame of `schedule` and push it into `sink`. Returns the number of frames.
///
/// The sink is not touched when the schedule has no frames.
pub fn render_frames_into(
    schedule: &AccrualSchedule,
    renderer: &mut FrameRenderer,
    sink: &mut dyn FrameSink,
) -> CounterResult<u64> {
    let total = schedule.total_frames();
    if total == 0 {
        return Ok(0);
    }

    sink.begin(SinkConfig {
        canvas: renderer.canvas(),
        expected_frames: Some(total),
    })?;
    for (idx, value) in schedule.frames() {
        let frame = renderer.render_image(value)?;
        sink.push_frame(idx, &frame)?;
    }
    sink.end()?;
    Ok(total)
}

/// Render the request's counter as `frame_NNNN.png` files in its output directory.
///
/// Returns the number of frames written. With zero frames nothing is loaded or written. The
/// font is loaded before the output directory is created, so a [`FontLoad`] failure leaves
/// the filesystem untouched.
///
/// [`FontLoad`]: crate::CounterError::FontLoad
#[tracing::instrument(
    skip(request),
    fields(
        annual_amount = request.annual_amount,
        duration_seconds = request.duration_seconds,
        fps = request.fps,
        out_dir = %request.output_directory.display(),
    )
)]
pub fn render_frames(request: &RenderRequest) -> CounterResult<u64> {
    let schedule = request.schedule();
    if schedule.total_frames() == 0 {
        tracing::info!("duration * fps is below one frame; nothing to render");
        return Ok(0);
    }

    let mut renderer = FrameRenderer::new(&request.font_path)?;
    tracing::debug!(family = renderer.font_family(), "font loaded");

    let mut sink = PngSequenceSink::new(&request.output_directory);
    let total = render_frames_into(&schedule, &mut renderer, &mut sink)?;

    tracing::info!(
        frames = total,
        dir = %request.output_directory.display(),
        "saved transparent PNG frames"
    );
    Ok(total)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frames.rs"]
mod tests;

use std::path::Path;

use crate::{
    encode::gif::{GifAsset, GifOptions, GifSink, assemble_gif},
    foundation::error::CounterResult,
    render::frames::{FrameRenderer, render_frames, render_frames_into},
    request::form::RenderRequest,
};

/// Render the request's frames to its output directory, then assemble them into a GIF.
///
/// Returns `None` when no frames were produced (and therefore no GIF was written). The GIF is
/// built from every PNG in the output directory, so leftovers from earlier runs are included.
pub fn run_pipeline(
    request: &RenderRequest,
    gif_path: &Path,
    opts: GifOptions,
) -> CounterResult<Option<GifAsset>> {
    let rendered = render_frames(request)?;
    if rendered == 0 {
        return Ok(None);
    }

    let frame_count = assemble_gif(&request.output_directory, gif_path, opts)?;
    if frame_count == 0 {
        return Ok(None);
    }

    Ok(Some(GifAsset {
        path: gif_path.to_path_buf(),
        frame_count,
        per_frame_delay_ms: opts.delay_ms,
    }))
}

/// Render the request straight into a GIF without writing PNG frames.
///
/// `request.output_directory` is ignored.
pub fn render_gif_direct(
    request: &RenderRequest,
    gif_path: &Path,
    opts: GifOptions,
) -> CounterResult<Option<GifAsset>> {
    let schedule = request.schedule();
    if schedule.total_frames() == 0 {
        return Ok(None);
    }

    let mut renderer = FrameRenderer::new(&request.font_path)?;
    let mut sink = GifSink::new(gif_path, opts);
    render_frames_into(&schedule, &mut renderer, &mut sink)?;

    tracing::info!(frames = sink.frames_written(), out = %gif_path.display(), "wrote gif");
    Ok(Some(GifAsset {
        path: gif_path.to_path_buf(),
        frame_count: sink.frames_written(),
        per_frame_delay_ms: opts.delay_ms,
    }))
}

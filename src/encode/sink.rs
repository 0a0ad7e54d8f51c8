use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::{
    core::{Canvas, FrameIndex},
    error::{CounterError, CounterResult},
};

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Dimensions every pushed frame must have.
    pub canvas: Canvas,
    /// Number of frames the producer intends to push, when known up front.
    pub expected_frames: Option<u64>,
}

/// Consumer of rendered frames in sequence order.
///
/// Ordering contract: `push_frame` is called with strictly increasing [`FrameIndex`] values.
/// `begin` is only called when at least one frame will follow.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> CounterResult<()>;
    /// Push one straight-alpha RGBA frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaImage) -> CounterResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> CounterResult<()>;
}

/// Writes each frame as `frame_NNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
}

impl PngSequenceSink {
    /// Create a sink that writes into `dir`. The directory is created in `begin`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of PNG files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> CounterResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaImage) -> CounterResult<()> {
        let path = self.dir.join(idx.file_name());
        image::save_buffer_with_format(
            &path,
            frame.as_raw(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| CounterError::encode(format!("write png '{}': {e}", path.display())))?;
        tracing::debug!(frame = idx.0, path = %path.display(), "wrote frame");
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> CounterResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and for handing frames straight to the GIF encoder.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    pub(crate) frames: Vec<(FrameIndex, RgbaImage)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, RgbaImage)] {
        &self.frames
    }

    /// Take the captured frames, in push order.
    pub fn into_frames(self) -> Vec<RgbaImage> {
        self.frames.into_iter().map(|(_, f)| f).collect()
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CounterResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaImage) -> CounterResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CounterResult<()> {
        Ok(())
    }
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> CounterResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

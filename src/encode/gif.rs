use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    encode::{
        palette::{DEFAULT_SAMPLE_FACTOR, TRANSPARENT_INDEX, quantize_with_transparency},
        sink::{FrameSink, SinkConfig, ensure_parent_dir},
    },
    foundation::{
        core::FrameIndex,
        error::{CounterError, CounterResult},
    },
};

/// Default per-frame delay in milliseconds.
pub const DEFAULT_DELAY_MS: u16 = 100;

/// Default output file name for the assembled animation.
pub const DEFAULT_GIF_PATH: &str = "salary_counter.gif";

/// Options for GIF assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifOptions {
    /// Delay between frames, in milliseconds. Encoded as centiseconds, rounded half up.
    pub delay_ms: u16,
    /// NeuQuant sampling factor, clamped to `1..=30`.
    pub quant_sample_factor: i32,
}

impl Default for GifOptions {
    fn default() -> Self {
        let quant_sample_factor = std::env::var("SALARY_COUNTER_QUANT_SAMPLE")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .filter(|n| (1..=30).contains(n))
            .unwrap_or(DEFAULT_SAMPLE_FACTOR);
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            quant_sample_factor,
        }
    }
}

impl GifOptions {
    /// Override the per-frame delay.
    pub fn with_delay_ms(mut self, delay_ms: u16) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Delay in GIF units (hundredths of a second).
    pub fn delay_centis(&self) -> u16 {
        ((u32::from(self.delay_ms) + 5) / 10) as u16
    }
}

/// Description of an assembled animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GifAsset {
    /// Where the GIF was written.
    pub path: PathBuf,
    /// Number of frames encoded.
    pub frame_count: usize,
    /// Delay applied to every frame.
    pub per_frame_delay_ms: u16,
}

impl GifAsset {
    /// Assembled GIFs always loop forever.
    pub const LOOPS_FOREVER: bool = true;
}

/// Streams frames into an infinitely looping GIF with a reserved transparent index.
///
/// The encoder is opened lazily on the first frame, whose palette becomes the global color
/// table. Later frames carry a local table whenever theirs differs. If no frame is pushed the
/// output file is never created.
pub struct GifSink {
    out_path: PathBuf,
    opts: GifOptions,
    cfg: Option<SinkConfig>,
    encoder: Option<gif::Encoder<BufWriter<File>>>,
    global_palette: Vec<u8>,
    frames_written: usize,
}

impl GifSink {
    /// Create a sink that writes to `out_path`, replacing any existing file.
    pub fn new(out_path: impl Into<PathBuf>, opts: GifOptions) -> Self {
        Self {
            out_path: out_path.into(),
            opts,
            cfg: None,
            encoder: None,
            global_palette: Vec::new(),
            frames_written: 0,
        }
    }

    /// Number of frames encoded so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    fn open_encoder(
        &self,
        width: u16,
        height: u16,
        global_palette: &[u8],
    ) -> CounterResult<gif::Encoder<BufWriter<File>>> {
        ensure_parent_dir(&self.out_path)?;
        let file = File::create(&self.out_path)
            .with_context(|| format!("create gif '{}'", self.out_path.display()))?;
        let mut encoder = gif::Encoder::new(BufWriter::new(file), width, height, global_palette)
            .map_err(|e| CounterError::encode(format!("start gif encoder: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| CounterError::encode(format!("write loop extension: {e}")))?;
        Ok(encoder)
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> CounterResult<()> {
        cfg.canvas.dims_u16()?;
        self.cfg = Some(cfg);
        self.encoder = None;
        self.global_palette.clear();
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaImage) -> CounterResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| CounterError::validation("gif sink used before begin"))?;
        if frame.width() != cfg.canvas.width || frame.height() != cfg.canvas.height {
            return Err(CounterError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.canvas.width,
                cfg.canvas.height
            )));
        }

        let indexed = quantize_with_transparency(frame, self.opts.quant_sample_factor)?;

        if self.encoder.is_none() {
            let encoder = self.open_encoder(indexed.width, indexed.height, &indexed.palette)?;
            self.encoder = Some(encoder);
            self.global_palette = indexed.palette.clone();
        }

        let palette = if indexed.palette == self.global_palette {
            None
        } else {
            Some(indexed.palette)
        };

        let gif_frame = gif::Frame {
            width: indexed.width,
            height: indexed.height,
            buffer: Cow::Borrowed(indexed.indices.as_slice()),
            palette,
            transparent: Some(TRANSPARENT_INDEX),
            delay: self.opts.delay_centis(),
            dispose: gif::DisposalMethod::Background,
            ..gif::Frame::default()
        };

        let Some(encoder) = self.encoder.as_mut() else {
            return Err(CounterError::encode("gif encoder is not open"));
        };
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| CounterError::encode(format!("write gif frame {}: {e}", idx.0)))?;

        self.frames_written += 1;
        tracing::debug!(frame = idx.0, "encoded gif frame");
        Ok(())
    }

    fn end(&mut self) -> CounterResult<()> {
        let Some(encoder) = self.encoder.take() else {
            return Ok(());
        };
        let mut writer = encoder
            .into_inner()
            .map_err(|e| CounterError::encode(format!("finish gif: {e}")))?;
        writer
            .flush()
            .with_context(|| format!("flush gif '{}'", self.out_path.display()))?;
        Ok(())
    }
}

/// List `*.png` files (extension matched case-insensitively) in `dir`, sorted by file name.
pub fn list_frame_files(dir: &Path) -> CounterResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read frame directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Encode every PNG in `frame_dir` (in file name order) into one looping GIF at `out_path`.
///
/// Returns the number of frames encoded. When the directory holds no PNG files nothing is
/// written and `Ok(0)` is returned; callers detect this by the missing output file.
#[tracing::instrument(skip(opts), fields(delay_ms = opts.delay_ms))]
pub fn assemble_gif(frame_dir: &Path, out_path: &Path, opts: GifOptions) -> CounterResult<usize> {
    let files = list_frame_files(frame_dir)?;
    if files.is_empty() {
        tracing::warn!(dir = %frame_dir.display(), "no png frames found; gif not written");
        return Ok(0);
    }

    let first = load_rgba(&files[0])?;
    let cfg = SinkConfig {
        canvas: crate::foundation::core::Canvas {
            width: first.width(),
            height: first.height(),
        },
        expected_frames: Some(files.len() as u64),
    };

    let mut sink = GifSink::new(out_path, opts);
    sink.begin(cfg)?;
    sink.push_frame(FrameIndex(0), &first)?;
    drop(first);
    for (i, path) in files.iter().enumerate().skip(1) {
        let frame = load_rgba(path)?;
        sink.push_frame(FrameIndex(i as u64), &frame)?;
    }
    sink.end()?;

    let count = sink.frames_written();
    tracing::info!(frames = count, out = %out_path.display(), "wrote gif");
    Ok(count)
}

/// Encode in-memory frames into one looping GIF at `out_path`.
///
/// Mirrors [`assemble_gif`] without the filesystem hand-off: an empty slice writes nothing.
pub fn encode_gif(frames: &[RgbaImage], out_path: &Path, opts: GifOptions) -> CounterResult<usize> {
    let Some(first) = frames.first() else {
        return Ok(0);
    };

    let mut sink = GifSink::new(out_path, opts);
    sink.begin(SinkConfig {
        canvas: crate::foundation::core::Canvas {
            width: first.width(),
            height: first.height(),
        },
        expected_frames: Some(frames.len() as u64),
    })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()?;
    Ok(sink.frames_written())
}

fn load_rgba(path: &Path) -> CounterResult<RgbaImage> {
    let img = image::open(path).with_context(|| format!("decode frame '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;

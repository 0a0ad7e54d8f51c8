use std::path::{Path, PathBuf};

use crate::{
    accrual::schedule::AccrualSchedule,
    foundation::error::{CounterError, CounterResult},
};

/// Annual amount used when a request leaves it out.
pub const DEFAULT_ANNUAL_AMOUNT: f64 = 50_000_000.0;
/// Animation length used when a request leaves it out.
pub const DEFAULT_DURATION_SECONDS: f64 = 10.0;
/// Frame rate used when a request leaves it out.
pub const DEFAULT_FPS: f64 = 30.0;
/// Font file used when a request leaves it out.
pub const DEFAULT_FONT_PATH: &str = "Meghana.ttf";
/// Frame directory used when a request leaves it out.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output_frames";

/// Everything the frame renderer needs for one run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderRequest {
    /// Amount accrued over a 365-day year. Negative values count down.
    pub annual_amount: f64,
    /// Animation length in seconds.
    pub duration_seconds: f64,
    /// Frames per second.
    pub fps: f64,
    /// TrueType/OpenType font file used for the counter text.
    pub font_path: PathBuf,
    /// Directory the PNG frames are written into.
    pub output_directory: PathBuf,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            annual_amount: DEFAULT_ANNUAL_AMOUNT,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            fps: DEFAULT_FPS,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
        }
    }
}

impl RenderRequest {
    /// Request with the given annual amount and defaults for everything else.
    pub fn new(annual_amount: f64) -> Self {
        Self {
            annual_amount,
            ..Self::default()
        }
    }

    /// Accrual schedule derived from the numeric fields.
    pub fn schedule(&self) -> AccrualSchedule {
        AccrualSchedule::new(self.annual_amount, self.duration_seconds, self.fps)
    }

    /// Build a request from submitted form fields; see [`RenderRequest::apply_form_fields`].
    pub fn from_form_fields<'a, I>(fields: I) -> CounterResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut req = Self::default();
        req.apply_form_fields(fields)?;
        Ok(req)
    }

    /// Overlay submitted form fields onto this request.
    ///
    /// Both the snake_case form names (`annual_salary`, `duration_sec`, `fps`, `font_path`,
    /// `output_dir`) and the camelCase request names are accepted; unknown fields are ignored.
    /// A numeric field that is present but does not parse as a number is rejected with
    /// [`CounterError::InvalidInput`] and leaves `self` unchanged. Empty path fields reset to
    /// the defaults.
    pub fn apply_form_fields<'a, I>(&mut self, fields: I) -> CounterResult<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut req = self.clone();
        for (key, value) in fields {
            match key.trim() {
                "annual_salary" | "annualAmount" | "annual_amount" => {
                    req.annual_amount = parse_number("annual amount", value)?;
                }
                "duration_sec" | "durationSeconds" | "duration_seconds" => {
                    req.duration_seconds = parse_number("duration", value)?;
                }
                "fps" | "framesPerSecond" => {
                    req.fps = parse_number("fps", value)?;
                }
                "font_path" | "fontPath" => {
                    req.font_path = path_or_default(value, DEFAULT_FONT_PATH);
                }
                "output_dir" | "outputDirectory" | "output_directory" => {
                    req.output_directory = path_or_default(value, DEFAULT_OUTPUT_DIRECTORY);
                }
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }
        *self = req;
        Ok(())
    }

    /// Parse `key=value` pairs, as given on the command line, into a request.
    pub fn from_key_value_pairs<S: AsRef<str>>(pairs: &[S]) -> CounterResult<Self> {
        let mut req = Self::default();
        req.apply_key_value_pairs(pairs)?;
        Ok(req)
    }

    /// Overlay `key=value` pairs onto this request.
    pub fn apply_key_value_pairs<S: AsRef<str>>(&mut self, pairs: &[S]) -> CounterResult<()> {
        let mut fields = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let pair = pair.as_ref();
            let (k, v) = pair.split_once('=').ok_or_else(|| {
                CounterError::invalid_input(format!("expected key=value, got '{pair}'"))
            })?;
            fields.push((k, v));
        }
        self.apply_form_fields(fields)
    }

    /// Read a JSON request; missing fields take defaults.
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> CounterResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| CounterError::invalid_input(format!("parse request JSON: {e}")))
    }

    /// Read a JSON request file.
    pub fn from_json_file(path: &Path) -> CounterResult<Self> {
        use anyhow::Context as _;

        let f = std::fs::File::open(path)
            .with_context(|| format!("open request '{}'", path.display()))?;
        Self::from_json_reader(std::io::BufReader::new(f))
    }
}

fn parse_number(name: &str, raw: &str) -> CounterResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CounterError::invalid_input(format!("{name} must be a number, got '{raw}'")))
}

fn path_or_default(raw: &str, default: &str) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        PathBuf::from(default)
    } else {
        PathBuf::from(trimmed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/request/form.rs"]
mod tests;

use crate::foundation::core::FrameIndex;

/// Seconds in a 365-day year.
pub const SECONDS_PER_YEAR: f64 = (365 * 24 * 3600) as f64;

/// Maps frame indices to the dollar amount shown on that frame.
///
/// The per-frame increment divides the annual amount by both [`SECONDS_PER_YEAR`] and the frame
/// rate, so frame `i` shows `i * annual / (SECONDS_PER_YEAR * fps)`. The displayed amount only
/// matches wall-clock accrual when the animation plays back at exactly `fps`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccrualSchedule {
    annual_amount: f64,
    duration_seconds: f64,
    fps: f64,
}

impl AccrualSchedule {
    /// Build a schedule. Values are taken as-is; negative amounts accrue downwards.
    pub fn new(annual_amount: f64, duration_seconds: f64, fps: f64) -> Self {
        Self {
            annual_amount,
            duration_seconds,
            fps,
        }
    }

    /// Annual amount the schedule accrues.
    pub fn annual_amount(&self) -> f64 {
        self.annual_amount
    }

    /// Dollar increment accrued per rendered frame.
    pub fn per_frame_increment(&self) -> f64 {
        self.annual_amount / SECONDS_PER_YEAR / self.fps
    }

    /// `floor(duration_seconds * fps)`; zero when either input is non-positive or not finite.
    pub fn total_frames(&self) -> u64 {
        if !(self.duration_seconds > 0.0 && self.fps > 0.0) {
            return 0;
        }
        let frames = self.duration_seconds * self.fps;
        if !frames.is_finite() {
            return 0;
        }
        frames.trunc() as u64
    }

    /// Amount displayed on `frame`.
    pub fn value_at(&self, frame: FrameIndex) -> f64 {
        self.per_frame_increment() * frame.0 as f64
    }

    /// Iterate `(index, value)` pairs for every frame in `[0, total_frames)`.
    pub fn frames(&self) -> impl Iterator<Item = (FrameIndex, f64)> + '_ {
        (0..self.total_frames()).map(move |i| (FrameIndex(i), self.value_at(FrameIndex(i))))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/accrual/schedule.rs"]
mod tests;

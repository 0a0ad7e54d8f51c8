/// Amount-per-frame schedule.
pub(crate) mod schedule;
/// Currency formatting for counter text.
pub(crate) mod currency;

//! Per-name timer metadata
//!
//! One [`TimerRecord`] exists for every region name the profiler has seen.
//! Records are created lazily on the first `start(name)` and survive until
//! the owning profiler is reset; the suspend/resume protocol in
//! `crate::profiler` is the only writer.

/// Accounting state for a single named timer.
///
/// `running` accumulates completed slices only: the interval between the most
/// recent activation and the current instant is not included until the timer
/// is stopped or suspended.
#[derive(Debug, Clone, Default)]
pub struct TimerRecord {
    /// Optional caller-supplied description.
    pub description: Option<String>,
    /// Number of times this timer was started.
    pub count: u64,
    /// Cumulative running duration in seconds, suspended periods excluded.
    pub running: f64,
    /// Start of the current (or last) slice, seconds on the owning clock.
    pub start_time: Option<f64>,
    /// End of the last completed slice. `None` while a slice is open.
    pub end_time: Option<f64>,
}

impl TimerRecord {
    /// Close the open slice at `now` and fold it into the running total.
    ///
    /// Used both when a timer is stopped and when it is suspended by a nested
    /// start. A record without a start timestamp contributes nothing.
    pub(crate) fn accrue(&mut self, now: f64) {
        self.end_time = Some(now);
        if let Some(start) = self.start_time {
            self.running += now - start;
        }
    }

    /// Open a new slice at `now`.
    ///
    /// Clears `end_time` so elapsed-time queries see the slice as running.
    pub(crate) fn activate(&mut self, now: f64) {
        self.start_time = Some(now);
        self.end_time = None;
    }

    /// Duration of the last completed slice, if any.
    pub fn last_interval(&self) -> Option<f64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

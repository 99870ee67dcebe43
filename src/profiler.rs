//! Stack-based timer accounting with a suspend/resume protocol
//!
//! Exactly one named timer accrues wall time at any instant. `start` suspends
//! the active timer (flushing its open slice into the running total), pushes
//! its name, and activates the new one; `stop` flushes the named timer, pops
//! the stack, and resumes whatever was suspended. The arithmetic guarantees
//! that the per-name totals plus unattributed ("missed") time reconcile to
//! the overall window, see `crate::report`.
//!
//! Pairing `start`/`stop` calls correctly is the caller's contract: `stop`
//! does not verify that its argument is the active timer, and unbalanced
//! calls degrade silently instead of panicking. Instrumentation must never
//! crash the program it measures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;

use crate::clock::{Clock, MonotonicClock};
use crate::report::{Report, ReportRow};
use crate::timer::TimerRecord;

/// Process-wide kill switch shared by every profiler instance.
static GLOBAL_HALT: AtomicBool = AtomicBool::new(false);

/// Halt measurement for all profiler instances in the process.
pub fn halt_all() {
    GLOBAL_HALT.store(true, Ordering::Relaxed);
}

/// Re-enable measurement after [`halt_all`].
pub fn resume_all() {
    GLOBAL_HALT.store(false, Ordering::Relaxed);
}

/// Is the process-wide halt switch set?
pub fn globally_halted() -> bool {
    GLOBAL_HALT.load(Ordering::Relaxed)
}

/// Hierarchical interval profiler for one logical flow of control.
///
/// Single-threaded by design: wrap an instance in a mutex or give each
/// worker its own instance for concurrent use. All operations are O(1) and
/// non-blocking; `measure` blocks only for the wrapped action itself.
#[derive(Debug)]
pub struct Profiler {
    clock: Box<dyn Clock>,
    records: HashMap<String, TimerRecord>,
    /// Names in first-discovery order, for stable report tie-breaks.
    order: Vec<String>,
    /// Suspended parent names. `None` is the synthetic root.
    stack: Vec<Option<String>>,
    active: Option<String>,
    init_time: f64,
    halted: bool,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    /// Create a profiler on the real monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(MonotonicClock::new()))
    }

    /// Create a profiler on an injected clock.
    ///
    /// The overall window starts at the clock's current timestamp.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        let init_time = clock.now();
        Self {
            clock,
            records: HashMap::new(),
            order: Vec::new(),
            stack: Vec::new(),
            active: None,
            init_time,
            halted: false,
        }
    }

    /// Halt this instance: subsequent operations are no-ops until [`resume`].
    ///
    /// [`resume`]: Profiler::resume
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Re-enable measurement for this instance.
    ///
    /// Halted operations never pushed, popped, or touched timer state, so
    /// measurement continues from wherever the stack legitimately was.
    pub fn resume(&mut self) {
        self.halted = false;
    }

    /// Effective halted state: the process-wide flag OR this instance's flag.
    pub fn is_halted(&self) -> bool {
        globally_halted() || self.halted
    }

    /// Start the named timer, suspending whichever timer was accruing.
    ///
    /// Creates the timer record on first use, increments its invocation count
    /// on every call. Reentrant same-name nesting is allowed: each `start` is
    /// an independent frame, and the flush-before-overwrite order keeps the
    /// arithmetic exact even when a name suspends itself.
    pub fn start(&mut self, name: &str) {
        self.start_described(name, "");
    }

    /// Like [`start`], attaching a description to the timer.
    ///
    /// An empty description leaves any previously recorded one in place.
    ///
    /// [`start`]: Profiler::start
    pub fn start_described(&mut self, name: &str, description: &str) {
        if self.is_halted() {
            return;
        }
        let now = self.clock.now();
        trace!(timer = name, "start");

        let previous = self.active.take();
        if let Some(parent) = previous.as_deref() {
            self.suspend(parent, now);
        }
        self.stack.push(previous);

        if let Some(record) = self.records.get_mut(name) {
            record.count += 1;
            if !description.is_empty() {
                record.description = Some(description.to_string());
            }
            record.activate(now);
        } else {
            let mut record = TimerRecord {
                count: 1,
                ..TimerRecord::default()
            };
            if !description.is_empty() {
                record.description = Some(description.to_string());
            }
            record.activate(now);
            self.order.push(name.to_string());
            self.records.insert(name.to_string(), record);
        }
        self.active = Some(name.to_string());
    }

    /// Stop the named timer and resume the suspended parent.
    ///
    /// `name` is trusted to match the active timer; a mismatched stop still
    /// flushes `name`'s slice and pops, which is defined but degenerate.
    /// Popping an empty stack resumes the synthetic root instead of
    /// panicking; result precision is undefined in that case.
    pub fn stop(&mut self, name: &str) {
        if self.is_halted() {
            return;
        }
        let now = self.clock.now();
        trace!(timer = name, "stop");

        if let Some(record) = self.records.get_mut(name) {
            record.accrue(now);
        }

        let resumed = self.stack.pop().unwrap_or(None);
        if let Some(parent) = resumed.as_deref() {
            trace!(timer = parent, "resume");
            if let Some(record) = self.records.get_mut(parent) {
                record.activate(now);
            }
        }
        self.active = resumed;
    }

    /// Flush the parent's open slice into its running total before a nested
    /// timer takes over. Mirrors the flush in [`stop`].
    ///
    /// [`stop`]: Profiler::stop
    fn suspend(&mut self, name: &str, now: f64) {
        trace!(timer = name, "suspend");
        if let Some(record) = self.records.get_mut(name) {
            record.accrue(now);
        }
    }

    /// Bracket `action` with `start`/`stop` and return its result.
    ///
    /// The closure receives the profiler again so the measured work can nest
    /// further regions. When halted, the action runs directly with zero
    /// bookkeeping overhead.
    pub fn measure<R>(&mut self, name: &str, action: impl FnOnce(&mut Self) -> R) -> R {
        if self.is_halted() {
            return action(self);
        }
        self.start(name);
        let output = action(self);
        self.stop(name);
        output
    }

    /// Start the named timer and return a guard that stops it on drop.
    ///
    /// The guard borrows the profiler mutably; regions nested inside a scope
    /// go through [`measure`]. If the profiler is halted when the scope is
    /// created, the guard is inert and its drop performs no pop.
    ///
    /// [`measure`]: Profiler::measure
    pub fn scope(&mut self, name: &str) -> TimerScope<'_> {
        let armed = !self.is_halted();
        if armed {
            self.start(name);
        }
        TimerScope {
            name: name.to_string(),
            armed,
            profiler: self,
        }
    }

    /// Elapsed time for a timer, in seconds, without stopping it.
    ///
    /// Returns the last completed slice if one is recorded, the age of the
    /// currently open slice if the timer is running, and 0.0 for a name that
    /// was never started.
    pub fn elapsed_time(&self, name: &str) -> f64 {
        let Some(record) = self.records.get(name) else {
            return 0.0;
        };
        match (record.start_time, record.end_time) {
            (Some(start), Some(end)) => end - start,
            (Some(start), None) => self.clock.now() - start,
            _ => 0.0,
        }
    }

    /// Invocation count for a timer; 0 for a name never started.
    pub fn count(&self, name: &str) -> u64 {
        self.records.get(name).map_or(0, |record| record.count)
    }

    /// Cumulative running seconds for a timer, suspended periods excluded.
    pub fn running(&self, name: &str) -> f64 {
        self.records.get(name).map_or(0.0, |record| record.running)
    }

    /// Accounting record for a timer, if the name was ever started.
    pub fn timer(&self, name: &str) -> Option<&TimerRecord> {
        self.records.get(name)
    }

    /// Name of the timer currently accruing, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Depth of the suspended-timer stack.
    ///
    /// Equals the number of starts without a matching stop.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Timestamp fixed at construction, the origin of the overall window.
    pub fn init_time(&self) -> f64 {
        self.init_time
    }

    /// Drop every timer, clear the stack, and re-fix the overall window at
    /// the current instant. The halt flag is left untouched.
    pub fn reset(&mut self) {
        self.records.clear();
        self.order.clear();
        self.stack.clear();
        self.active = None;
        self.init_time = self.clock.now();
    }

    /// Build the reconciled per-timer breakdown.
    ///
    /// Side-effect free: no timer is flushed or mutated, so an open slice on
    /// a still-running timer counts as missed time until it is stopped.
    pub fn report(&self) -> Report {
        let now = self.clock.now();
        let mut rows = Vec::with_capacity(self.order.len());
        for name in &self.order {
            if let Some(record) = self.records.get(name) {
                rows.push(ReportRow {
                    nr: 0,
                    calls: record.count,
                    seconds: record.running,
                    percent: 0.0,
                    name: name.clone(),
                    description: record.description.clone(),
                });
            }
        }
        Report::reconcile(rows, now - self.init_time)
    }
}

/// Drop guard returned by [`Profiler::scope`].
///
/// Stops its timer deterministically when it goes out of scope, eliminating
/// forgotten-stop leaks for straight-line regions.
#[derive(Debug)]
pub struct TimerScope<'a> {
    profiler: &'a mut Profiler,
    name: String,
    armed: bool,
}

impl Drop for TimerScope<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.profiler.stop(&self.name);
        }
    }
}

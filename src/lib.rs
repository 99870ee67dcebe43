//! Medir - hierarchical interval profiler with suspend/resume attribution
//!
//! This library attributes wall-clock time to caller-named regions of work,
//! even when regions nest or interleave, without double-counting. Starting a
//! region suspends the one that was accruing time; stopping it resumes the
//! suspended parent. A reconciled report accounts for every elapsed second:
//! the per-region totals plus "missed" (unattributed) time always sum to the
//! overall window.
//!
//! Features:
//! - Stack-based suspend/resume timer accounting (exactly one region accrues
//!   wall time at any instant)
//! - Reconciled, percentage-sorted reports with Missed and OVERALL rows
//! - Per-instance and process-wide halt switches for zero-overhead bypass
//! - Scoped guards and a `measure` wrapper for forget-proof stop calls
//! - Injectable clock source for deterministic tests
//!
//! # Example
//!
//! ```
//! use medir::profiler::Profiler;
//!
//! let mut profiler = Profiler::new();
//! profiler.start("request");
//! let n = profiler.measure("parse", |_p| 2 + 2);
//! profiler.stop("request");
//!
//! assert_eq!(n, 4);
//! assert_eq!(profiler.count("parse"), 1);
//! let report = profiler.report();
//! assert_eq!(report.rows.len(), 2);
//! ```

pub mod clock;
pub mod profiler;
pub mod registry;
pub mod report;
pub mod timer;

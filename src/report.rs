//! Reconciled per-timer breakdown
//!
//! A [`Report`] is a snapshot: every second elapsed since the profiler was
//! constructed lands either in a named row or in the Missed row, and the row
//! percentages plus the missed percentage sum to ~100% (floating rounding
//! tolerated). Rows are sorted strictly descending by percent; equal
//! percentages keep first-discovery order.
//!
//! The core builds ordered numeric rows; rendering is a sink concern. A
//! fixed-width text table and JSON serialization ship as conveniences.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// One named timer in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// 1-based position after sorting.
    pub nr: usize,
    /// Invocation count.
    pub calls: u64,
    /// Cumulative running duration in seconds.
    pub seconds: f64,
    /// Share of the overall window, 0..=100.
    pub percent: f64,
    /// Timer name.
    pub name: String,
    /// Caller-supplied description, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Ordered, reconciled breakdown of time spent per timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Named rows, strictly descending by percent.
    pub rows: Vec<ReportRow>,
    /// Elapsed seconds never attributed to any timer.
    pub missed_seconds: f64,
    /// Missed share of the overall window.
    pub missed_percent: f64,
    /// Seconds elapsed since the profiler was constructed.
    pub overall_seconds: f64,
    /// Sum of row percents plus the missed percent; ~100 up to rounding.
    pub overall_percent: f64,
}

impl Report {
    /// Reconcile discovery-ordered rows against the overall window.
    ///
    /// Fills percentages (guarding the zero-length window), sorts stably by
    /// descending percent, assigns row numbers, and derives the Missed and
    /// OVERALL figures.
    pub(crate) fn reconcile(mut rows: Vec<ReportRow>, overall_seconds: f64) -> Self {
        let mut total_seconds = 0.0;
        let mut total_percent = 0.0;
        for row in &mut rows {
            total_seconds += row.seconds;
            row.percent = percent_of(row.seconds, overall_seconds);
            total_percent += row.percent;
        }
        // stable sort: ties keep first-discovery order
        rows.sort_by(|a, b| {
            b.percent
                .partial_cmp(&a.percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (index, row) in rows.iter_mut().enumerate() {
            row.nr = index + 1;
        }

        let missed_seconds = overall_seconds - total_seconds;
        let missed_percent = percent_of(missed_seconds, overall_seconds);
        Report {
            rows,
            missed_seconds,
            missed_percent,
            overall_seconds,
            overall_percent: total_percent + missed_percent,
        }
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Render a fixed-width text table with Missed and OVERALL trailer rows.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(76);
        let thin = "-".repeat(76);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{:^76}", "PROFILER OUTPUT");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{:>4} {:>7} {:>12} {:>8}  {}",
            "Nr", "calls", "time", "percent", "timer"
        );
        let _ = writeln!(out, "{thin}");
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{:>4} {:>7} {:>12.6} {:>8.2}  {}",
                row.nr, row.calls, row.seconds, row.percent, row.name
            );
        }
        let _ = writeln!(out, "{thin}");
        let _ = writeln!(
            out,
            "     {:>12.6}s ({:>6.2}%)  {}",
            self.missed_seconds, self.missed_percent, "Missed"
        );
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "     {:>12.6}s ({:>6.2}%)  {}",
            self.overall_seconds, self.overall_percent, "OVERALL TIME"
        );
        let _ = writeln!(out, "{rule}");
        out
    }

    /// Print the rendered table to stderr.
    pub fn print(&self) {
        eprint!("{}", self.render());
    }
}

fn percent_of(seconds: f64, overall_seconds: f64) -> f64 {
    if overall_seconds <= 0.0 {
        0.0
    } else {
        seconds / overall_seconds * 100.0
    }
}

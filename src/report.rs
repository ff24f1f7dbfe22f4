//! Report data model and rendering.
//!
//! This module contains the types that carry collected entries between the
//! collection pass and the output: [`Record`] for a single sized entry,
//! [`Report`] for the full accumulated result, and [`render`] which sorts
//! the records and produces the final aligned text lines.

use crate::config::ReportOptions;
use crate::utils::format_size;

/// A single reportable entry: one direct child of the target (or the
/// target itself when it is not a directory).
///
/// Records are created once during collection and are immutable afterwards.
/// The formatted size is cached at construction so it is computed exactly
/// once and can drive column-width measurement.
#[derive(Clone, Debug)]
pub struct Record {
    /// Total size in bytes (recursive for directories).
    pub size: u64,

    /// Display label: the entry name, suffixed with `/` for directories or
    /// ` -> <target>` for symlinks.
    pub label: String,

    /// The size formatted per the active display mode.
    pub formatted: String,
}

/// Accumulated result of a collection pass.
///
/// Records are appended through [`Report::push`], which also maintains the
/// grand total and the running maximum width of the formatted sizes, so no
/// post-hoc re-summing pass is needed.
#[derive(Debug)]
pub struct Report {
    /// Collected records, in discovery order until [`render`] sorts them.
    pub records: Vec<Record>,

    /// Sum of the sizes of exactly the records in `records`.
    pub total: u64,

    /// Widest formatted size among the records (the total row is folded in
    /// at render time).
    width: usize,

    /// Whether sizes are formatted in unit mode.
    units: bool,
}

impl Report {
    /// Create an empty report whose sizes will be formatted per `units`.
    #[must_use]
    pub const fn new(units: bool) -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            width: 0,
            units,
        }
    }

    /// Append a surviving entry, updating the grand total and the running
    /// column width in the same step.
    pub fn push(&mut self, size: u64, label: String) {
        let formatted = format_size(size, self.units);

        self.total += size;
        self.width = self.width.max(formatted.len());
        self.records.push(Record {
            size,
            label,
            formatted,
        });
    }

    /// Whether no entries survived collection and filtering.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The grand total formatted per the active display mode.
    #[must_use]
    pub fn total_formatted(&self) -> String {
        format_size(self.total, self.units)
    }

    /// Final size-column width: the running maximum over all records,
    /// widened if necessary to fit the formatted grand total.
    #[must_use]
    pub fn column_width(&self) -> usize {
        self.width.max(self.total_formatted().len())
    }
}

/// Sort records by size. Ascending by default, descending when `reverse`
/// is set. The sort is unstable; ordering among equal sizes is arbitrary.
pub fn sort_records(records: &mut [Record], reverse: bool) {
    records.sort_unstable_by_key(|record| record.size);

    if reverse {
        records.reverse();
    }
}

/// Sort the report and render it as output lines.
///
/// Produces one `<size> <label>` line per record followed by a final
/// `<size> total` line, with every size right-aligned to a uniform column
/// width covering all records and the total. An empty report renders as no
/// lines at all.
#[must_use]
pub fn render(mut report: Report, options: &ReportOptions) -> Vec<String> {
    if report.is_empty() {
        return Vec::new();
    }

    sort_records(&mut report.records, options.reverse);

    let width = report.column_width();
    let mut lines: Vec<String> = report
        .records
        .iter()
        .map(|record| format!("{:>width$} {}", record.formatted, record.label))
        .collect();

    lines.push(format!("{:>width$} total", report.total_formatted()));
    lines
}

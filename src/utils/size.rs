//! Size measurement and formatting utilities.
//!
//! This module provides the recursive directory-size computation used to
//! annotate every reported entry, and the formatting routine that turns a
//! byte count into either a plain decimal string or a human-scaled unit
//! string (`1.5K`, `2M`, ...).

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Unit symbols for human-readable sizes, one per power of 1024.
const UNIT_SYMBOLS: [&str; 9] = ["B", "K", "M", "G", "T", "P", "E", "Z", "Y"];

/// Compute the total on-disk size of a path, in bytes.
///
/// Symbolic links are never followed: a symlink contributes the size of the
/// link object itself, whether it is the path being measured or an entry
/// found during traversal. This keeps the walk loop-free on any filesystem.
///
/// For a directory the result is the recursive sum of the sizes of all
/// files and symlinks it transitively contains; directories themselves add
/// nothing. Entries that cannot be read (permission denied, vanished mid
/// walk) are silently skipped, so an inaccessible subtree contributes `0`
/// rather than aborting the measurement.
///
/// Returns `0` if the path does not exist or cannot be statted at all.
#[must_use]
pub fn compute_size(path: &Path) -> u64 {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return 0;
    };

    let file_type = metadata.file_type();
    if file_type.is_symlink() || !file_type.is_dir() {
        return metadata.len();
    }

    let mut total = 0u64;

    for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
        if entry.file_type().is_dir() {
            continue;
        }
        if let Ok(metadata) = entry.metadata() {
            total += metadata.len();
        }
    }

    total
}

/// Format a byte count for display.
///
/// In raw mode (`units == false`) this is simply the decimal byte count
/// with no suffix. In unit mode the value is scaled by repeated division by
/// 1024 and suffixed with the matching symbol from `B K M G T P E Z Y`
/// (clamped at `Y`), rendered with up to three fractional digits and
/// trailing zeros stripped:
///
/// - `500` → `"500B"`
/// - `1024` → `"1K"`
/// - `1536` → `"1.5K"`
/// - `2548` → `"2.488K"`
#[must_use]
pub fn format_size(bytes: u64, units: bool) -> String {
    if !units {
        return bytes.to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut index = 0;

    while value >= 1024.0 && index < UNIT_SYMBOLS.len() - 1 {
        value /= 1024.0;
        index += 1;
    }

    format!("{}{}", trim_fraction(value), UNIT_SYMBOLS[index])
}

/// Render a value with three fractional digits, then strip trailing zeros
/// and a dangling decimal point (`2.500` → `2.5`, `1.000` → `1`).
fn trim_fraction(value: f64) -> String {
    let mut rendered = format!("{value:.3}");

    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }

    rendered
}

//! Human-readable file sizes.
//!
//! The size formatter is injected into [`UploadFormView`] as a plain
//! function so hosts can swap in their own wording; this module is the
//! default.
//!
//! [`UploadFormView`]: crate::view::UploadFormView

use crate::types::SizeUnits;

/// Format a byte count for display, e.g. `1.5 KB` or `64 MB`.
///
/// Values below one unit step are printed as whole bytes. Larger values
/// get at most one decimal, with a trailing `.0` dropped. Rounding
/// never yields a value equal to the step itself (`1048575` bytes is
/// `1 MB`, not `1024 KB`).
#[must_use]
#[allow(clippy::cast_precision_loss)] // display only; sizes beyond 2^53 lose nothing visible
pub fn format_file_size(bytes: u64, units: SizeUnits) -> String {
    let base = units.base();
    let suffixes = units.suffixes();
    if bytes < base {
        return format!("{bytes} B");
    }

    let base = base as f64;
    let mut value = bytes as f64;
    let mut index = 0;
    while index + 1 < suffixes.len() && round_tenth(value) >= base {
        value /= base;
        index += 1;
    }

    let rounded = round_tenth(value);
    let suffix = suffixes[index];
    if rounded.fract().abs() < f64::EPSILON {
        format!("{rounded:.0} {suffix}")
    } else {
        format!("{rounded:.1} {suffix}")
    }
}

/// Format an optional limit; an absent limit formats as an empty string.
#[must_use]
pub fn format_optional_size(bytes: Option<u64>, units: SizeUnits) -> String {
    bytes.map_or_else(String::new, |b| format_file_size(b, units))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

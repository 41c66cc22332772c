//! Shared "show every Nth" decimation policy.
//!
//! Applied uniformly to x-axis labels and point labels so both decimate on
//! the same indices.

/// Returns the decimation stride for a dataset of `num_points`.
///
/// Dense datasets (above `skip_point_threshold`) get a stride of
/// `ceil(num_points / threshold)`; sparse datasets render every index. A
/// caller-supplied override always wins.
#[must_use]
pub fn show_every_nth(
    num_points: usize,
    skip_point_threshold: usize,
    nth_override: Option<usize>,
) -> usize {
    if let Some(nth) = nth_override {
        return nth.max(1);
    }
    if skip_point_threshold == 0 || num_points <= skip_point_threshold {
        return 1;
    }
    num_points.div_ceil(skip_point_threshold)
}

//! Y-axis label generation and numeric formatting.

use tracing::trace;

/// Decimal and thousands separator characters for label formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    pub decimal: char,
    pub thousands: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            decimal: '.',
            thousands: ',',
        }
    }
}

/// Precision escalation stops here even if duplicates remain; pathological
/// ranges must not loop forever.
const MAX_PRECISION: u8 = 10;

/// Generates `num_labels` evenly spaced value labels between `min_val` and
/// `max_val`.
///
/// Labels are formatted at `precision` decimal digits; if two labels collide
/// as strings, precision escalates and the whole set regenerates until the
/// labels are unique or the escalation bound is hit.
#[must_use]
pub fn y_axis_labels(
    max_val: f64,
    min_val: f64,
    num_labels: usize,
    precision: u8,
    separators: Separators,
) -> Vec<String> {
    if num_labels == 0 {
        return Vec::new();
    }
    if num_labels == 1 {
        return vec![format_value(min_val, precision, separators)];
    }

    let mut precision = precision;
    loop {
        let labels: Vec<String> = (0..num_labels)
            .map(|index| {
                let ratio = index as f64 / (num_labels - 1) as f64;
                let value = ratio * (max_val - min_val) + min_val;
                format_value(value, precision, separators)
            })
            .collect();

        if !has_duplicates(&labels) || precision >= MAX_PRECISION {
            if precision >= MAX_PRECISION && has_duplicates(&labels) {
                trace!(precision, "label precision escalation bound reached");
            }
            return labels;
        }
        precision += 1;
    }
}

fn has_duplicates(labels: &[String]) -> bool {
    labels
        .iter()
        .enumerate()
        .any(|(index, label)| labels[..index].contains(label))
}

/// Formats one value at the given decimal precision.
///
/// An exact-zero result is always rendered as `"0"` — never `"0.00"` and
/// never `"-0"`. Integer digits are grouped in threes with the configured
/// thousands separator.
#[must_use]
pub fn format_value(value: f64, precision: u8, separators: Separators) -> String {
    let precision = usize::from(precision);
    let rendered = format!("{value:.precision$}");

    // Rounding toward zero can leave a bare sign on a zero string.
    let unsigned = rendered.strip_prefix('-').unwrap_or(&rendered);
    if unsigned.chars().all(|c| c == '0' || c == '.') {
        return "0".to_owned();
    }

    let (sign, digits) = if let Some(rest) = rendered.strip_prefix('-') {
        ("-", rest)
    } else {
        ("", rendered.as_str())
    };

    let (integer_part, fraction_part) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let grouped = group_thousands(integer_part, separators.thousands);
    match fraction_part {
        Some(fraction) => format!("{sign}{grouped}{}{fraction}", separators.decimal),
        None => format!("{sign}{grouped}"),
    }
}

/// Groups integer-part digits in threes from the right.
#[must_use]
pub fn group_thousands(integer_digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(integer_digits.len() + integer_digits.len() / 3);
    let count = integer_digits.len();
    for (index, digit) in integer_digits.chars().enumerate() {
        if index > 0 && (count - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

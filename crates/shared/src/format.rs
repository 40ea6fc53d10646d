/// Rendered in place of a value that cannot be computed.
pub const UNAVAILABLE: &str = "N/A";

/// Formats with exactly `fraction_digits` decimals and thousands separators,
/// e.g. `1234.5 -> "1,234.50"`. Non-finite input renders as [`UNAVAILABLE`].
pub fn format_fixed(value: f64, fraction_digits: usize) -> String {
    format_grouped(value, fraction_digits, fraction_digits)
}

/// Locale-style grouping with between `min_fraction` and `max_fraction`
/// decimals; trailing zeros beyond `min_fraction` are dropped.
pub fn format_grouped(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if !value.is_finite() {
        return UNAVAILABLE.to_string();
    }
    let max_fraction = max_fraction.max(min_fraction);
    let rounded = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rounded.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > min_fraction && frac.ends_with('0') {
        frac.pop();
    }

    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// [`format_fixed`] for values that may be missing.
pub fn format_optional(value: Option<f64>, fraction_digits: usize) -> String {
    match value {
        Some(v) => format_fixed(v, fraction_digits),
        None => UNAVAILABLE.to_string(),
    }
}

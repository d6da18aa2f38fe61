//! `value,timestamp` line parser.
//!
//! The control host sends `f"{value:.6f},{iso8601}"`. Only the value is used;
//! the timestamp must be present but is otherwise opaque.

use crate::error::LineError;

/// Values outside this magnitude are treated as a sender fault.
pub const VALUE_LIMIT: f32 = 1000.0;

/// A successfully parsed line. Borrows the timestamp from the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerialSample<'a> {
    pub value: f32,
    pub timestamp: &'a str,
}

/// Parse one complete line (delimiter already stripped).
pub fn parse_line(line: &str) -> Result<SerialSample<'_>, LineError> {
    let (raw_value, timestamp) = line.split_once(',').ok_or(LineError::MissingComma)?;
    if raw_value.is_empty() {
        return Err(LineError::MissingValue);
    }
    if timestamp.is_empty() {
        return Err(LineError::MissingTimestamp);
    }

    let raw_value = raw_value.trim();
    if raw_value.is_empty() {
        return Err(LineError::MissingValue);
    }
    if !looks_numeric(raw_value) {
        return Err(LineError::NotNumeric);
    }

    let value: f32 = raw_value.parse().map_err(|_| LineError::NotNumeric)?;
    if !value.is_finite() {
        return Err(LineError::NotFinite);
    }
    if !(-VALUE_LIMIT..=VALUE_LIMIT).contains(&value) {
        return Err(LineError::OutOfRange);
    }

    Ok(SerialSample { value, timestamp })
}

/// Cheap pre-filter ahead of the float parse.
///
/// Accepts anything with a decimal point, anything whose leading integer is
/// nonzero, and the literal zeros `0` / `0.0`. This keeps words such as
/// `inf` or `nan` from reaching `str::parse`, which would accept them.
fn looks_numeric(s: &str) -> bool {
    s.contains('.') || leading_integer(s) != 0 || s == "0" || s == "0.0"
}

/// Integer prefix with optional sign, `0` when there is none.
fn leading_integer(s: &str) -> i64 {
    let bytes = s.as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut n: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        n = n.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative { -n } else { n }
}

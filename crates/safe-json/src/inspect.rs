// crates/safe-json/src/inspect.rs

use crate::value::TypedArray;
use std::fmt::Write;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Bytes shown before a buffer rendering is cut short.
pub const MAX_BUFFER_BYTES: usize = 50;
/// Items shown before a typed array rendering is cut short.
pub const MAX_ARRAY_ITEMS: usize = 10;

/// Renders a byte buffer as `<Buffer 00 01 ... N more bytes>`.
pub fn buffer(bytes: &[u8]) -> String {
    let mut out = String::from("<Buffer ");
    for (i, b) in bytes.iter().take(MAX_BUFFER_BYTES).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    let rest = bytes.len().saturating_sub(MAX_BUFFER_BYTES);
    if rest > 0 {
        let _ = write!(out, " ... {rest} more byte{}", plural(rest));
    }
    out.push('>');
    out
}

/// Renders a typed array as `Int8Array [ 0, 0, ... N more items ]`.
pub fn typed_array(array: &TypedArray) -> String {
    let mut items = typed_items(array, MAX_ARRAY_ITEMS);
    let rest = array.len().saturating_sub(MAX_ARRAY_ITEMS);
    if rest > 0 {
        items.push(format!("... {rest} more item{}", plural(rest)));
    }
    if items.is_empty() {
        format!("{} []", array.class_name())
    } else {
        format!("{} [ {} ]", array.class_name(), items.join(", "))
    }
}

fn typed_items(array: &TypedArray, limit: usize) -> Vec<String> {
    fn plain<T: ToString>(items: &[T], limit: usize) -> Vec<String> {
        items.iter().take(limit).map(ToString::to_string).collect()
    }
    fn big<T: std::fmt::Display>(items: &[T], limit: usize) -> Vec<String> {
        items.iter().take(limit).map(|n| format!("{n}n")).collect()
    }
    match array {
        TypedArray::Int8(v) => plain(v, limit),
        TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => plain(v, limit),
        TypedArray::Int16(v) => plain(v, limit),
        TypedArray::Uint16(v) => plain(v, limit),
        TypedArray::Int32(v) => plain(v, limit),
        TypedArray::Uint32(v) => plain(v, limit),
        TypedArray::Float32(v) => v
            .iter()
            .take(limit)
            .map(|n| number(f64::from(*n)))
            .collect(),
        TypedArray::Float64(v) => v.iter().take(limit).map(|n| number(*n)).collect(),
        TypedArray::BigInt64(v) => big(v, limit),
        TypedArray::BigUint64(v) => big(v, limit),
    }
}

/// Formats a float the way an inspector prints it: `NaN`, `Infinity`, `-0`.
pub fn number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 && n.is_sign_negative() {
        "-0".to_owned()
    } else if n != 0.0 && !(1e-6..1e21).contains(&n.abs()) {
        exponent(n)
    } else {
        n.to_string()
    }
}

// `1e21` -> `1e+21`, `1.5e-7` stays.
fn exponent(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

/// Formats a date as an ISO-8601 UTC timestamp with millisecond precision.
///
/// Years outside `0..=9999` take the expanded `±YYYYYY` form. Returns `None`
/// when the date cannot be represented.
pub fn iso_millis(date: OffsetDateTime) -> Option<String> {
    let fmt = format_description!("[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    let date = date.checked_to_offset(UtcOffset::UTC)?;
    let year = date.year();
    let year = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!("{sign}{:06}", year.unsigned_abs())
    };
    let rest = date.format(&fmt).ok()?;
    Some(format!("{year}-{rest}"))
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_buffer_is_complete() {
        assert_eq!(buffer(&[0x00, 0xab, 0x10]), "<Buffer 00 ab 10>");
        assert_eq!(buffer(&[]), "<Buffer >");
    }

    #[test]
    fn long_buffer_is_cut() {
        let out = buffer(&[0u8; 51]);
        assert!(out.ends_with("00 ... 1 more byte>"), "{out}");
    }

    #[test]
    fn typed_array_forms() {
        assert_eq!(typed_array(&TypedArray::Int8(vec![])), "Int8Array []");
        assert_eq!(
            typed_array(&TypedArray::Float64(vec![1.5, f64::NAN, -0.0])),
            "Float64Array [ 1.5, NaN, -0 ]"
        );
        assert_eq!(
            typed_array(&TypedArray::BigInt64(vec![-3])),
            "BigInt64Array [ -3n ]"
        );
        assert_eq!(
            typed_array(&TypedArray::Uint16(vec![7; 11])),
            "Uint16Array [ 7, 7, 7, 7, 7, 7, 7, 7, 7, 7, ... 1 more item ]"
        );
    }

    #[test]
    fn huge_and_tiny_numbers_use_exponents() {
        assert_eq!(number(1e21), "1e+21");
        assert_eq!(number(-2.5e30), "-2.5e+30");
        assert_eq!(number(1e-7), "1e-7");
        assert_eq!(number(1e20), "100000000000000000000");
        assert_eq!(number(0.000001), "0.000001");
        assert_eq!(
            typed_array(&TypedArray::Float64(vec![1e21, 0.0])),
            "Float64Array [ 1e+21, 0 ]"
        );
    }

    #[test]
    fn iso_has_millis() {
        let date = OffsetDateTime::from_unix_timestamp_nanos(1_514_160_000_123_000_000).unwrap();
        assert_eq!(iso_millis(date).as_deref(), Some("2017-12-25T00:00:00.123Z"));
    }
}

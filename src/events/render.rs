//! JSON text rendering for published details and log lines
//!
//! Downstream rules on the bus match against the exact `Detail` text the
//! forwarder has always produced: `", "` between items, `": "` between key and
//! value, ASCII-only output with `\uXXXX` escapes. serde_json's compact
//! formatter differs on all three, so this module supplies its own formatter.
//! Object key order is preserved through serde_json's `preserve_order`.
//!
//! Numbers arrive as their source text (`arbitrary_precision`). Integers are
//! written back verbatim at any size; everything else is a double and is
//! written in shortest round-trip form, positional for exponents -4..16 and
//! `1e-05` / `1e+16` style outside that window.

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io::{self, Write};

/// Compact formatter with spaced separators and ASCII-only strings
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    // Quotes, backslashes and control characters never reach this method;
    // serde_json routes them through write_char_escape.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if matches!(ch, ' '..='~') {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(format_double(value).as_bytes())
    }

    fn write_f32<W>(&mut self, writer: &mut W, value: f32) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.write_f64(writer, f64::from(value))
    }

    fn write_number_str<W>(&mut self, writer: &mut W, value: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if !value.contains(['.', 'e', 'E']) {
            let integer = if value == "-0" { "0" } else { value };
            return writer.write_all(integer.as_bytes());
        }
        match value.parse::<f64>() {
            Ok(double) => self.write_f64(writer, double),
            Err(_) => writer.write_all(value.as_bytes()),
        }
    }
}

/// Shortest round-trip text of a double
fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e-7"
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let sign = if value.is_sign_negative() { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        if point <= 0 {
            let zeros = "0".repeat(point.unsigned_abs() as usize);
            format!("{sign}0.{zeros}{digits}")
        } else {
            let point = point as usize;
            if digits.len() > point {
                format!("{sign}{}.{}", &digits[..point], &digits[point..])
            } else {
                format!("{sign}{digits}{}.0", "0".repeat(point - digits.len()))
            }
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() { String::new() } else { format!(".{rest}") };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{lead}{fraction}e{exp_sign}{:02}", exponent.unsigned_abs())
    }
}

/// Render any serializable value as single-line, ASCII-only JSON text
pub fn render_json<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

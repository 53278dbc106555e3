use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};

use crate::number::format_toml_f64;

/// A key may stay unquoted only if it is a non-empty run of ASCII letters,
/// digits, `_`, and `-`.
pub fn is_bare_key(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn is_control(c: char) -> bool {
    let u = c as u32;
    u < 0x20 || u == 0x7F
}

/// Escape a string as a TOML basic string, including the surrounding quotes.
pub fn escape_and_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if is_control(c) => {
                use std::fmt::Write as _;
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Format a key segment, quoting when it cannot be written bare.
pub fn format_key(s: &str) -> String {
    if is_bare_key(s) {
        s.to_string()
    } else {
        escape_and_quote(s)
    }
}

/// Format a dotted key path for headers and diagnostics.
pub fn format_key_path(segments: &[String]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&format_key(seg));
    }
    out
}

pub fn format_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

pub fn format_integer(i: i64) -> String {
    i.to_string()
}

pub fn format_float(f: f64) -> String {
    format_toml_f64(f)
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format("%H:%M:%S%.f").to_string()
}

pub fn format_local_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

pub fn format_zoned_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_keys_stay_bare() {
        assert_eq!(format_key("server-1"), "server-1");
        assert_eq!(format_key("a_b"), "a_b");
        assert_eq!(format_key("127"), "127");
    }

    #[test]
    fn non_bare_keys_get_quoted() {
        assert_eq!(format_key(""), "\"\"");
        assert_eq!(format_key("a b"), "\"a b\"");
        assert_eq!(format_key("tab\tstop"), "\"tab\\tstop\"");
        assert_eq!(format_key("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn key_paths_join_with_dots() {
        let segs = vec!["a".to_string(), "b c".to_string()];
        assert_eq!(format_key_path(&segs), "a.\"b c\"");
    }
}

//! Rendering a resolved table back to TOML syntax.
//!
//! Scalar and inline entries of a table are written first, then `[sub.table]`
//! sections, then `[[array.of.tables]]` sections. Keys follow the map's
//! alphabetical order unless the caller supplies a projection.

use std::cmp::Ordering;

use crate::encode::primitives::{self, format_key, format_key_path};
use crate::encode::writer::LineWriter;
use crate::value::{Table, Value};

/// A caller-supplied key comparison, applied within every table.
pub type KeyOrder<'a> = &'a dyn Fn(&str, &str) -> Ordering;

pub fn to_string(table: &Table) -> String {
    render(table, None)
}

pub fn to_string_with_key_order(table: &Table, order: KeyOrder<'_>) -> String {
    render(table, Some(order))
}

fn render(table: &Table, order: Option<KeyOrder<'_>>) -> String {
    let mut w = LineWriter::new();
    let mut path = Vec::new();
    render_table(&mut w, &mut path, table, order);
    w.into_string()
}

fn sorted_entries<'t>(table: &'t Table, order: Option<KeyOrder<'_>>) -> Vec<(&'t String, &'t Value)> {
    let mut entries: Vec<_> = table.iter().collect();
    if let Some(cmp) = order {
        entries.sort_by(|a, b| cmp(a.0, b.0));
    }
    entries
}

/// A non-empty array whose elements are all tables renders as `[[key]]`
/// sections; everything else renders inline.
fn is_array_of_tables(value: &Value) -> bool {
    match value {
        Value::Array(items) => {
            !items.is_empty() && items.iter().all(|v| matches!(v, Value::Table(_)))
        }
        _ => false,
    }
}

fn render_table(
    w: &mut LineWriter,
    path: &mut Vec<String>,
    table: &Table,
    order: Option<KeyOrder<'_>>,
) {
    let entries = sorted_entries(table, order);

    for &(key, value) in &entries {
        if matches!(value, Value::Table(_)) || is_array_of_tables(value) {
            continue;
        }
        w.line_kv(&format_key(key), &inline_value(value));
    }

    for &(key, value) in &entries {
        match value {
            Value::Table(sub) => {
                path.push(key.clone());
                if !w.is_empty() {
                    w.blank();
                }
                w.line(&format!("[{}]", format_key_path(path)));
                render_table(w, path, sub, order);
                path.pop();
            }
            Value::Array(items) if is_array_of_tables(value) => {
                path.push(key.clone());
                for item in items {
                    if let Value::Table(sub) = item {
                        if !w.is_empty() {
                            w.blank();
                        }
                        w.line(&format!("[[{}]]", format_key_path(path)));
                        render_table(w, path, sub, order);
                    }
                }
                path.pop();
            }
            _ => {}
        }
    }
}

fn inline_value(value: &Value) -> String {
    match value {
        Value::String(s) => primitives::escape_and_quote(s),
        Value::Integer(i) => primitives::format_integer(*i),
        Value::Float(f) => primitives::format_float(*f),
        Value::Bool(b) => primitives::format_bool(*b).to_string(),
        Value::TimeOfDay(t) => primitives::format_time(t),
        Value::ZonedTime(dt) => primitives::format_zoned_datetime(dt),
        Value::LocalDateTime(dt) => primitives::format_local_datetime(dt),
        Value::LocalDate(d) => primitives::format_date(d),
        Value::Array(items) => {
            let mut out = String::from("[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&inline_value(item));
            }
            out.push(']');
            out
        }
        Value::Table(t) => {
            let mut out = String::from("{");
            for (i, (k, v)) in t.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&format_key(k));
                out.push_str(" = ");
                out.push_str(&inline_value(v));
            }
            out.push('}');
            out
        }
    }
}

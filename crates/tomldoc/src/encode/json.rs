//! toml-test tagged JSON encoding.
//!
//! Every scalar becomes `{"type": T, "value": S}` with `S` the TOML literal
//! rendering of the value; tables and arrays recurse. This is the fixture
//! format of the BurntSushi/toml-test conformance suite.

use serde_json::{json, Map, Value as Json};

use crate::encode::primitives;
use crate::value::{Table, Value};

pub fn to_tagged_json(table: &Table) -> Json {
    Json::Object(table_to_json(table))
}

fn table_to_json(table: &Table) -> Map<String, Json> {
    table
        .iter()
        .map(|(k, v)| (k.clone(), value_to_json(v)))
        .collect()
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Table(t) => Json::Object(table_to_json(t)),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::String(s) => tagged("string", s.clone()),
        Value::Integer(i) => tagged("integer", primitives::format_integer(*i)),
        Value::Float(f) => tagged("float", primitives::format_float(*f)),
        Value::Bool(b) => tagged("bool", primitives::format_bool(*b).to_string()),
        Value::TimeOfDay(t) => tagged("time-local", primitives::format_time(t)),
        Value::ZonedTime(dt) => tagged("datetime", primitives::format_zoned_datetime(dt)),
        Value::LocalDateTime(dt) => {
            tagged("datetime-local", primitives::format_local_datetime(dt))
        }
        Value::LocalDate(d) => tagged("date-local", primitives::format_date(d)),
    }
}

fn tagged(ty: &str, value: String) -> Json {
    json!({ "type": ty, "value": value })
}

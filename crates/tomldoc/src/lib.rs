#![doc = include_str!("../README.md")]

pub mod ast;
pub mod decode;
pub mod encode;
pub mod error;
mod number;
pub mod semantics;
pub mod value;

pub use crate::error::{Error, Result};
pub use crate::value::{Table, Value};

use std::io::Read;

/// Parse a TOML document into a resolved table.
pub fn from_str(input: &str) -> Result<Table> {
    let exprs = decode::parse(input)?;
    Ok(semantics::resolve(exprs)?)
}

/// Read a whole TOML document from `reader` and parse it.
pub fn from_reader<R: Read>(mut reader: R) -> Result<Table> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    from_str(&buf)
}

/// Render a resolved table back to TOML text, keys in alphabetical order.
pub fn to_string(table: &Table) -> String {
    encode::to_string(table)
}

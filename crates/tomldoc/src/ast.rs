//! Raw syntax model produced by the front-end and consumed by the semantic
//! resolver.
//!
//! Everything here is pre-semantic: keys are dotted segment sequences, inline
//! tables are association lists in source order, and every key segment carries
//! the position it was written at so a later conflict can point back to it.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// A 1-based line/column source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A value paired with the position it was parsed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<T> {
    pub pos: Pos,
    pub item: T,
}

impl<T> Located<T> {
    pub fn new(pos: Pos, item: T) -> Self {
        Self { pos, item }
    }
}

/// A dotted key: one or more located segments. Never empty.
pub type Key = Vec<Located<String>>;

/// A raw value as written in the document, before table resolution.
///
/// Scalars are already decoded to their typed forms; only the table shape is
/// still syntactic. `Table` preserves association-list order because inline
/// table key conflicts are reported in source terms.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Integer(i64),
    Float(f64),
    Bool(bool),
    String(String),
    TimeOfDay(NaiveTime),
    ZonedTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
    LocalDate(NaiveDate),
    Array(Vec<Val>),
    Table(Vec<(Key, Val)>),
}

/// One top-level expression of a TOML document.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `key.path = value`
    KeyVal(Key, Val),
    /// `[key.path]`
    TableHeader(Key),
    /// `[[key.path]]`
    ArrayTableHeader(Key),
}

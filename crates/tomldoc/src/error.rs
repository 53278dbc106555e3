use std::fmt;
use std::io;

use thiserror::Error;

use crate::ast::{Located, Pos};
use crate::encode::primitives::format_key;

/// Why a key interaction was rejected during table resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// The key already holds a value (or an inline table, which is a value).
    AlreadyAssigned,
    /// The key names a table that is closed to further extension.
    ClosedTable,
    /// `[[k]]` used on a key that is already implicitly a plain table.
    ImplicitlyTable,
}

/// A located table-resolution error. The key is the single segment the
/// conflict was detected at, not the whole dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    pub key: String,
    pub kind: SemanticErrorKind,
}

impl SemanticError {
    pub fn new(key: impl Into<String>, kind: SemanticErrorKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = format_key(&self.key);
        match self.kind {
            SemanticErrorKind::AlreadyAssigned => {
                write!(f, "key error: {key} is already assigned")
            }
            SemanticErrorKind::ClosedTable => {
                write!(f, "key error: {key} is a closed table")
            }
            SemanticErrorKind::ImplicitlyTable => {
                write!(f, "key error: {key} is already implicitly defined to be a table")
            }
        }
    }
}

impl fmt::Display for Located<SemanticError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.item)
    }
}

impl std::error::Error for Located<SemanticError> {}

/// One step of a decoder scope path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeStep {
    Key(String),
    Index(usize),
}

/// A message from the value-to-domain decoder, scoped to the location in the
/// value tree it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchMessage {
    pub scope: Vec<ScopeStep>,
    pub text: String,
}

impl fmt::Display for MatchMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in top", self.text)?;
        for step in &self.scope {
            match step {
                ScopeStep::Key(k) => write!(f, ".{}", format_key(k))?,
                ScopeStep::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

/// Crate-level error: I/O, syntax, or table resolution.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{pos}: parse error: {message}")]
    Syntax { pos: Pos, message: String },

    #[error("{0}")]
    Semantic(#[from] Located<SemanticError>),
}

pub type Result<T> = std::result::Result<T, Error>;

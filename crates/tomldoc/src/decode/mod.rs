//! Syntactic front-end: TOML text to the flat expression stream.

mod cursor;
mod datetime;
mod parser;

use crate::ast::Expr;
use crate::error::Error;

/// Parse a document into its top-level expressions, in source order.
/// Key interactions between expressions are not checked here; that is the
/// resolver's job.
pub fn parse(input: &str) -> Result<Vec<Expr>, Error> {
    parser::Parser::new(input).parse_document()
}

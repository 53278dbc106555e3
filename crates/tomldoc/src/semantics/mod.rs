//! Semantic resolution: from a flat expression stream to one table tree.
//!
//! TOML's table-definition rules hinge on *how* each intermediate table came
//! into existence: `[a.b]` implicitly opens `a` for later headers, a dotted
//! assignment `x.y = 1` opens `x` only for siblings in the same block, and
//! inline tables are closed the moment they are written. The resolver tracks
//! that provenance in a frame tree ([`frame`]) while the document is folded
//! in, and collapses it to plain values at the end.

mod assign;
mod frame;
mod section;

use crate::ast::{Expr, Key, Located, Val};
use crate::error::SemanticError;
use crate::semantics::frame::FrameMap;
use crate::semantics::section::{apply_block, open_section};
use crate::value::Table;

/// Whether a section was opened with `[...]` or `[[...]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Table,
    ArrayTable,
}

type KeyValBlock = Vec<(Key, Val)>;

/// Resolve an expression stream into a single table, or fail at the first
/// (leftmost in source order) ill-formed key interaction.
pub fn resolve(exprs: Vec<Expr>) -> Result<Table, Located<SemanticError>> {
    let (top, sections) = gather(exprs);
    let mut root = FrameMap::new();
    apply_block(&mut root, top)?;
    for (kind, header, kvs) in sections {
        open_section(&mut root, kind, &header, kvs)?;
    }
    Ok(frame::finalize(root))
}

/// Partition the expression stream into the top-level key/value block and the
/// sequence of sections, preserving source order throughout.
fn gather(exprs: Vec<Expr>) -> (KeyValBlock, Vec<(SectionKind, Key, KeyValBlock)>) {
    let mut top = Vec::new();
    let mut sections: Vec<(SectionKind, Key, KeyValBlock)> = Vec::new();
    for expr in exprs {
        match expr {
            Expr::KeyVal(key, val) => match sections.last_mut() {
                Some((_, _, block)) => block.push((key, val)),
                None => top.push((key, val)),
            },
            Expr::TableHeader(key) => sections.push((SectionKind::Table, key, Vec::new())),
            Expr::ArrayTableHeader(key) => {
                sections.push((SectionKind::ArrayTable, key, Vec::new()));
            }
        }
    }
    (top, sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Pos;

    fn seg(s: &str) -> Located<String> {
        Located::new(Pos { line: 1, col: 1 }, s.to_string())
    }

    #[test]
    fn gather_splits_top_block_from_sections() {
        let exprs = vec![
            Expr::KeyVal(vec![seg("a")], Val::Integer(1)),
            Expr::TableHeader(vec![seg("t")]),
            Expr::KeyVal(vec![seg("b")], Val::Integer(2)),
            Expr::ArrayTableHeader(vec![seg("u")]),
            Expr::KeyVal(vec![seg("c")], Val::Integer(3)),
        ];
        let (top, sections) = gather(exprs);
        assert_eq!(top.len(), 1);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].0, SectionKind::Table);
        assert_eq!(sections[0].2.len(), 1);
        assert_eq!(sections[1].0, SectionKind::ArrayTable);
        assert_eq!(sections[1].2.len(), 1);
    }

    #[test]
    fn kvs_attach_to_the_most_recent_section() {
        let exprs = vec![
            Expr::TableHeader(vec![seg("t")]),
            Expr::KeyVal(vec![seg("x")], Val::Integer(1)),
            Expr::KeyVal(vec![seg("y")], Val::Integer(2)),
        ];
        let (top, sections) = gather(exprs);
        assert!(top.is_empty());
        assert_eq!(sections[0].2.len(), 2);
    }
}

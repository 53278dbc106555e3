//! Dotted-key assignment and inline-table conversion.

use std::collections::btree_map::Entry;

use crate::ast::{Key, Located, Val};
use crate::error::{SemanticError, SemanticErrorKind};
use crate::semantics::frame::{Frame, FrameKind, FrameMap};
use crate::value::{Table, Value};

pub(crate) type SemResult<T> = Result<T, Located<SemanticError>>;

pub(crate) fn key_error(seg: &Located<String>, kind: SemanticErrorKind) -> Located<SemanticError> {
    Located::new(seg.pos, SemanticError::new(seg.item.clone(), kind))
}

/// Install one `key.path = value` into a frame map.
///
/// Intermediate tables created or traversed here are (re)labelled `Dotted`:
/// the assignment's provenance is dotted even when its spine was previously
/// opened by a header, and the sealing pass at the end of the block relies on
/// that label.
pub(crate) fn assign(map: &mut FrameMap, key: &[Located<String>], val: Val) -> SemResult<()> {
    let (k, rest) = match key.split_first() {
        Some(parts) => parts,
        None => unreachable!("empty dotted key"),
    };

    if rest.is_empty() {
        return match map.entry(k.item.clone()) {
            Entry::Occupied(_) => Err(key_error(k, SemanticErrorKind::AlreadyAssigned)),
            Entry::Vacant(slot) => {
                slot.insert(Frame::Value(val_to_value(val)?));
                Ok(())
            }
        };
    }

    match map.get_mut(&k.item) {
        None => {
            let mut sub = FrameMap::new();
            assign(&mut sub, rest, val)?;
            map.insert(k.item.clone(), Frame::Table(FrameKind::Dotted, sub));
            Ok(())
        }
        Some(Frame::Table(kind @ (FrameKind::Open | FrameKind::Dotted), sub)) => {
            assign(sub, rest, val)?;
            *kind = FrameKind::Dotted;
            Ok(())
        }
        Some(Frame::Table(FrameKind::Closed, _)) | Some(Frame::Array(_)) => {
            Err(key_error(k, SemanticErrorKind::ClosedTable))
        }
        Some(Frame::Value(_)) => Err(key_error(k, SemanticErrorKind::AlreadyAssigned)),
    }
}

/// Convert a raw value to its resolved form. Inline tables go through the
/// conflict check and come out as plain value tables, closed to extension.
pub(crate) fn val_to_value(val: Val) -> SemResult<Value> {
    Ok(match val {
        Val::Integer(i) => Value::Integer(i),
        Val::Float(f) => Value::Float(f),
        Val::Bool(b) => Value::Bool(b),
        Val::String(s) => Value::String(s),
        Val::TimeOfDay(t) => Value::TimeOfDay(t),
        Val::ZonedTime(dt) => Value::ZonedTime(dt),
        Val::LocalDateTime(dt) => Value::LocalDateTime(dt),
        Val::LocalDate(d) => Value::LocalDate(d),
        Val::Array(items) => Value::Array(
            items
                .into_iter()
                .map(val_to_value)
                .collect::<SemResult<Vec<_>>>()?,
        ),
        Val::Table(kvs) => Value::Table(inline_table_to_value(kvs)?),
    })
}

/// Resolve one `{...}` literal: convert entries, reject overlapping dotted
/// prefixes within the literal, then merge the survivors into a single table.
pub(crate) fn inline_table_to_value(kvs: Vec<(Key, Val)>) -> SemResult<Table> {
    let mut converted = Vec::with_capacity(kvs.len());
    for (key, val) in kvs {
        let value = val_to_value(val)?;
        converted.push((key, value));
    }

    if let Some(seg) = overlapping_key(&converted) {
        return Err(Located::new(
            seg.pos,
            SemanticError::new(seg.item.clone(), SemanticErrorKind::AlreadyAssigned),
        ));
    }

    let mut table = Table::new();
    for (key, value) in converted {
        insert_nested(&mut table, &key, value);
    }
    Ok(table)
}

/// Find the first conflicting key segment in lexicographic key order.
///
/// Two keys conflict when one is a prefix of the other (identical keys
/// included). After sorting, any such pair is adjacent; the reported segment
/// is the later key's segment at the point where the shorter key ends.
fn overlapping_key(kvs: &[(Key, Value)]) -> Option<Located<String>> {
    let mut keys: Vec<&Key> = kvs.iter().map(|(k, _)| k).collect();
    keys.sort_by(|a, b| {
        a.iter()
            .map(|s| s.item.as_str())
            .cmp(b.iter().map(|s| s.item.as_str()))
    });
    for pair in keys.windows(2) {
        let (shorter, longer) = (pair[0], pair[1]);
        if shorter.len() <= longer.len()
            && shorter
                .iter()
                .zip(longer.iter())
                .all(|(a, b)| a.item == b.item)
        {
            return Some(longer[shorter.len() - 1].clone());
        }
    }
    None
}

fn insert_nested(table: &mut Table, key: &[Located<String>], value: Value) {
    let (k, rest) = match key.split_first() {
        Some(parts) => parts,
        None => unreachable!("empty dotted key"),
    };
    if rest.is_empty() {
        table.insert(k.item.clone(), value);
        return;
    }
    let slot = table
        .entry(k.item.clone())
        .or_insert_with(|| Value::Table(Table::new()));
    match slot {
        Value::Table(sub) => insert_nested(sub, rest, value),
        _ => unreachable!("overlapping inline-table keys survived the prefix check"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Pos;

    fn seg(s: &str, col: usize) -> Located<String> {
        Located::new(Pos { line: 1, col }, s.to_string())
    }

    fn key(segs: &[(&str, usize)]) -> Key {
        segs.iter().map(|(s, c)| seg(s, *c)).collect()
    }

    #[test]
    fn dotted_assignment_creates_intermediates() {
        let mut map = FrameMap::new();
        assign(
            &mut map,
            &key(&[("a", 1), ("b", 3), ("c", 5)]),
            Val::Integer(1),
        )
        .unwrap();

        let Some(Frame::Table(FrameKind::Dotted, sub)) = map.get("a") else {
            panic!("expected dotted frame for a");
        };
        let Some(Frame::Table(FrameKind::Dotted, sub)) = sub.get("b") else {
            panic!("expected dotted frame for b");
        };
        assert_eq!(sub.get("c"), Some(&Frame::Value(Value::Integer(1))));
    }

    #[test]
    fn reassigning_a_key_is_rejected_at_its_position() {
        let mut map = FrameMap::new();
        assign(&mut map, &key(&[("a", 1)]), Val::Integer(1)).unwrap();
        let err = assign(&mut map, &key(&[("a", 9)]), Val::Integer(2)).unwrap_err();
        assert_eq!(err.pos.col, 9);
        assert_eq!(err.item.kind, SemanticErrorKind::AlreadyAssigned);
    }

    #[test]
    fn traversing_an_open_frame_demotes_it_to_dotted() {
        let mut map = FrameMap::new();
        map.insert(
            "a".into(),
            Frame::Table(FrameKind::Open, FrameMap::new()),
        );
        assign(&mut map, &key(&[("a", 1), ("b", 3)]), Val::Bool(true)).unwrap();
        let Some(Frame::Table(kind, _)) = map.get("a") else {
            panic!("expected table frame");
        };
        assert_eq!(*kind, FrameKind::Dotted);
    }

    #[test]
    fn inline_table_prefix_overlap_reports_the_shared_segment() {
        // {a.b = 1, a.b.c = 2} conflicts at the b inside a.b.c
        let kvs = vec![
            (key(&[("a", 6), ("b", 8)]), Val::Integer(1)),
            (key(&[("a", 15), ("b", 17), ("c", 19)]), Val::Integer(2)),
        ];
        let err = inline_table_to_value(kvs).unwrap_err();
        assert_eq!(err.item.key, "b");
        assert_eq!(err.pos.col, 17);
        assert_eq!(err.item.kind, SemanticErrorKind::AlreadyAssigned);
    }

    #[test]
    fn inline_table_duplicate_keys_are_rejected() {
        let kvs = vec![
            (key(&[("a", 6)]), Val::Integer(1)),
            (key(&[("a", 13)]), Val::Integer(2)),
        ];
        let err = inline_table_to_value(kvs).unwrap_err();
        assert_eq!(err.item.key, "a");
        assert_eq!(err.item.kind, SemanticErrorKind::AlreadyAssigned);
    }

    #[test]
    fn diverging_dotted_keys_merge_cleanly() {
        let kvs = vec![
            (key(&[("a", 6), ("b", 8)]), Val::Integer(1)),
            (key(&[("a", 15), ("c", 17)]), Val::Integer(2)),
        ];
        let table = inline_table_to_value(kvs).unwrap();
        let Some(Value::Table(a)) = table.get("a") else {
            panic!("expected table for a");
        };
        assert_eq!(a.get("b"), Some(&Value::Integer(1)));
        assert_eq!(a.get("c"), Some(&Value::Integer(2)));
    }
}

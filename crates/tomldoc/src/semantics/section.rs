//! Section opening: `[table]` and `[[array-of-tables]]` headers.

use crate::ast::{Key, Located, Val};
use crate::error::SemanticErrorKind;
use crate::semantics::assign::{assign, key_error, SemResult};
use crate::semantics::frame::{seal_dotted, Frame, FrameKind, FrameMap};
use crate::semantics::SectionKind;
use crate::value::Value;

/// Install one section: walk the header key, creating `Open` supertables as
/// needed, then define the terminal table (or append an array element) and
/// absorb the section's key/value block into it.
pub(crate) fn open_section(
    map: &mut FrameMap,
    kind: SectionKind,
    header: &[Located<String>],
    kvs: Vec<(Key, Val)>,
) -> SemResult<()> {
    let (k, rest) = match header.split_first() {
        Some(parts) => parts,
        None => unreachable!("empty header key"),
    };

    if !rest.is_empty() {
        return match map.get_mut(&k.item) {
            None => {
                let mut sub = FrameMap::new();
                open_section(&mut sub, kind, rest, kvs)?;
                map.insert(k.item.clone(), Frame::Table(FrameKind::Open, sub));
                Ok(())
            }
            // Existing tables keep their provenance; only the terminal
            // segment changes anything about the frame it lands on.
            Some(Frame::Table(_, sub)) => open_section(sub, kind, rest, kvs),
            // A header under `[[x]]` extends the most recently appended
            // element.
            Some(Frame::Array(elems)) => match elems.last_mut() {
                Some(last) => open_section(last, kind, rest, kvs),
                None => unreachable!("empty array of tables"),
            },
            Some(Frame::Value(_)) => Err(key_error(k, SemanticErrorKind::AlreadyAssigned)),
        };
    }

    match map.get_mut(&k.item) {
        None => {
            let mut sub = FrameMap::new();
            apply_block(&mut sub, kvs)?;
            let frame = match kind {
                SectionKind::Table => Frame::Table(FrameKind::Closed, sub),
                SectionKind::ArrayTable => Frame::Array(vec![sub]),
            };
            map.insert(k.item.clone(), frame);
            Ok(())
        }
        Some(Frame::Table(frame_kind, sub)) => match (*frame_kind, kind) {
            // Promote the implicit supertable to an explicitly defined one.
            (FrameKind::Open, SectionKind::Table) => {
                apply_block(sub, kvs)?;
                *frame_kind = FrameKind::Closed;
                Ok(())
            }
            (FrameKind::Open, SectionKind::ArrayTable) => {
                Err(key_error(k, SemanticErrorKind::ImplicitlyTable))
            }
            (FrameKind::Closed, _) => Err(key_error(k, SemanticErrorKind::ClosedTable)),
            (FrameKind::Dotted, _) => {
                unreachable!("dotted frame escaped the block that created it")
            }
        },
        Some(Frame::Array(elems)) => match kind {
            SectionKind::ArrayTable => {
                let mut sub = FrameMap::new();
                apply_block(&mut sub, kvs)?;
                elems.push(sub);
                Ok(())
            }
            SectionKind::Table => Err(key_error(k, SemanticErrorKind::ClosedTable)),
        },
        // Table-shaped value frames are inline tables, closed by
        // construction; other values are plain reassignment conflicts.
        Some(Frame::Value(Value::Table(_))) => {
            Err(key_error(k, SemanticErrorKind::ClosedTable))
        }
        Some(Frame::Value(_)) => Err(key_error(k, SemanticErrorKind::AlreadyAssigned)),
    }
}

/// Fold a key/value block into a frame map, then seal the dotted frames the
/// block created. After sealing, the same paths are closed tables for every
/// later expression.
pub(crate) fn apply_block(map: &mut FrameMap, kvs: Vec<(Key, Val)>) -> SemResult<()> {
    for (key, val) in kvs {
        assign(map, &key, val)?;
    }
    seal_dotted(map);
    Ok(())
}

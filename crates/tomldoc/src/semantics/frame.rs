//! Construction-time table frames.
//!
//! While a document is being absorbed, every intermediate table remembers how
//! it came into existence. That provenance is what decides whether a later
//! header or dotted key may extend it, and it is erased by [`finalize`] once
//! the whole document has been folded in.

use std::collections::BTreeMap;

use crate::value::{Table, Value};

pub(crate) type FrameMap = BTreeMap<String, Frame>;

/// How a table frame came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    /// Created implicitly as a supertable by a deeper `[a.b.c]` header.
    /// Still extendable by later headers.
    Open,
    /// Created implicitly by a dotted-key assignment in the current block.
    /// Extendable by sibling dotted keys until the block ends, then sealed.
    Dotted,
    /// Created by an explicit header, or a sealed dotted subtree. Further
    /// headers or dotted keys targeting it are errors.
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Frame {
    Table(FrameKind, FrameMap),
    /// `[[x]]` array of tables. Never empty; the most recently appended
    /// element is last.
    Array(Vec<FrameMap>),
    /// A finished value: a scalar, an inline array, or an inline table.
    /// Inline tables land here rather than as a closed table frame; the
    /// section opener treats table-shaped values as closed tables and
    /// everything else as a plain reassignment conflict.
    Value(Value),
}

/// Close every dotted frame at the end of the block that created it.
/// Idempotent; frames with other kinds pass through untouched.
pub(crate) fn seal_dotted(map: &mut FrameMap) {
    for frame in map.values_mut() {
        if let Frame::Table(kind, sub) = frame {
            if *kind == FrameKind::Dotted {
                *kind = FrameKind::Closed;
                seal_dotted(sub);
            }
        }
    }
}

/// Collapse a frame map into a plain value table. Provenance is irrelevant
/// from here on; array-of-tables elements are already in source order.
pub(crate) fn finalize(map: FrameMap) -> Table {
    map.into_iter()
        .map(|(key, frame)| (key, finalize_frame(frame)))
        .collect()
}

fn finalize_frame(frame: Frame) -> Value {
    match frame {
        Frame::Value(v) => v,
        Frame::Table(_, sub) => Value::Table(finalize(sub)),
        Frame::Array(elems) => Value::Array(
            elems
                .into_iter()
                .map(|m| Value::Table(finalize(m)))
                .collect(),
        ),
    }
}

use serde::Serialize;
use uuid::Uuid;

use crate::node::inline::{InlineMarkerPair, InlineNode};
use crate::node::{LEADING_NATIVE_PREFIX, TRAILING_NATIVE_PREFIX};
use crate::range::Range;
use crate::text::scanner::Scanner;

const DELIMITER: &str = "doc-heading";

/// The document title block: `⧙doc-heading-<id>⧘<text>`.
///
/// Carries an opaque unique id in its native prefix. Only recognized on the
/// first line of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub range: Range,
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub id: String,
    pub id_range: Range,
    pub subnodes: Vec<InlineNode>,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl Title {
    /// Parses a raw line. `range` is the line's absolute backing span.
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        let mut scanner = Scanner::new(line);
        if !scanner.scan_char(LEADING_NATIVE_PREFIX) {
            return None;
        }
        if !scanner.scan_str(DELIMITER) || !scanner.scan_char('-') {
            return None;
        }
        let id_rel = scanner.scan_up_to(TRAILING_NATIVE_PREFIX)?;
        if id_rel.is_empty() {
            return None;
        }
        if !scanner.scan_char(TRAILING_NATIVE_PREFIX) {
            return None;
        }
        let prefix_len = scanner.pos();

        Some(Self {
            range,
            native_prefix_range: Range::new(range.location, prefix_len),
            visible_range: Range::new(range.location + prefix_len, range.length - prefix_len),
            id: String::from_utf16_lossy(&line[id_rel.location..id_rel.max()]),
            id_range: id_rel.offset(range.location as isize),
            subnodes: vec![],
            inline_marker_pairs: vec![],
        })
    }

    /// The backing-string form for a title with the given id.
    #[must_use]
    pub fn native_representation(id: &str, text: &str) -> String {
        format!("{LEADING_NATIVE_PREFIX}{DELIMITER}-{id}{TRAILING_NATIVE_PREFIX}{text}")
    }

    /// The backing-string form for a brand-new title, with a freshly
    /// generated id.
    #[must_use]
    pub fn native_representation_with_new_id(text: &str) -> String {
        Self::native_representation(&Uuid::new_v4().simple().to_string(), text)
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            native_prefix_range: self.native_prefix_range.offset(delta),
            visible_range: self.visible_range.offset(delta),
            id: self.id.clone(),
            id_range: self.id_range.offset(delta),
            subnodes: self.subnodes.iter().map(|n| n.offset(delta)).collect(),
            inline_marker_pairs: self
                .inline_marker_pairs
                .iter()
                .map(|p| p.offset(delta))
                .collect(),
        }
    }
}

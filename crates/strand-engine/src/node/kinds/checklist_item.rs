use serde::Serialize;

use crate::node::inline::{InlineMarkerPair, InlineNode};
use crate::node::{Indentation, LEADING_NATIVE_PREFIX, TRAILING_NATIVE_PREFIX};
use crate::range::Range;
use crate::text::scanner::Scanner;

const DELIMITER: &str = "checklist";

/// Checked state of a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistState {
    Unchecked,
    Checked,
}

impl ChecklistState {
    fn from_unit(unit: u16) -> Option<Self> {
        match unit {
            u if u == u16::from(b' ') => Some(ChecklistState::Unchecked),
            u if u == u16::from(b'x') => Some(ChecklistState::Checked),
            _ => None,
        }
    }

    fn marker(self) -> char {
        match self {
            ChecklistState::Unchecked => ' ',
            ChecklistState::Checked => 'x',
        }
    }
}

/// A checklist item: `⧙checklist-<d>⧘-[ ] <text>` or `-[x]` when checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub range: Range,
    /// Covers the delimited tag and the `-[ ] ` marker.
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub indentation: Indentation,
    pub indentation_range: Range,
    pub state: ChecklistState,
    /// The single unit between the brackets.
    pub state_range: Range,
    pub subnodes: Vec<InlineNode>,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl ChecklistItem {
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        let mut scanner = Scanner::new(line);
        if !scanner.scan_char(LEADING_NATIVE_PREFIX)
            || !scanner.scan_str(DELIMITER)
            || !scanner.scan_char('-')
        {
            return None;
        }
        let indentation_location = scanner.pos();
        let indentation = Indentation(scanner.scan_digit()?);
        if !scanner.scan_char(TRAILING_NATIVE_PREFIX) || !scanner.scan_str("-[") {
            return None;
        }
        let state_location = scanner.pos();
        let state = ChecklistState::from_unit(scanner.peek()?)?;
        scanner.bump();
        if !scanner.scan_str("] ") {
            return None;
        }
        let prefix_len = scanner.pos();

        Some(Self {
            range,
            native_prefix_range: Range::new(range.location, prefix_len),
            visible_range: Range::new(range.location + prefix_len, range.length - prefix_len),
            indentation,
            indentation_range: Range::new(range.location + indentation_location, 1),
            state,
            state_range: Range::new(range.location + state_location, 1),
            subnodes: vec![],
            inline_marker_pairs: vec![],
        })
    }

    #[must_use]
    pub fn native_representation(
        indentation: Indentation,
        state: ChecklistState,
        text: &str,
    ) -> String {
        format!(
            "{LEADING_NATIVE_PREFIX}{DELIMITER}-{}{TRAILING_NATIVE_PREFIX}-[{}] {text}",
            indentation.0,
            state.marker()
        )
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            native_prefix_range: self.native_prefix_range.offset(delta),
            visible_range: self.visible_range.offset(delta),
            indentation: self.indentation,
            indentation_range: self.indentation_range.offset(delta),
            state: self.state,
            state_range: self.state_range.offset(delta),
            subnodes: self.subnodes.iter().map(|n| n.offset(delta)).collect(),
            inline_marker_pairs: self
                .inline_marker_pairs
                .iter()
                .map(|p| p.offset(delta))
                .collect(),
        }
    }
}

//! Diffing between document snapshots.
//!
//! An edit produces a whole new snapshot; the change engine compares the two
//! and reduces the difference to one contiguous block replacement plus one
//! contiguous presentation-string replacement, each found by trimming the
//! common prefix and suffix.

use log::debug;
use thiserror::Error;

use crate::document::Document;
use crate::node::BlockNode;
use crate::range::Range;
use crate::text::Text;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("replacement range {location}+{length} exceeds backing length {backing_length}")]
    RangeOutOfBounds {
        location: usize,
        length: usize,
        backing_length: usize,
    },
}

/// A contiguous replacement in one of the two strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringChange {
    pub range: Range,
    pub replacement: String,
}

/// A replacement of a run of blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockChange {
    /// The replaced run, as indices into the before snapshot's blocks.
    pub indexes: std::ops::Range<usize>,
    /// The after snapshot's blocks taking the run's place.
    pub replacement: Vec<BlockNode>,
}

/// Everything that differs between two snapshots after one backing edit.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    pub before: Document,
    pub after: Document,
    /// `None` when the edit left the block tree equivalent.
    pub block_change: Option<BlockChange>,
    /// The edit as applied to the backing string.
    pub backing_change: StringChange,
    /// `None` when the presentation string is unchanged, as happens when the
    /// edit only touched hidden text.
    pub presentation_change: Option<StringChange>,
}

/// Applies `replacement` over `range` of the backing string and diffs the
/// resulting snapshot against `before`. Nothing is mutated; on error no
/// snapshot is built.
pub fn compute_change(
    before: &Document,
    range: Range,
    replacement: &str,
) -> Result<DocumentChange, EditError> {
    if range.max() > before.backing().len() {
        return Err(EditError::RangeOutOfBounds {
            location: range.location,
            length: range.length,
            backing_length: before.backing().len(),
        });
    }
    debug!(
        "computing change: {}+{} -> {} units",
        range.location,
        range.length,
        replacement.encode_utf16().count()
    );

    let after = Document::from_text(before.backing().replacing(range, replacement));
    let block_change = diff_blocks(before, &after);
    let presentation_change = diff_text(before.presentation(), after.presentation());

    Ok(DocumentChange {
        before: before.clone(),
        block_change,
        backing_change: StringChange {
            range,
            replacement: replacement.to_string(),
        },
        presentation_change,
        after,
    })
}

/// Trims equivalent blocks off both ends; whatever is left in the middle is
/// the replacement. `None` when the trees are equivalent throughout.
fn diff_blocks(before: &Document, after: &Document) -> Option<BlockChange> {
    let old = before.blocks();
    let new = after.blocks();

    let mut prefix = 0;
    while prefix < old.len()
        && prefix < new.len()
        && equivalent(before, &old[prefix], after, &new[prefix])
    {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < old.len() - prefix
        && suffix < new.len() - prefix
        && equivalent(
            before,
            &old[old.len() - 1 - suffix],
            after,
            &new[new.len() - 1 - suffix],
        )
    {
        suffix += 1;
    }

    if prefix == old.len() && prefix == new.len() {
        return None;
    }
    Some(BlockChange {
        indexes: prefix..old.len() - suffix,
        replacement: new[prefix..new.len() - suffix].to_vec(),
    })
}

/// Location-independent block equivalence: same kind, same length, same
/// source text, plus the attributes a listener renders from.
fn equivalent(before: &Document, a: &BlockNode, after: &Document, b: &BlockNode) -> bool {
    if std::mem::discriminant(a) != std::mem::discriminant(b) {
        return false;
    }
    if a.range().length != b.range().length {
        return false;
    }
    if a.position() != b.position() {
        return false;
    }
    if let (BlockNode::CodeBlock(x), BlockNode::CodeBlock(y)) = (a, b) {
        if x.line_number != y.line_number {
            return false;
        }
    }
    if let (BlockNode::OrderedListItem(x), BlockNode::OrderedListItem(y)) = (a, b) {
        if x.number != y.number {
            return false;
        }
    }
    before.backing().slice(a.range()) == after.backing().slice(b.range())
}

/// The minimal contiguous replacement turning `old` into `new`, found by
/// trimming the common prefix and suffix. `None` when equal.
fn diff_text(old: &Text, new: &Text) -> Option<StringChange> {
    if old == new {
        return None;
    }
    let a = old.units();
    let b = new.units();

    let mut prefix = 0;
    while prefix < a.len() && prefix < b.len() && a[prefix] == b[prefix] {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < a.len() - prefix
        && suffix < b.len() - prefix
        && a[a.len() - 1 - suffix] == b[b.len() - 1 - suffix]
    {
        suffix += 1;
    }

    Some(StringChange {
        range: Range::new(prefix, a.len() - prefix - suffix),
        replacement: String::from_utf16_lossy(&b[prefix..b.len() - suffix]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_out_of_bounds_range() {
        let doc = Document::new("Hello");
        assert_eq!(
            Err(EditError::RangeOutOfBounds {
                location: 4,
                length: 3,
                backing_length: 5
            }),
            compute_change(&doc, Range::new(4, 3), "x")
        );
    }

    #[test]
    fn edit_within_one_block_replaces_that_block() {
        let doc = Document::new("⧙doc-heading-fake-uuid⧘Title\nOne\nTwo");
        let change = compute_change(&doc, Range::new(30, 1), "u").unwrap();
        let block_change = change.block_change.unwrap();
        assert_eq!(1..2, block_change.indexes);
        assert_eq!(1, block_change.replacement.len());
        assert_eq!(
            Some(StringChange {
                range: Range::new(7, 1),
                replacement: "u".to_string()
            }),
            change.presentation_change
        );
    }

    #[test]
    fn deleting_a_separator_merges_blocks() {
        let doc = Document::new("⧙doc-heading-fake-uuid⧘Title\nOne\nTwo");
        let change = compute_change(&doc, Range::new(32, 1), "").unwrap();
        let block_change = change.block_change.unwrap();
        assert_eq!(1..3, block_change.indexes);
        assert_eq!(1, block_change.replacement.len());
        assert_eq!(Range::new(29, 6), block_change.replacement[0].range());
        assert_eq!(
            Some(StringChange {
                range: Range::new(9, 1),
                replacement: String::new()
            }),
            change.presentation_change
        );
    }

    #[test]
    fn identical_replacement_changes_nothing() {
        let doc = Document::new("⧙doc-heading-fake-uuid⧘Title\nOne");
        let change = compute_change(&doc, Range::new(29, 3), "One").unwrap();
        assert_eq!(None, change.block_change);
        assert_eq!(None, change.presentation_change);
        assert_eq!(doc, change.after);
    }

    #[test]
    fn editing_hidden_text_changes_no_presentation() {
        let doc = Document::new("⧙doc-heading-fake-uuid⧘Title");
        // Rewrite the title id in place; the visible text stays the same.
        let change = compute_change(&doc, Range::new(13, 9), "same-size").unwrap();
        assert!(change.block_change.is_some());
        assert_eq!(None, change.presentation_change);
    }

    #[test]
    fn code_renumbering_defeats_suffix_trim() {
        let doc = Document::new("⧙code⧘a\n⧙code⧘b");
        let change = compute_change(&doc, Range::new(0, 8), "").unwrap();
        let block_change = change.block_change.unwrap();
        // The surviving line is renumbered from 2 to 1, so it is not
        // equivalent to its old self.
        assert_eq!(0..2, block_change.indexes);
        assert_eq!(1, block_change.replacement.len());
    }

    #[test]
    fn growing_a_block_in_place_is_a_single_replacement() {
        let doc = Document::new("⧙doc-heading-fake-uuid⧘Title\nOne\nTwo");
        let change = compute_change(&doc, Range::new(32, 0), "!").unwrap();
        let block_change = change.block_change.unwrap();
        assert_eq!(1..2, block_change.indexes);
        assert_eq!("⧙doc-heading-fake-uuid⧘Title\nOne!\nTwo", change.after.backing_string());
    }
}

//! Owns a document snapshot and turns backing edits into ordered events.
//!
//! Listeners that mirror the block list (an editor's row model, say) can
//! apply the events of one edit in emission order and always end up
//! consistent with the new snapshot: removals arrive in descending index
//! order and insertions in ascending order, so each index is valid at the
//! moment its event is applied.

use log::debug;

use crate::change::{self, DocumentChange, EditError, StringChange};
use crate::document::Document;
use crate::node::BlockNode;
use crate::range::Range;

/// One step of applying an edit, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    WillUpdate,
    /// The presentation string changed. Emitted before any block events.
    PresentationReplaced(StringChange),
    /// `index` is valid against the listener's current block list.
    BlockRemoved { index: usize, block: BlockNode },
    BlockInserted { index: usize, block: BlockNode },
    DidUpdate,
}

/// The single mutation entry point over a document.
#[derive(Debug)]
pub struct DocumentController {
    document: Document,
}

impl Default for DocumentController {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentController {
    /// A controller over the blank document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Document::new(""),
        }
    }

    /// A controller over `backing`, with the load replayed as events from
    /// the blank document. The blank document has no blocks, so the events
    /// contain no removals.
    #[must_use]
    pub fn with_backing_string(backing: &str) -> (Self, Vec<ChangeEvent>) {
        let mut controller = Self::new();
        let events = controller
            .replace_backing_range(Range::new(0, 0), backing)
            .expect("zero range is in bounds for the blank document");
        (controller, events)
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Applies one backing edit and returns its events.
    ///
    /// The controller's snapshot is already swapped when this returns, so a
    /// listener may consult `document()` while applying events. On error
    /// nothing changes and no events are produced.
    pub fn replace_backing_range(
        &mut self,
        range: Range,
        replacement: &str,
    ) -> Result<Vec<ChangeEvent>, EditError> {
        let change = change::compute_change(&self.document, range, replacement)?;
        debug!(
            "applying change: {} block(s) -> {} block(s)",
            change.before.blocks().len(),
            change.after.blocks().len()
        );
        self.document = change.after.clone();
        Ok(events_for(&change))
    }
}

fn events_for(change: &DocumentChange) -> Vec<ChangeEvent> {
    let mut events = vec![ChangeEvent::WillUpdate];
    if let Some(presentation) = &change.presentation_change {
        events.push(ChangeEvent::PresentationReplaced(presentation.clone()));
    }
    if let Some(block_change) = &change.block_change {
        for index in block_change.indexes.clone().rev() {
            events.push(ChangeEvent::BlockRemoved {
                index,
                block: change.before.blocks()[index].clone(),
            });
        }
        for (offset, block) in block_change.replacement.iter().enumerate() {
            events.push(ChangeEvent::BlockInserted {
                index: block_change.indexes.start + offset,
                block: block.clone(),
            });
        }
    }
    events.push(ChangeEvent::DidUpdate);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(events: &[ChangeEvent]) -> Vec<String> {
        events
            .iter()
            .map(|event| match event {
                ChangeEvent::WillUpdate => "will".to_string(),
                ChangeEvent::PresentationReplaced(_) => "presentation".to_string(),
                ChangeEvent::BlockRemoved { index, .. } => format!("removed {index}"),
                ChangeEvent::BlockInserted { index, .. } => format!("inserted {index}"),
                ChangeEvent::DidUpdate => "did".to_string(),
            })
            .collect()
    }

    #[test]
    fn initial_load_emits_only_insertions() {
        let (controller, events) =
            DocumentController::with_backing_string("⧙doc-heading-fake-uuid⧘Title\nParagraph");
        assert_eq!(
            vec!["will", "presentation", "inserted 0", "inserted 1", "did"],
            kinds(&events)
        );
        let ChangeEvent::PresentationReplaced(change) = &events[1] else {
            unreachable!()
        };
        assert_eq!(Range::new(0, 0), change.range);
        assert_eq!("Title\nParagraph", change.replacement);
        assert_eq!("Title\nParagraph", controller.document().presentation_string());
    }

    #[test]
    fn merge_emits_descending_removals_then_ascending_insertions() {
        let (mut controller, _) =
            DocumentController::with_backing_string("⧙doc-heading-fake-uuid⧘Title\nOne\nTwo\nThree");
        let events = controller
            .replace_backing_range(Range::new(36, 1), "")
            .unwrap();
        assert_eq!(
            vec!["will", "presentation", "removed 3", "removed 2", "inserted 2", "did"],
            kinds(&events)
        );
    }

    #[test]
    fn hidden_edit_emits_no_presentation_event() {
        let (mut controller, _) =
            DocumentController::with_backing_string("⧙doc-heading-fake-uuid⧘Title");
        let events = controller
            .replace_backing_range(Range::new(13, 9), "same-size")
            .unwrap();
        assert_eq!(
            vec!["will", "removed 0", "inserted 0", "did"],
            kinds(&events)
        );
    }

    #[test]
    fn failed_edit_leaves_the_document_alone() {
        let (mut controller, _) = DocumentController::with_backing_string("Hello");
        let result = controller.replace_backing_range(Range::new(4, 9), "boom");
        assert!(result.is_err());
        assert_eq!("Hello", controller.document().backing_string());
    }

    #[test]
    fn no_op_edit_emits_only_the_bookends() {
        let (mut controller, _) = DocumentController::with_backing_string("Hello");
        let events = controller.replace_backing_range(Range::new(0, 5), "Hello").unwrap();
        assert_eq!(vec!["will", "did"], kinds(&events));
    }
}

//! A listener that mirrors the block list and presentation string purely by
//! applying events must stay consistent with the controller's snapshot after
//! every edit.

use pretty_assertions::assert_eq;
use strand_engine::{BlockNode, ChangeEvent, DocumentController, Range, Text};

struct Mirror {
    blocks: Vec<BlockNode>,
    presentation: Text,
}

impl Mirror {
    fn new() -> Self {
        Self {
            blocks: vec![],
            presentation: Text::new(""),
        }
    }

    fn apply(&mut self, events: &[ChangeEvent]) {
        for event in events {
            match event {
                ChangeEvent::PresentationReplaced(change) => {
                    self.presentation = self
                        .presentation
                        .replacing(change.range, &change.replacement);
                }
                ChangeEvent::BlockRemoved { index, .. } => {
                    self.blocks.remove(*index);
                }
                ChangeEvent::BlockInserted { index, block } => {
                    self.blocks.insert(*index, block.clone());
                }
                ChangeEvent::WillUpdate | ChangeEvent::DidUpdate => {}
            }
        }
    }

    fn assert_consistent(&self, controller: &DocumentController) {
        assert_eq!(
            controller.document().presentation_string(),
            self.presentation.to_string()
        );
        assert_eq!(controller.document().blocks(), self.blocks.as_slice());
    }
}

#[test]
fn mirror_survives_a_realistic_editing_session() {
    let mut mirror = Mirror::new();
    let (mut controller, events) = DocumentController::with_backing_string(
        "⧙doc-heading-fake-uuid⧘Notes\n⧙unordered-list-0⧘- First\nSome prose",
    );
    mirror.apply(&events);
    mirror.assert_consistent(&controller);

    // Type at the end of the prose block.
    let end = controller.document().backing().len();
    let events = controller
        .replace_backing_range(Range::new(end, 0), " here")
        .unwrap();
    mirror.apply(&events);
    mirror.assert_consistent(&controller);

    // Split the prose block in two.
    let events = controller
        .replace_backing_range(Range::new(end - 6, 0), "\n")
        .unwrap();
    mirror.apply(&events);
    mirror.assert_consistent(&controller);

    // Merge the list item into the title line.
    let events = controller
        .replace_backing_range(Range::new(28, 1), "")
        .unwrap();
    mirror.apply(&events);
    mirror.assert_consistent(&controller);

    // Rewrite everything below the title.
    let events = controller
        .replace_backing_range(
            Range::new(28, controller.document().backing().len() - 28),
            "\n⧙checklist-0⧘-[ ] Ship it",
        )
        .unwrap();
    mirror.apply(&events);
    mirror.assert_consistent(&controller);
}

#[test]
fn mirror_handles_attachable_blocks() {
    let mut mirror = Mirror::new();
    let (mut controller, events) = DocumentController::with_backing_string(
        "⧙doc-heading-fake-uuid⧘Title\nBody",
    );
    mirror.apply(&events);
    mirror.assert_consistent(&controller);

    // Insert a horizontal rule between title and body.
    let events = controller
        .replace_backing_range(Range::new(29, 0), "⧙horizontal-rule⧘\u{FFFC}\n")
        .unwrap();
    mirror.apply(&events);
    mirror.assert_consistent(&controller);
    assert_eq!(
        "Title\n\u{FFFC}\nBody",
        controller.document().presentation_string()
    );

    // Delete the rule again, including its separator.
    let events = controller
        .replace_backing_range(Range::new(29, 19), "")
        .unwrap();
    mirror.apply(&events);
    mirror.assert_consistent(&controller);
    assert_eq!("Title\nBody", controller.document().presentation_string());
}

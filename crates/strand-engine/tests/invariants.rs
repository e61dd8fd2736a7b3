//! Structural invariants that must hold for any parsed document.

use pretty_assertions::assert_eq;
use rstest::rstest;
use strand_engine::Document;

#[rstest]
#[case::plain("Just one paragraph")]
#[case::titled("⧙doc-heading-fake-uuid⧘Title\nBody")]
#[case::marked("⧙doc-heading-fake-uuid⧘Hello\nIt's ☊co|x☋way☊Ωco|x☋ good.")]
#[case::attached("⧙doc-heading-fake-uuid⧘Title\n⧙image⧘http://example.com/a.png\nEnd")]
#[case::lists("⧙unordered-list-0⧘- A\n⧙ordered-list-1⧘3. B\n⧙checklist-0⧘-[x] C")]
#[case::code_runs("⧙code-rust⧘a\n⧙code-rust⧘b\nbreak\n⧙code⧘c")]
#[case::trailing_newline("Hello\n")]
#[case::blank_lines("A\n\n\nB")]
#[case::rule("⧙horizontal-rule⧘\u{FFFC}")]
fn block_ranges_tile_the_backing_string(#[case] backing: &str) {
    let doc = Document::new(backing);
    let blocks = doc.blocks();
    assert_eq!(0, blocks[0].range().location);
    assert_eq!(doc.backing().len(), blocks[blocks.len() - 1].range().max());
    for pair in blocks.windows(2) {
        // Exactly one separator newline between siblings, owned by neither.
        assert_eq!(pair[0].range().max() + 1, pair[1].range().location);
    }
}

#[rstest]
#[case::marked("⧙doc-heading-fake-uuid⧘Hello\nIt's ☊co|x☋way☊Ωco|x☋ good.")]
#[case::attached("⧙doc-heading-fake-uuid⧘Title\n⧙image⧘http://example.com/a.png\nEnd")]
#[case::lists("⧙unordered-list-0⧘- A\n⧙ordered-list-1⧘3. B\n⧙checklist-0⧘-[x] C")]
fn hidden_ranges_are_ascending_disjoint_and_in_bounds(#[case] backing: &str) {
    let doc = Document::new(backing);
    let hidden = doc.hidden_ranges();
    assert!(!hidden.is_empty());
    for range in hidden {
        assert!(range.max() <= doc.backing().len());
    }
    for pair in hidden.windows(2) {
        assert!(pair[0].max() <= pair[1].location);
    }
}

#[rstest]
#[case::titled("⧙doc-heading-fake-uuid⧘Title\nBody")]
#[case::marked("⧙doc-heading-fake-uuid⧘Hello\nIt's ☊co|x☋way☊Ωco|x☋ good.")]
#[case::lists("⧙unordered-list-0⧘- A\n⧙ordered-list-1⧘3. B\n⧙checklist-0⧘-[x] C")]
fn visible_ranges_translate_to_block_presentation_ranges(#[case] backing: &str) {
    let doc = Document::new(backing);
    for (block, &expected) in doc.blocks().iter().zip(doc.block_presentation_ranges()) {
        assert_eq!(expected, doc.presentation_range(block.visible_range()));
    }
}

#[rstest]
#[case::plain("Just one paragraph")]
#[case::titled("⧙doc-heading-fake-uuid⧘Title\nBody")]
#[case::marked("⧙doc-heading-fake-uuid⧘Hello\nIt's ☊co|x☋way☊Ωco|x☋ good.")]
#[case::attached("⧙doc-heading-fake-uuid⧘Title\n⧙image⧘http://example.com/a.png\nEnd")]
fn cursor_translation_round_trips(#[case] backing: &str) {
    let doc = Document::new(backing);
    for location in 0..=doc.presentation().len() {
        let backing_range = doc.backing_range_at(location);
        let round_tripped = doc.presentation_range(backing_range);
        // A cursor may widen to a marker span, but translating back must
        // land on a span covering where it started.
        assert!(round_tripped.location <= location);
        assert!(location <= round_tripped.max());
    }
}

#[rstest]
#[case::titled("⧙doc-heading-fake-uuid⧘Title\nBody")]
#[case::marked("⧙doc-heading-fake-uuid⧘Hello\nIt's ☊co|x☋way☊Ωco|x☋ good.")]
#[case::attached("⧙doc-heading-fake-uuid⧘Title\n⧙image⧘http://example.com/a.png\nEnd")]
fn presentation_length_is_backing_minus_hidden(#[case] backing: &str) {
    let doc = Document::new(backing);
    let hidden: usize = doc.hidden_ranges().iter().map(|r| r.length).sum();
    assert_eq!(doc.backing().len() - hidden, doc.presentation().len());
}

//! JSON shape of the parsed tree, consumed by embedding editor surfaces.

use pretty_assertions::assert_eq;
use serde_json::json;
use strand_engine::Document;

#[test]
fn block_tree_serializes_with_kind_tags_and_ranges() {
    let doc = Document::new("⧙doc-heading-fake-uuid⧘Hi\n⧙checklist-1⧘-[x] Done");
    let value = serde_json::to_value(doc.blocks()).unwrap();

    assert_eq!("title", value[0]["type"]);
    assert_eq!("fake-uuid", value[0]["id"]);
    assert_eq!(json!({ "location": 0, "length": 25 }), value[0]["range"]);

    assert_eq!("checklist-item", value[1]["type"]);
    assert_eq!("checked", value[1]["state"]);
    assert_eq!(1, value[1]["indentation"]);
}

#[test]
fn inline_nodes_serialize_with_delimiter_ranges() {
    let doc = Document::new("a **b**");
    let value = serde_json::to_value(doc.blocks()).unwrap();
    let subnodes = &value[0]["subnodes"];

    assert_eq!("text", subnodes[0]["type"]);
    assert_eq!("double-emphasis", subnodes[1]["type"]);
    assert_eq!(
        json!({ "location": 2, "length": 2 }),
        subnodes[1]["leading_delimiter_range"]
    );
    assert_eq!(json!({ "location": 4, "length": 1 }), subnodes[1]["text_range"]);
}

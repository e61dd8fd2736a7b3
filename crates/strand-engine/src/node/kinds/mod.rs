//! Concrete block kinds.
//!
//! Each kind owns its own native-prefix syntax knowledge: the `from_line`
//! constructor recognizes the kind from a raw line (returning `None` when
//! the line is something else), and `native_representation` builds the
//! backing-string form.

mod blockquote;
mod checklist_item;
mod code_block;
mod heading;
mod horizontal_rule;
mod image;
mod list_item;
mod paragraph;
mod title;

pub use blockquote::Blockquote;
pub use checklist_item::{ChecklistItem, ChecklistState};
pub use code_block::CodeBlock;
pub use heading::Heading;
pub use horizontal_rule::HorizontalRule;
pub use image::{Image, ImageMeta};
pub use list_item::{OrderedListItem, UnorderedListItem};
pub use paragraph::Paragraph;
pub use title::Title;

//! A document engine for structured-text editing.
//!
//! The canonical form of a document is its backing string: a line-oriented
//! markup where each line is one block, tagged by a delimited native prefix
//! (`⧙blockquote⧘> quoted`, say). The engine parses the backing string into
//! a typed block tree, projects the presentation string an editor actually
//! shows by dropping hidden ranges, and translates ranges between the two
//! sides in both directions. All positions are UTF-16 code units.
//!
//! Edits go through [`DocumentController::replace_backing_range`], which
//! swaps in a new immutable snapshot and describes the difference as an
//! ordered list of [`ChangeEvent`]s a listener can apply index by index.
//!
//! ```
//! use strand_engine::{DocumentController, Range};
//!
//! let (mut controller, _) =
//!     DocumentController::with_backing_string("⧙doc-heading-fake-uuid⧘Hello");
//! assert_eq!("Hello", controller.document().presentation_string());
//!
//! let events = controller
//!     .replace_backing_range(Range::new(23, 5), "Howdy")
//!     .unwrap();
//! assert!(!events.is_empty());
//! assert_eq!(Some("Howdy".to_string()), controller.document().title());
//! ```

pub mod change;
pub mod controller;
pub mod document;
pub mod node;
pub mod parsing;
pub mod range;
pub mod render;
pub mod text;

pub use change::{BlockChange, DocumentChange, EditError, StringChange};
pub use controller::{ChangeEvent, DocumentController};
pub use document::{Direction, Document};
pub use node::{
    BlockNode, Indentation, InlineMarker, InlineMarkerPair, InlineNode, MarkerPosition, Node,
};
pub use parsing::parse;
pub use range::{NoncontiguousRange, Range};
pub use text::Text;

use serde::Serialize;

use crate::node::inline::InlineMarkerPair;
use crate::node::{LEADING_NATIVE_PREFIX, TRAILING_NATIVE_PREFIX};
use crate::range::Range;
use crate::text::scanner::Scanner;

const DELIMITER: &str = "code";

/// One line of a code block: `⧙code⧘<text>` or `⧙code-<language>⧘<text>`.
///
/// Code is a raw zone: no inline style spans are parsed inside, though
/// annotation markers still are. `line_number` is assigned by the parser:
/// consecutive code blocks are numbered from 1, resetting whenever the run
/// breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub range: Range,
    pub native_prefix_range: Range,
    pub visible_range: Range,
    /// Language tag from the parameterized form. `Some("")` for `⧙code-⧘`.
    pub language: Option<String>,
    pub line_number: u32,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl CodeBlock {
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        let mut scanner = Scanner::new(line);
        if !scanner.scan_char(LEADING_NATIVE_PREFIX) || !scanner.scan_str(DELIMITER) {
            return None;
        }

        let language = if scanner.scan_char('-') {
            let lang_rel = scanner.scan_up_to(TRAILING_NATIVE_PREFIX)?;
            Some(String::from_utf16_lossy(
                &line[lang_rel.location..lang_rel.max()],
            ))
        } else {
            None
        };
        if !scanner.scan_char(TRAILING_NATIVE_PREFIX) {
            return None;
        }
        let prefix_len = scanner.pos();

        Some(Self {
            range,
            native_prefix_range: Range::new(range.location, prefix_len),
            visible_range: Range::new(range.location + prefix_len, range.length - prefix_len),
            language,
            line_number: 1,
            inline_marker_pairs: vec![],
        })
    }

    #[must_use]
    pub fn native_representation(language: Option<&str>, text: &str) -> String {
        match language {
            Some(language) => format!(
                "{LEADING_NATIVE_PREFIX}{DELIMITER}-{language}{TRAILING_NATIVE_PREFIX}{text}"
            ),
            None => format!("{LEADING_NATIVE_PREFIX}{DELIMITER}{TRAILING_NATIVE_PREFIX}{text}"),
        }
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            native_prefix_range: self.native_prefix_range.offset(delta),
            visible_range: self.visible_range.offset(delta),
            language: self.language.clone(),
            line_number: self.line_number,
            inline_marker_pairs: self
                .inline_marker_pairs
                .iter()
                .map(|p| p.offset(delta))
                .collect(),
        }
    }
}

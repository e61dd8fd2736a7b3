use serde::{Deserialize, Serialize};

use crate::node::{LEADING_NATIVE_PREFIX, TRAILING_NATIVE_PREFIX};
use crate::range::Range;
use crate::text::starts_with;

const NEW_PREFIX: &str = "⧙image-";
const LEGACY_PREFIX: &str = "⧙image⧘";

/// Parameters of the JSON image form. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

/// An embedded image: `⧙image-<json>⧘` or the legacy `⧙image⧘<url>`.
///
/// Attachable: the block collapses to a single placeholder unit in the
/// presentation string, anchored on the line's final unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub range: Range,
    /// Everything but the line's final unit, which anchors the placeholder.
    pub native_prefix_range: Range,
    pub meta: ImageMeta,
}

impl Image {
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        let meta = if starts_with(line, NEW_PREFIX) {
            // JSON payload sits between the tag and the line's trailing
            // delimiter.
            let payload_start = NEW_PREFIX.encode_utf16().count();
            if line.len() <= payload_start
                || line.last() != Some(&(TRAILING_NATIVE_PREFIX as u16))
            {
                return None;
            }
            let payload = String::from_utf16_lossy(&line[payload_start..line.len() - 1]);
            serde_json::from_str(&payload).ok()?
        } else if starts_with(line, LEGACY_PREFIX) {
            let url_start = LEGACY_PREFIX.encode_utf16().count();
            if line.len() <= url_start {
                return None;
            }
            ImageMeta {
                url: String::from_utf16_lossy(&line[url_start..]),
                ci: None,
                width: None,
                height: None,
            }
        } else {
            return None;
        };

        Some(Self {
            range,
            native_prefix_range: Range::new(range.location, range.length - 1),
            meta,
        })
    }

    #[must_use]
    pub fn native_representation(meta: &ImageMeta) -> String {
        // Serializing a struct with a string field cannot fail.
        let payload = serde_json::to_string(meta).expect("image meta serializes");
        format!("{LEADING_NATIVE_PREFIX}image-{payload}{TRAILING_NATIVE_PREFIX}")
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            native_prefix_range: self.native_prefix_range.offset(delta),
            meta: self.meta.clone(),
        }
    }
}

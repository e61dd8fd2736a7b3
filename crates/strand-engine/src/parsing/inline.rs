//! Inline scanning within a block's visible text.
//!
//! Markers are scanned first and paired by id; style spans are then scanned
//! over the remaining text with paired marker sequences skipped. Unmatched
//! markers pair with nothing, hide nothing, and read as plain text.

use crate::node::inline::{
    InlineMarker, InlineMarkerPair, InlineNode, MarkerPosition, MARKER_CLOSING_INDICATOR,
    MARKER_END, MARKER_START,
};
use crate::node::BlockNode;
use crate::range::Range;
use crate::text::Text;

/// Scans `block`'s inline region of `text` and installs the results.
pub(crate) fn scan(text: &Text, block: &mut BlockNode) {
    let Some(region) = block.inline_text_range() else {
        return;
    };
    let units = text.units();
    let pairs = pair_markers(scan_markers(units, region));
    let subnodes = scan_styles(units, region, &pairs);
    block.set_inline(subnodes, pairs);
}

fn scan_markers(units: &[u16], region: Range) -> Vec<InlineMarker> {
    let mut markers = vec![];
    let mut i = region.location;
    let end = region.max();
    while i < end {
        if units[i] == MARKER_START as u16 {
            if let Some(marker) = parse_marker(units, i, end) {
                i = marker.range.max();
                markers.push(marker);
                continue;
            }
        }
        i += 1;
    }
    markers
}

/// Parses `☊<kind>|<id>☋` or `☊Ω<kind>|<id>☋` starting at `start`.
fn parse_marker(units: &[u16], start: usize, end: usize) -> Option<InlineMarker> {
    let mut i = start + 1;
    let position = if units.get(i) == Some(&(MARKER_CLOSING_INDICATOR as u16)) {
        i += 1;
        MarkerPosition::Closing
    } else {
        MarkerPosition::Opening
    };

    let kind_start = i;
    while i < end && units[i] != u16::from(b'|') && units[i] != MARKER_END as u16 {
        i += 1;
    }
    if i >= end || units[i] != u16::from(b'|') || i == kind_start {
        return None;
    }
    i += 1;

    let id_start = i;
    while i < end && units[i] != MARKER_END as u16 {
        i += 1;
    }
    if i >= end || i == id_start {
        return None;
    }

    Some(InlineMarker {
        range: Range::new(start, i + 1 - start),
        position,
        id: String::from_utf16_lossy(&units[id_start..i]),
    })
}

/// Pairs each opening marker with the next unconsumed closing marker bearing
/// the same id. Pairs with distinct ids may overlap; leftovers are dropped.
fn pair_markers(markers: Vec<InlineMarker>) -> Vec<InlineMarkerPair> {
    let mut used = vec![false; markers.len()];
    let mut pairs = vec![];
    for (i, opening) in markers.iter().enumerate() {
        if used[i] || opening.position != MarkerPosition::Opening {
            continue;
        }
        for (j, closing) in markers.iter().enumerate().skip(i + 1) {
            if !used[j] && closing.position == MarkerPosition::Closing && closing.id == opening.id
            {
                used[i] = true;
                used[j] = true;
                pairs.push(InlineMarkerPair::new(opening.clone(), closing.clone()));
                break;
            }
        }
    }
    pairs
}

fn scan_styles(units: &[u16], region: Range, pairs: &[InlineMarkerPair]) -> Vec<InlineNode> {
    let mut skips: Vec<Range> = pairs
        .iter()
        .flat_map(|p| [p.opening_marker.range, p.closing_marker.range])
        .collect();
    skips.sort_by_key(|r| r.location);

    let mut nodes = vec![];
    let end = region.max();
    let mut text_start = region.location;
    let mut i = region.location;

    while i < end {
        if let Some(skip) = skips.iter().find(|s| s.location == i) {
            push_text(&mut nodes, text_start, i);
            i = skip.max();
            text_start = i;
            continue;
        }

        let unit = units[i];
        if unit == u16::from(b'`') {
            // Raw zone: nothing inside a code span is parsed.
            if let Some(close) = find_unit(units, u16::from(b'`'), i + 1, end, &skips) {
                if close > i + 1 {
                    push_text(&mut nodes, text_start, i);
                    nodes.push(InlineNode::CodeSpan {
                        range: Range::new(i, close + 1 - i),
                        leading_delimiter_range: Range::new(i, 1),
                        trailing_delimiter_range: Range::new(close, 1),
                        text_range: Range::new(i + 1, close - i - 1),
                    });
                    i = close + 1;
                    text_start = i;
                    continue;
                }
            }
        } else if unit == u16::from(b'*') {
            if units.get(i + 1) == Some(&u16::from(b'*')) {
                if let Some(close) = find_double_star(units, i + 2, end, &skips) {
                    if close > i + 2 {
                        push_text(&mut nodes, text_start, i);
                        nodes.push(InlineNode::DoubleEmphasis {
                            range: Range::new(i, close + 2 - i),
                            leading_delimiter_range: Range::new(i, 2),
                            trailing_delimiter_range: Range::new(close, 2),
                            text_range: Range::new(i + 2, close - i - 2),
                        });
                        i = close + 2;
                        text_start = i;
                        continue;
                    }
                }
            } else if let Some(close) = find_unit(units, u16::from(b'*'), i + 1, end, &skips) {
                if close > i + 1 {
                    push_text(&mut nodes, text_start, i);
                    nodes.push(InlineNode::Emphasis {
                        range: Range::new(i, close + 1 - i),
                        leading_delimiter_range: Range::new(i, 1),
                        trailing_delimiter_range: Range::new(close, 1),
                        text_range: Range::new(i + 1, close - i - 1),
                    });
                    i = close + 1;
                    text_start = i;
                    continue;
                }
            }
        }
        i += 1;
    }
    push_text(&mut nodes, text_start, end);
    nodes
}

fn push_text(nodes: &mut Vec<InlineNode>, from: usize, to: usize) {
    if to > from {
        nodes.push(InlineNode::Text {
            range: Range::new(from, to - from),
        });
    }
}

fn find_unit(units: &[u16], needle: u16, mut from: usize, end: usize, skips: &[Range]) -> Option<usize> {
    while from < end {
        if let Some(skip) = skips.iter().find(|s| s.location == from) {
            from = skip.max();
            continue;
        }
        if units[from] == needle {
            return Some(from);
        }
        from += 1;
    }
    None
}

fn find_double_star(units: &[u16], mut from: usize, end: usize, skips: &[Range]) -> Option<usize> {
    while let Some(at) = find_unit(units, u16::from(b'*'), from, end, skips) {
        if at + 1 < end && units[at + 1] == u16::from(b'*') {
            return Some(at);
        }
        from = at + 1;
    }
    None
}

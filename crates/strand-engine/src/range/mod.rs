//! Half-open integer intervals over UTF-16 code units, plus a disjoint-range
//! set used when one presentation range maps to several backing ranges.

use serde::Serialize;

/// A half-open interval `[location, location + length)`.
///
/// All parsed nodes store ranges rather than copied text, so slicing the
/// backing string with any range reproduces the exact source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    /// Start offset in UTF-16 code units.
    pub location: usize,
    /// Length in UTF-16 code units.
    pub length: usize,
}

impl Range {
    #[must_use]
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// The exclusive end of the range.
    #[must_use]
    pub fn max(self) -> usize {
        self.location + self.length
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.length == 0
    }

    /// Whether `location` falls inside the range. The exclusive end is not
    /// contained.
    #[must_use]
    pub fn contains(self, location: usize) -> bool {
        location >= self.location && location < self.max()
    }

    /// The overlap of two ranges, or `None` when the overlap is empty.
    ///
    /// Zero-length overlaps (adjacent ranges, or a cursor touching a range)
    /// count as no intersection.
    #[must_use]
    pub fn intersection(self, other: Range) -> Option<Range> {
        let location = self.location.max(other.location);
        let end = self.max().min(other.max());
        if end > location {
            Some(Range::new(location, end - location))
        } else {
            None
        }
    }

    /// Length of the overlap of two ranges, or `None` when they don't overlap.
    #[must_use]
    pub fn intersection_len(self, other: Range) -> Option<usize> {
        self.intersection(other).map(|r| r.length)
    }

    /// The smallest range covering both ranges, including any gap between them.
    #[must_use]
    pub fn union(self, other: Range) -> Range {
        let location = self.location.min(other.location);
        let end = self.max().max(other.max());
        Range::new(location, end - location)
    }

    /// Shifts the range by `delta`. Used when a node tree is rebased after a
    /// prefix-length change.
    #[must_use]
    pub fn offset(self, delta: isize) -> Range {
        Range::new(
            (self.location as isize + delta) as usize,
            self.length,
        )
    }
}

/// An ordered set of disjoint ranges.
///
/// Built up during presentation-to-backing translation: inline annotation
/// markers may punch holes in a contiguous presentation selection, so the
/// backing-side result is a set rather than a single range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoncontiguousRange {
    ranges: Vec<Range>,
}

impl NoncontiguousRange {
    #[must_use]
    pub fn new(ranges: impl IntoIterator<Item = Range>) -> Self {
        let mut set = Self::default();
        for range in ranges {
            set.insert(range);
        }
        set
    }

    /// The disjoint members in ascending order.
    #[must_use]
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Inserts a range, merging it with any member it overlaps or touches.
    pub fn insert(&mut self, range: Range) {
        let mut merged = range;
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        for &existing in &self.ranges {
            // Touching counts: insert is a union, not a disjoint add.
            if existing.max() >= merged.location && existing.location <= merged.max() {
                merged = merged.union(existing);
            } else {
                out.push(existing);
            }
        }
        out.push(merged);
        out.sort_by_key(|r| r.location);
        self.ranges = out;
    }

    /// Subtracts a range from the set, splitting members where needed.
    pub fn remove(&mut self, range: Range) {
        if range.is_empty() {
            return;
        }
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        for &existing in &self.ranges {
            if existing.intersection(range).is_none() {
                out.push(existing);
                continue;
            }
            if existing.location < range.location {
                out.push(Range::new(
                    existing.location,
                    range.location - existing.location,
                ));
            }
            if existing.max() > range.max() {
                out.push(Range::new(range.max(), existing.max() - range.max()));
            }
        }
        self.ranges = out;
    }

    /// Total overlap between the set's members and `range`.
    #[must_use]
    pub fn intersection_len(&self, range: Range) -> usize {
        self.ranges
            .iter()
            .filter_map(|r| r.intersection_len(range))
            .sum()
    }
}

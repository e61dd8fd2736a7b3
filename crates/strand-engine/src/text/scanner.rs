use crate::range::Range;

/// A forward-only scanner over UTF-16 code units.
///
/// Used by the block-kind and inline parsers to match grammar tokens. All
/// positions are relative to the start of the scanned slice.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'a> {
    units: &'a [u16],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(units: &'a [u16]) -> Self {
        Self { units, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Option<u16> {
        self.units.get(self.pos).copied()
    }

    /// Consumes `s` if the input continues with it.
    pub(crate) fn scan_str(&mut self, s: &str) -> bool {
        let start = self.pos;
        for unit in s.encode_utf16() {
            if self.units.get(self.pos) != Some(&unit) {
                self.pos = start;
                return false;
            }
            self.pos += 1;
        }
        true
    }

    /// Consumes `c` if the input continues with it. Only valid for BMP
    /// characters, which all grammar delimiters are.
    pub(crate) fn scan_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c as u16) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes up to (not including) the next occurrence of `c`, returning
    /// the possibly-empty range scanned. `None` if `c` never occurs.
    pub(crate) fn scan_up_to(&mut self, c: char) -> Option<Range> {
        let target = c as u16;
        let start = self.pos;
        while let Some(unit) = self.peek() {
            if unit == target {
                return Some(Range::new(start, self.pos - start));
            }
            self.pos += 1;
        }
        self.pos = start;
        None
    }

    /// Consumes a single ASCII digit.
    pub(crate) fn scan_digit(&mut self) -> Option<u8> {
        let unit = self.peek()?;
        if (u16::from(b'0')..=u16::from(b'9')).contains(&unit) {
            self.pos += 1;
            Some((unit - u16::from(b'0')) as u8)
        } else {
            None
        }
    }

    /// Advances one unit.
    pub(crate) fn bump(&mut self) {
        self.pos += 1;
    }
}

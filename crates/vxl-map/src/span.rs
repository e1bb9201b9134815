//! Span headers and color words of the compressed column format.
//!
//! A column is a sequence of spans. Each span starts with a 4-byte header
//!
//! | Byte | Field | Meaning |
//! |------|-------|---------|
//! | 0 | `length` | Span size in 4-byte words, or 0 for the last span of the column |
//! | 1 | `color_start` | First z of the top colors |
//! | 2 | `color_end` | Last z of the top colors (inclusive) |
//! | 3 | `air_start` | First z of the air run above this span |
//!
//! followed by `color_end - color_start + 1` top colors and, for a non-final
//! span, `length - 1 - top` bottom colors. The bottom colors end right where
//! the *next* span's air run starts, so the next header's `air_start` anchors
//! them. Colors are little-endian `0xAARRGGBB` words.

use crate::chunk::COLOR_MASK;

/// Size of a span header and of a color word.
pub const WORD: usize = 4;

/// Alpha byte written for every color.
const OPAQUE: u32 = 0xFF00_0000;

/// A decoded span header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Word count of the whole span, 0 for the last span of a column.
    pub length: u8,
    /// First z of the top colors.
    pub color_start: u8,
    /// Last z of the top colors, inclusive.
    pub color_end: u8,
    /// First z of the air run preceding the span.
    pub air_start: u8,
}

impl Span {
    /// Reads the header at `offset`, or `None` if fewer than 4 bytes remain.
    pub fn read(data: &[u8], offset: usize) -> Option<Self> {
        let bytes = data.get(offset..offset.checked_add(WORD)?)?;
        Some(Self {
            length: bytes[0],
            color_start: bytes[1],
            color_end: bytes[2],
            air_start: bytes[3],
        })
    }

    /// Appends the header bytes to `out`.
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.length, self.color_start, self.color_end, self.air_start]);
    }

    /// Returns `true` for the last span of a column.
    pub fn is_terminal(&self) -> bool {
        self.length == 0
    }

    /// Number of top colors, or `None` if `color_end` lies more than one
    /// position above `color_start`.
    pub fn top_len(&self) -> Option<usize> {
        (usize::from(self.color_end) + 1).checked_sub(usize::from(self.color_start))
    }

    /// Total encoded size of the span in bytes, excluding any following span.
    ///
    /// Returns `None` when the header is inconsistent.
    pub fn byte_len(&self) -> Option<usize> {
        if self.is_terminal() {
            self.top_len().map(|top| (top + 1) * WORD)
        } else {
            Some(usize::from(self.length) * WORD)
        }
    }
}

/// Reads the color word at `offset`, dropping the alpha byte.
#[inline]
pub fn read_color(data: &[u8], offset: usize) -> u32 {
    let bytes = [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]];
    u32::from_le_bytes(bytes) & COLOR_MASK
}

/// Appends a color word with an opaque alpha byte.
#[inline]
pub fn write_color(color: u32, out: &mut Vec<u8>) {
    out.extend_from_slice(&((color & COLOR_MASK) | OPAQUE).to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_byte_order() {
        let span = Span {
            length: 3,
            color_start: 10,
            color_end: 11,
            air_start: 4,
        };
        let mut out = Vec::new();
        span.write(&mut out);
        assert_eq!(out, vec![3, 10, 11, 4]);
        assert_eq!(Span::read(&out, 0), Some(span));
    }

    #[test]
    fn test_read_past_end() {
        assert_eq!(Span::read(&[0, 1, 2], 0), None);
        assert_eq!(Span::read(&[0, 1, 2, 3, 4], 2), None);
        assert_eq!(Span::read(&[0, 1, 2, 3], usize::MAX), None);
    }

    #[test]
    fn test_top_len() {
        let span = |color_start, color_end| Span {
            length: 0,
            color_start,
            color_end,
            air_start: 0,
        };
        assert_eq!(span(5, 7).top_len(), Some(3));
        // A column ending in air has no top colors.
        assert_eq!(span(64, 63).top_len(), Some(0));
        assert_eq!(span(10, 3).top_len(), None);
    }

    #[test]
    fn test_byte_len() {
        let terminal = Span {
            length: 0,
            color_start: 62,
            color_end: 63,
            air_start: 0,
        };
        assert_eq!(terminal.byte_len(), Some(12));

        let inner = Span { length: 5, ..terminal };
        assert_eq!(inner.byte_len(), Some(20));
    }

    #[test]
    fn test_color_alpha_handling() {
        let mut out = Vec::new();
        write_color(0x12_34_56, &mut out);
        // Stored as B, G, R, A.
        assert_eq!(out, vec![0x56, 0x34, 0x12, 0xFF]);

        let shaded = [0x56, 0x34, 0x12, 0x7F];
        assert_eq!(read_color(&shaded, 0), 0x12_34_56);
    }
}

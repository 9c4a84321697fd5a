//! Bitmap font tables
//!
//! Fonts use the Adafruit GFX layout: one packed bitmap buffer shared by
//! all glyphs, plus a glyph table indexed by `code - first`. Each glyph's
//! bits are stored MSB first, row by row, and rows are NOT padded to a
//! byte boundary: the first bit of a row follows the last bit of the
//! previous one.
//!
//! Font data is borrowed, so tables generated by `fontconvert` can live in
//! flash as `static` items.
//!
//! ## Example
//!
//! ```
//! use ili9341_ft6206::font::{Font, Glyph};
//!
//! // A 3x3 "+" mapped to code b'+'
//! static BITMAP: [u8; 2] = [0b0101_1101, 0b0000_0000];
//! static GLYPHS: [Glyph; 1] = [Glyph::new(0, 3, 3, 4, 0, -3)];
//! static PLUS: Font<'static> = Font::new(&BITMAP, &GLYPHS, b'+', b'+', 5);
//!
//! let glyph = PLUS.glyph(b'+');
//! assert!(glyph.is_some());
//! assert!(PLUS.glyph(b'-').is_none());
//! ```

/// Metrics and bitmap location of one character
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Byte offset of the glyph's bits in [`Font::bitmap`]
    pub bitmap_offset: u16,
    /// Bitmap width in pixels
    pub width: u8,
    /// Bitmap height in pixels
    pub height: u8,
    /// Horizontal cursor advance after the glyph
    pub x_advance: u8,
    /// Offset from the cursor to the bitmap's left edge
    pub x_offset: i8,
    /// Offset from the cursor (baseline) to the bitmap's top edge
    pub y_offset: i8,
}

impl Glyph {
    /// Create a glyph entry
    pub const fn new(
        bitmap_offset: u16,
        width: u8,
        height: u8,
        x_advance: u8,
        x_offset: i8,
        y_offset: i8,
    ) -> Self {
        Self {
            bitmap_offset,
            width,
            height,
            x_advance,
            x_offset,
            y_offset,
        }
    }

    /// Whether the glyph has any pixels to draw
    pub const fn has_bitmap(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Number of bitmap bytes the glyph occupies
    pub const fn bitmap_len(&self) -> usize {
        (self.width as usize * self.height as usize).div_ceil(8)
    }
}

/// A bitmap font covering the character codes `first..=last`
#[derive(Clone, Copy, Debug)]
pub struct Font<'a> {
    /// Packed glyph bitmaps
    pub bitmap: &'a [u8],
    /// Glyph table, entry `i` describes code `first + i`
    pub glyphs: &'a [Glyph],
    /// First character code in the table
    pub first: u8,
    /// Last character code in the table
    pub last: u8,
    /// Line height used by newline
    pub y_advance: u8,
}

impl<'a> Font<'a> {
    /// Create a font from its tables
    pub const fn new(
        bitmap: &'a [u8],
        glyphs: &'a [Glyph],
        first: u8,
        last: u8,
        y_advance: u8,
    ) -> Self {
        Self {
            bitmap,
            glyphs,
            first,
            last,
            y_advance,
        }
    }

    /// Whether `code` lies in `first..=last`
    pub fn contains(&self, code: u8) -> bool {
        (self.first..=self.last).contains(&code)
    }

    /// Glyph for a character code
    ///
    /// Returns `None` for codes outside `first..=last` and for codes the
    /// glyph table is too short to describe.
    pub fn glyph(&self, code: u8) -> Option<&'a Glyph> {
        if !self.contains(code) {
            return None;
        }
        self.glyphs.get(usize::from(code - self.first))
    }

    /// Bitmap bytes of a glyph
    ///
    /// Returns `None` when the glyph's bits extend past the end of the
    /// bitmap buffer.
    pub fn glyph_bitmap(&self, glyph: &Glyph) -> Option<&'a [u8]> {
        let start = usize::from(glyph.bitmap_offset);
        self.bitmap.get(start..start + glyph.bitmap_len())
    }

    /// Iterate over the set pixels of a glyph as `(column, row)`
    ///
    /// Returns `None` under the same conditions as
    /// [`glyph_bitmap`](Self::glyph_bitmap).
    pub fn pixels(&self, glyph: &Glyph) -> Option<GlyphPixels<'a>> {
        let bits = self.glyph_bitmap(glyph)?;
        Some(GlyphPixels {
            bits,
            width: usize::from(glyph.width),
            total: usize::from(glyph.width) * usize::from(glyph.height),
            index: 0,
        })
    }
}

/// Iterator over the set pixels of one glyph, in bitmap order
#[derive(Clone, Debug)]
pub struct GlyphPixels<'a> {
    bits: &'a [u8],
    width: usize,
    total: usize,
    index: usize,
}

impl Iterator for GlyphPixels<'_> {
    type Item = (u8, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.total {
            let index = self.index;
            self.index += 1;

            let byte = self.bits.get(index / 8).copied().unwrap_or(0);
            if byte & (0x80 >> (index % 8)) != 0 {
                // width and height are u8, so both fit
                return Some(((index % self.width) as u8, (index / self.width) as u8));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    // 3x3 ring followed by a 5x2 bar, packed without row padding:
    // 111 101 111 -> 1111_0111 1...
    static BITMAP: [u8; 4] = [0b1111_0111, 0b1000_0000, 0b1111_1111, 0b1100_0000];
    static GLYPHS: [Glyph; 3] = [
        Glyph::new(0, 3, 3, 4, 0, -3),
        Glyph::new(2, 5, 2, 6, 1, -2),
        Glyph::new(3, 0, 0, 3, 0, 0),
    ];

    fn font() -> Font<'static> {
        Font::new(&BITMAP, &GLYPHS, b'a', b'c', 8)
    }

    #[test]
    fn test_glyph_lookup_range() {
        let font = font();
        assert_eq!(font.glyph(b'a'), Some(&GLYPHS[0]));
        assert_eq!(font.glyph(b'c'), Some(&GLYPHS[2]));
        assert!(font.glyph(b'`').is_none());
        assert!(font.glyph(b'd').is_none());
    }

    #[test]
    fn test_glyph_lookup_short_table() {
        let font = Font::new(&BITMAP, &GLYPHS[..1], b'a', b'z', 8);
        assert!(font.glyph(b'a').is_some());
        assert!(font.glyph(b'b').is_none());
    }

    #[test]
    fn test_bitmap_len_rounds_up() {
        assert_eq!(GLYPHS[0].bitmap_len(), 2);
        assert_eq!(GLYPHS[1].bitmap_len(), 2);
        assert_eq!(GLYPHS[2].bitmap_len(), 0);
        assert!(!GLYPHS[2].has_bitmap());
    }

    #[test]
    fn test_glyph_bitmap_out_of_bounds() {
        let font = font();
        let broken = Glyph::new(3, 8, 2, 8, 0, 0);
        assert!(font.glyph_bitmap(&broken).is_none());
        assert!(font.pixels(&broken).is_none());
        assert_eq!(font.glyph_bitmap(&GLYPHS[1]), Some(&BITMAP[2..4]));
    }

    #[test]
    fn test_pixels_continue_across_rows() {
        let font = font();
        let ring: Vec<_> = font.pixels(&GLYPHS[0]).unwrap().collect();
        assert_eq!(
            ring,
            [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
        );

        let bar: Vec<_> = font.pixels(&GLYPHS[1]).unwrap().collect();
        assert_eq!(bar.len(), 10);
        assert_eq!(bar[5], (0, 1));
    }

    #[test]
    fn test_empty_glyph_has_no_pixels() {
        let font = font();
        assert_eq!(font.pixels(&GLYPHS[2]).unwrap().count(), 0);
    }
}

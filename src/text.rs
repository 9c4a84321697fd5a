//! Text rendering with GFX bitmap fonts
//!
//! [`TextRenderer`] is the rendering context: cursor, colors, scale, wrap
//! flag and the active [`Font`]. It is owned by the caller and borrows the
//! display only while drawing, so several independent contexts can target
//! the same panel.
//!
//! The cursor sits on the text baseline; glyph offsets are usually
//! negative in y so characters extend upward from it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_ft6206::font::{Font, Glyph};
//! use ili9341_ft6206::{Builder, Color, Display, DisplayInterface, TextRenderer};
//! # use embedded_hal::delay::DelayNs;
//! # struct MockInterface;
//! # impl DisplayInterface for MockInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
//! # }
//! # static BITMAP: [u8; 1] = [0xFF];
//! # static GLYPHS: [Glyph; 1] = [Glyph::new(0, 2, 4, 3, 0, -4)];
//! # static FONT: Font<'static> = Font::new(&BITMAP, &GLYPHS, b'A', b'A', 6);
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(MockInterface, config);
//! let mut text = TextRenderer::new(&FONT);
//!
//! text.set_cursor(10, 30);
//! text.set_text_color(Color::WHITE);
//! text.set_text_size(2, 2);
//! let _ = text.draw_str(&mut display, "AA\nA");
//! ```

use crate::color::Color;
use crate::display::{Display, DisplayResult};
use crate::font::Font;
use crate::interface::DisplayInterface;

/// Maximum number of character codes processed by one text call
pub const MAX_TEXT_LEN: usize = 128;

/// Caller-owned text rendering context
#[derive(Clone, Copy, Debug)]
pub struct TextRenderer<'f> {
    cursor_x: i16,
    cursor_y: i16,
    fg: Color,
    bg: Color,
    size_x: u8,
    size_y: u8,
    wrap: bool,
    font: &'f Font<'f>,
}

impl<'f> TextRenderer<'f> {
    /// Create a context at (0, 0) with black text, 1x scale and wrapping on
    pub fn new(font: &'f Font<'f>) -> Self {
        Self {
            cursor_x: 0,
            cursor_y: 0,
            fg: Color::BLACK,
            bg: Color::BLACK,
            size_x: 1,
            size_y: 1,
            wrap: true,
            font,
        }
    }

    /// Move the cursor (baseline position of the next glyph)
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Set the glyph color
    pub fn set_text_color(&mut self, fg: Color) {
        self.fg = fg;
    }

    /// Set glyph and background colors
    ///
    /// The background color is stored for callers; glyphs are drawn
    /// transparently.
    pub fn set_text_colors(&mut self, fg: Color, bg: Color) {
        self.fg = fg;
        self.bg = bg;
    }

    /// Set the magnification in each axis, 0 is treated as 1
    pub fn set_text_size(&mut self, size_x: u8, size_y: u8) {
        self.size_x = size_x.max(1);
        self.size_y = size_y.max(1);
    }

    /// Enable or disable wrapping at the right edge of the display
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Switch to another font
    pub fn set_font(&mut self, font: &'f Font<'f>) {
        self.font = font;
    }

    /// Current cursor position
    pub fn cursor(&self) -> (i16, i16) {
        (self.cursor_x, self.cursor_y)
    }

    /// Glyph and background colors
    pub fn colors(&self) -> (Color, Color) {
        (self.fg, self.bg)
    }

    /// Magnification in x and y
    pub fn text_size(&self) -> (u8, u8) {
        (self.size_x, self.size_y)
    }

    /// Whether wrapping is enabled
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Active font
    pub fn font(&self) -> &'f Font<'f> {
        self.font
    }

    /// Draw one glyph at an explicit position without moving the cursor
    ///
    /// Codes outside the font and glyphs whose bitmap lies outside the
    /// font's buffer draw nothing. At 1x scale each set bit is a pixel,
    /// otherwise a `size_x` by `size_y` block.
    #[allow(clippy::too_many_arguments)]
    pub fn write_char<I: DisplayInterface>(
        &self,
        display: &mut Display<I>,
        x: i16,
        y: i16,
        code: u8,
        color: Color,
        size_x: u8,
        size_y: u8,
    ) -> DisplayResult<I> {
        let Some(glyph) = self.font.glyph(code) else {
            return Ok(());
        };
        let Some(pixels) = self.font.pixels(glyph) else {
            return Ok(());
        };

        let (x, y) = (i32::from(x), i32::from(y));
        let (xo, yo) = (i32::from(glyph.x_offset), i32::from(glyph.y_offset));
        let (sx, sy) = (i32::from(size_x), i32::from(size_y));

        for (col, row) in pixels {
            let (col, row) = (i32::from(col), i32::from(row));
            if size_x == 1 && size_y == 1 {
                display.put_pixel(x + xo + col, y + yo + row, color)?;
            } else {
                display.fill_rect_wide(x + (xo + col) * sx, y + (yo + row) * sy, sx, sy, color)?;
            }
        }
        Ok(())
    }

    /// Draw one character at the cursor and advance it
    ///
    /// `\n` moves to the start of the next line and `\r` is ignored.
    /// Codes outside the font are skipped without moving the cursor.
    /// With wrapping on, a glyph that would cross the right edge starts a
    /// new line first.
    pub fn draw_char<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        code: u8,
    ) -> DisplayResult<I> {
        match code {
            b'\n' => {
                self.newline();
                Ok(())
            }
            b'\r' => Ok(()),
            _ => {
                let Some(glyph) = self.font.glyph(code) else {
                    return Ok(());
                };

                if glyph.has_bitmap() {
                    let right = i32::from(self.cursor_x)
                        + i32::from(self.size_x)
                            * (i32::from(glyph.x_offset) + i32::from(glyph.width));
                    if self.wrap && right > i32::from(display.width()) {
                        self.newline();
                    }
                    self.write_char(
                        display,
                        self.cursor_x,
                        self.cursor_y,
                        code,
                        self.fg,
                        self.size_x,
                        self.size_y,
                    )?;
                }

                self.cursor_x = advance(self.cursor_x, self.size_x, glyph.x_advance);
                Ok(())
            }
        }
    }

    /// Draw a byte string at the cursor
    ///
    /// Stops at the first zero byte, the end of the slice or after
    /// [`MAX_TEXT_LEN`] codes.
    pub fn draw_text<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        text: &[u8],
    ) -> DisplayResult<I> {
        for &code in codes(text) {
            self.draw_char(display, code)?;
        }
        Ok(())
    }

    /// Draw a string at the cursor, see [`draw_text`](Self::draw_text)
    pub fn draw_str<I: DisplayInterface>(
        &mut self,
        display: &mut Display<I>,
        text: &str,
    ) -> DisplayResult<I> {
        self.draw_text(display, text.as_bytes())
    }

    /// Horizontal advance of a single line of text at the current scale
    ///
    /// Codes outside the font, `\r` and `\n` contribute nothing. Wrapping
    /// is not taken into account.
    pub fn text_width(&self, text: &[u8]) -> u32 {
        codes(text)
            .filter_map(|&code| self.font.glyph(code))
            .map(|glyph| u32::from(self.size_x) * u32::from(glyph.x_advance))
            .sum()
    }

    fn newline(&mut self) {
        self.cursor_x = 0;
        self.cursor_y = advance(self.cursor_y, self.size_y, self.font.y_advance);
    }
}

/// Move a cursor coordinate by `size * step`, saturating at the `i16` range
fn advance(position: i16, size: u8, step: u8) -> i16 {
    let moved = i32::from(position) + i32::from(size) * i32::from(step);
    moved.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

fn codes(text: &[u8]) -> impl Iterator<Item = &u8> {
    text.iter().take(MAX_TEXT_LEN).take_while(|&&code| code != 0)
}

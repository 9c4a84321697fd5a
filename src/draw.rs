//! Drawing primitives with clipping
//!
//! Every primitive here works in logical coordinates and is safe for any
//! input: off-screen, zero-size and negative-size geometry is clipped or
//! dropped before anything reaches the bus. The controller wraps
//! out-of-range address windows instead of rejecting them, so an unclipped
//! write would land in unrelated frame memory.
//!
//! All shapes funnel into [`Display::fill_rect`], which clips and hands a
//! fully on-screen rectangle to [`Display::fill_rect_preclipped`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_ft6206::{Builder, Color, Display, DisplayInterface};
//! # use embedded_hal::delay::DelayNs;
//! # struct MockInterface;
//! # impl DisplayInterface for MockInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> { Ok(()) }
//! #     fn send_data(&mut self, _data: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
//! # }
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(MockInterface, config);
//!
//! let _ = display.fill_screen(Color::WHITE);
//! // Negative sizes grow up and to the left of the anchor
//! let _ = display.fill_rect(100, 100, -20, -10, Color::RED);
//! // Partly off screen, clipped to the visible part
//! let _ = display.draw_rect(-5, -5, 50, 50, Color::BLUE);
//! let _ = display.draw_line(0, 0, 239, 319, Color::BLACK);
//! ```

use crate::color::Color;
use crate::command::RAMWR;
use crate::display::{Display, DisplayResult};
use crate::interface::DisplayInterface;

/// Pixels buffered per data write when streaming a solid color
const CHUNK_PIXELS: usize = 32;

/// An on-screen rectangle produced by [`clip_rect`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left column
    pub x: u16,
    /// Top row
    pub y: u16,
    /// Width, at least 1
    pub w: u16,
    /// Height, at least 1
    pub h: u16,
}

/// Clip a rectangle against `[0, width) x [0, height)`
///
/// A negative `w` extends left from `x` and a negative `h` extends up from
/// `y`: `x += w + 1; w = -w`. Returns `None` when nothing of the rectangle
/// is visible. Clipping an already clipped rectangle returns it unchanged.
///
/// ```
/// use ili9341_ft6206::draw::{clip_rect, Rect};
///
/// assert_eq!(
///     clip_rect(-10, 5, 20, -3, 240, 320),
///     Some(Rect { x: 0, y: 3, w: 10, h: 3 })
/// );
/// assert_eq!(clip_rect(240, 0, 10, 10, 240, 320), None);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn clip_rect(x: i16, y: i16, w: i16, h: i16, width: u16, height: u16) -> Option<Rect> {
    clip(
        i32::from(x),
        i32::from(y),
        i32::from(w),
        i32::from(h),
        i32::from(width),
        i32::from(height),
    )
}

#[allow(clippy::many_single_char_names)]
fn clip(mut x: i32, mut y: i32, mut w: i32, mut h: i32, width: i32, height: i32) -> Option<Rect> {
    if w == 0 || h == 0 {
        return None;
    }

    if w < 0 {
        x += w + 1;
        w = -w;
    }
    if h < 0 {
        y += h + 1;
        h = -h;
    }

    let x2 = x + w - 1;
    let y2 = y + h - 1;

    if x >= width || x2 < 0 || y >= height || y2 < 0 {
        return None;
    }

    if x < 0 {
        x = 0;
        w = x2 + 1;
    }
    if y < 0 {
        y = 0;
        h = y2 + 1;
    }
    if x2 >= width {
        w = width - x;
    }
    if y2 >= height {
        h = height - y;
    }

    Some(Rect {
        x: x as u16,
        y: y as u16,
        w: w as u16,
        h: h as u16,
    })
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Stream `count` pixels of one color into the current address window
    ///
    /// Sends RAMWR followed by the color, most significant byte first,
    /// repeated `count` times. Call [`set_address_window`](Self::set_address_window)
    /// first.
    pub fn write_color(&mut self, color: Color, count: u32) -> DisplayResult<I> {
        let bytes = color.to_be_bytes();
        let mut buffer = [0u8; CHUNK_PIXELS * 2];
        for pixel in buffer.chunks_exact_mut(2) {
            pixel.copy_from_slice(&bytes);
        }

        self.send_command(RAMWR, &[])?;
        let mut remaining = count as usize;
        while remaining > 0 {
            let pixels = remaining.min(CHUNK_PIXELS);
            self.send_data(&buffer[..pixels * 2])?;
            remaining -= pixels;
        }
        Ok(())
    }

    /// Fill a rectangle that is known to be on screen
    ///
    /// Clip bounds are NOT checked; the rectangle must lie inside the
    /// logical bounds and have non-zero size.
    #[allow(clippy::many_single_char_names)]
    pub fn fill_rect_preclipped(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Color,
    ) -> DisplayResult<I> {
        self.set_address_window(x, y, w, h)?;
        self.write_color(color, u32::from(w) * u32::from(h))
    }

    /// Draw a single pixel, ignored when off screen
    pub fn draw_pixel(&mut self, x: i16, y: i16, color: Color) -> DisplayResult<I> {
        self.put_pixel(i32::from(x), i32::from(y), color)
    }

    /// Fill a rectangle with clipping
    ///
    /// Positive `w`/`h` extend right/down from `(x, y)`, negative ones
    /// extend left/up. Zero size and fully off-screen rectangles draw
    /// nothing.
    #[allow(clippy::many_single_char_names)]
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) -> DisplayResult<I> {
        self.fill_rect_wide(
            i32::from(x),
            i32::from(y),
            i32::from(w),
            i32::from(h),
            color,
        )
    }

    /// Draw a horizontal line of `w` pixels (negative extends left)
    pub fn draw_hline(&mut self, x: i16, y: i16, w: i16, color: Color) -> DisplayResult<I> {
        self.fill_rect(x, y, w, 1, color)
    }

    /// Draw a vertical line of `h` pixels (negative extends up)
    pub fn draw_vline(&mut self, x: i16, y: i16, h: i16, color: Color) -> DisplayResult<I> {
        self.fill_rect(x, y, 1, h, color)
    }

    /// Draw a line between two points, both inclusive
    ///
    /// Horizontal and vertical lines are sent as a single fill. Other lines
    /// use Bresenham's algorithm with every point clipped individually.
    pub fn draw_line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: Color,
    ) -> DisplayResult<I> {
        let (x0, y0, x1, y1) = (
            i32::from(x0),
            i32::from(y0),
            i32::from(x1),
            i32::from(y1),
        );

        if x0 == x1 {
            self.fill_rect_wide(x0, y0, 1, inclusive_span(y0, y1), color)
        } else if y0 == y1 {
            self.fill_rect_wide(x0, y0, inclusive_span(x0, x1), 1, color)
        } else {
            self.bresenham(x0, y0, x1, y1, color)
        }
    }

    /// Draw a rectangle outline
    #[allow(clippy::many_single_char_names)]
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Color) -> DisplayResult<I> {
        let (x, y, w, h) = (i32::from(x), i32::from(y), i32::from(w), i32::from(h));
        self.fill_rect_wide(x, y, w, 1, color)?;
        self.fill_rect_wide(x, y + h - 1, w, 1, color)?;
        self.fill_rect_wide(x, y, 1, h, color)?;
        self.fill_rect_wide(x + w - 1, y, 1, h, color)
    }

    /// Fill the whole logical screen
    pub fn fill_screen(&mut self, color: Color) -> DisplayResult<I> {
        let (width, height) = (i32::from(self.width()), i32::from(self.height()));
        self.fill_rect_wide(0, 0, width, height, color)
    }

    #[allow(clippy::many_single_char_names)]
    pub(crate) fn fill_rect_wide(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
    ) -> DisplayResult<I> {
        let (width, height) = (i32::from(self.width()), i32::from(self.height()));
        match clip(x, y, w, h, width, height) {
            Some(rect) => self.fill_rect_preclipped(rect.x, rect.y, rect.w, rect.h, color),
            None => Ok(()),
        }
    }

    pub(crate) fn put_pixel(&mut self, x: i32, y: i32, color: Color) -> DisplayResult<I> {
        if x < 0 || y < 0 || x >= i32::from(self.width()) || y >= i32::from(self.height()) {
            return Ok(());
        }
        self.fill_rect_preclipped(x as u16, y as u16, 1, 1, color)
    }

    fn bresenham(
        &mut self,
        mut x0: i32,
        mut y0: i32,
        mut x1: i32,
        mut y1: i32,
        color: Color,
    ) -> DisplayResult<I> {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };
        let mut err = dx / 2;

        while x0 <= x1 {
            if steep {
                self.put_pixel(y0, x0, color)?;
            } else {
                self.put_pixel(x0, y0, color)?;
            }
            err -= dy;
            if err < 0 {
                y0 += ystep;
                err += dx;
            }
            x0 += 1;
        }
        Ok(())
    }
}

/// Signed extent covering `from..=to`, pointing from `from` toward `to`
fn inclusive_span(from: i32, to: i32) -> i32 {
    if to >= from {
        to - from + 1
    } else {
        to - from - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CASET, PASET};
    use crate::config::Builder;
    use crate::error::Error;
    use crate::mock::MockInterface;
    use alloc::collections::BTreeSet;

    fn test_display() -> Display<MockInterface> {
        let config = Builder::new().build().unwrap();
        Display::new(MockInterface::new(), config)
    }

    fn rect_pixels(x: u16, y: u16, w: u16, h: u16) -> BTreeSet<(u16, u16)> {
        (y..y + h)
            .flat_map(|row| (x..x + w).map(move |col| (col, row)))
            .collect()
    }

    #[test]
    fn test_write_color_chunks_pixels() {
        let mut display = test_display();
        display.write_color(Color::PINK, 70).unwrap();

        let interface = display.interface();
        assert_eq!(interface.commands, [RAMWR]);
        let lengths: alloc::vec::Vec<_> = interface.data.iter().map(|d| d.len()).collect();
        assert_eq!(lengths, [64, 64, 12]);
        assert!(interface.data[2].chunks(2).all(|p| p == [0xFC, 0x18]));
    }

    #[test]
    fn test_write_color_zero_count_sends_only_command() {
        let mut display = test_display();
        display.write_color(Color::RED, 0).unwrap();
        assert_eq!(display.interface().commands, [RAMWR]);
        assert!(display.interface().data.is_empty());
    }

    #[test]
    fn test_fill_rect_preclipped_sets_window_and_streams() {
        let mut display = test_display();
        display
            .fill_rect_preclipped(10, 20, 3, 2, Color::GREEN)
            .unwrap();

        let interface = display.interface();
        assert_eq!(interface.commands, [CASET, PASET, RAMWR]);
        assert_eq!(interface.pixel_writes, 6);
        assert_eq!(interface.pixel_set(), rect_pixels(10, 20, 3, 2));
        assert_eq!(interface.pixel(12, 21), Some(Color::GREEN.raw()));
    }

    #[test]
    fn test_draw_pixel_bounds() {
        let mut display = test_display();
        display.draw_pixel(-1, 0, Color::RED).unwrap();
        display.draw_pixel(0, -1, Color::RED).unwrap();
        display.draw_pixel(240, 0, Color::RED).unwrap();
        display.draw_pixel(0, 320, Color::RED).unwrap();
        assert_eq!(display.interface().write_count(), 0);

        display.draw_pixel(239, 319, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), rect_pixels(239, 319, 1, 1));
    }

    #[test]
    fn test_fill_rect_zero_size_is_noop() {
        let mut display = test_display();
        display.fill_rect(10, 10, 0, 5, Color::RED).unwrap();
        display.fill_rect(10, 10, 5, 0, Color::RED).unwrap();
        assert_eq!(display.interface().write_count(), 0);
    }

    #[test]
    fn test_fill_rect_fully_off_screen_is_noop() {
        let mut display = test_display();
        let cases: [(i16, i16, i16, i16); 6] = [
            (240, 0, 10, 10),
            (0, 320, 10, 10),
            (-10, 0, 10, 10),
            (0, -10, 10, 10),
            (-1, 5, -5, 5),
            (i16::MAX, i16::MAX, i16::MAX, i16::MAX),
        ];
        for (x, y, w, h) in cases {
            display.fill_rect(x, y, w, h, Color::RED).unwrap();
        }
        assert_eq!(display.interface().write_count(), 0);
    }

    #[test]
    fn test_fill_rect_negative_size_matches_normalized() {
        let mut negative = test_display();
        negative.fill_rect(20, 30, -5, -4, Color::RED).unwrap();

        let mut positive = test_display();
        positive.fill_rect(16, 27, 5, 4, Color::RED).unwrap();

        assert_eq!(
            negative.interface().pixel_set(),
            positive.interface().pixel_set()
        );
        assert_eq!(negative.interface().pixel_set(), rect_pixels(16, 27, 5, 4));
    }

    #[test]
    fn test_fill_rect_clips_each_edge() {
        let mut display = test_display();
        display.fill_rect(-3, -2, 10, 6, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), rect_pixels(0, 0, 7, 4));

        display.interface_mut().clear();
        display.fill_rect(235, 315, 10, 10, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), rect_pixels(235, 315, 5, 5));

        display.interface_mut().clear();
        display.fill_rect(-10, -10, 300, 400, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_writes, 240 * 320);
    }

    #[test]
    fn test_clip_rect_is_idempotent() {
        let clipped = clip_rect(-7, 300, 50, 50, 240, 320).unwrap();
        assert_eq!(clipped, Rect { x: 0, y: 300, w: 43, h: 20 });
        let again = clip_rect(
            clipped.x as i16,
            clipped.y as i16,
            clipped.w as i16,
            clipped.h as i16,
            240,
            320,
        );
        assert_eq!(again, Some(clipped));
    }

    #[test]
    fn test_axis_aligned_lines_match_hline_vline() {
        let mut line = test_display();
        line.draw_line(10, 10, 10, 15, Color::RED).unwrap();
        let mut vline = test_display();
        vline.draw_vline(10, 10, 6, Color::RED).unwrap();
        assert_eq!(line.interface().pixel_set(), vline.interface().pixel_set());
        assert_eq!(line.interface().pixel_set(), rect_pixels(10, 10, 1, 6));

        let mut line = test_display();
        line.draw_line(10, 10, 15, 10, Color::RED).unwrap();
        let mut hline = test_display();
        hline.draw_hline(10, 10, 6, Color::RED).unwrap();
        assert_eq!(line.interface().pixel_set(), hline.interface().pixel_set());
        assert_eq!(line.interface().pixel_set(), rect_pixels(10, 10, 6, 1));
    }

    #[test]
    fn test_reversed_axis_lines_cover_both_endpoints() {
        let mut display = test_display();
        display.draw_line(5, 15, 5, 10, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), rect_pixels(5, 10, 1, 6));

        display.interface_mut().clear();
        display.draw_line(15, 5, 10, 5, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), rect_pixels(10, 5, 6, 1));
    }

    #[test]
    fn test_single_point_line() {
        let mut display = test_display();
        display.draw_line(7, 8, 7, 8, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), rect_pixels(7, 8, 1, 1));
    }

    #[test]
    fn test_bresenham_shallow_line() {
        let expected: BTreeSet<_> = [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)].into_iter().collect();

        let mut display = test_display();
        display.draw_line(0, 0, 4, 2, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), expected);

        // Endpoints swapped give the same pixels
        let mut display = test_display();
        display.draw_line(4, 2, 0, 0, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), expected);
    }

    #[test]
    fn test_bresenham_steep_line() {
        let expected: BTreeSet<_> = [(0, 0), (0, 1), (1, 2), (1, 3), (2, 4)].into_iter().collect();
        let mut display = test_display();
        display.draw_line(0, 0, 2, 4, Color::RED).unwrap();
        assert_eq!(display.interface().pixel_set(), expected);
    }

    #[test]
    fn test_diagonal_line_is_clipped_per_pixel() {
        let mut display = test_display();
        display.draw_line(-2, -2, 2, 2, Color::RED).unwrap();
        let expected: BTreeSet<_> = [(0, 0), (1, 1), (2, 2)].into_iter().collect();
        assert_eq!(display.interface().pixel_set(), expected);
        // Each point is its own 1x1 window
        assert_eq!(display.interface().pixel_writes, 3);
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut display = test_display();
        display.draw_rect(10, 20, 4, 3, Color::RED).unwrap();

        let interior = rect_pixels(11, 21, 2, 1);
        let outline: BTreeSet<_> = rect_pixels(10, 20, 4, 3)
            .difference(&interior)
            .copied()
            .collect();
        assert_eq!(display.interface().pixel_set(), outline);
        assert_eq!(outline.len(), 10);
    }

    #[test]
    fn test_draw_rect_partly_off_screen() {
        let mut display = test_display();
        display.draw_rect(-1, -1, 3, 3, Color::RED).unwrap();
        let expected: BTreeSet<_> = [(1, 0), (0, 1), (1, 1)].into_iter().collect();
        assert_eq!(display.interface().pixel_set(), expected);
    }

    #[test]
    fn test_fill_screen_uses_logical_dimensions() {
        let mut display = test_display();
        display.set_rotation(1).unwrap();
        display.interface_mut().clear();

        display.fill_screen(Color::BLUE).unwrap();
        let interface = display.interface();
        assert_eq!(interface.pixel_writes, 320 * 240);
        assert_eq!(interface.pixel(319, 239), Some(Color::BLUE.raw()));
        assert_eq!(interface.pixel(239, 319), None);
    }

    #[test]
    fn test_fill_rect_propagates_interface_error() {
        let mut display = test_display();
        display.interface_mut().fail_after = Some(2);
        let result = display.fill_rect(0, 0, 10, 10, Color::RED);
        assert!(matches!(result, Err(Error::Interface(_))));
    }
}

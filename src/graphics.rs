//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] directly. There is no frame
//! buffer: every call goes straight to the panel through the clipping
//! engine in [`crate::draw`], so embedded-graphics primitives can be mixed
//! freely with the driver's own drawing and text calls.
//!
//! - `draw_iter` writes one clipped pixel per item
//! - `fill_solid` clips the area and streams a single color
//! - `fill_contiguous` streams the colors into one address window when the
//!   area is fully visible
//! - `clear` fills the whole logical screen
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use ili9341_ft6206::{Builder, Color, Display, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let interface = Interface::new(MockSpi, MockPin, MockPin);
//! # let config = match Builder::new().build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut display = Display::new(interface, config);
//!
//! let _ = display.clear(Color::BLACK);
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(100, 50))
//!     .into_styled(PrimitiveStyle::with_fill(Color::NAVY))
//!     .draw(&mut display);
//! let _ = Circle::new(Point::new(60, 120), 80)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::YELLOW, 3))
//!     .draw(&mut display);
//! ```

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    primitives::Rectangle,
};

use crate::color::Color;
use crate::command::RAMWR;
use crate::display::{Display, DisplayResult};
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Pixels buffered per data write when streaming colors
const STREAM_PIXELS: usize = 32;

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Stream colors into the current address window
    fn write_pixels<It>(&mut self, colors: It) -> DisplayResult<I>
    where
        It: IntoIterator<Item = Color>,
    {
        self.send_command(RAMWR, &[])?;

        let mut buffer = [0u8; STREAM_PIXELS * 2];
        let mut len = 0;
        for color in colors {
            buffer[len..len + 2].copy_from_slice(&color.to_be_bytes());
            len += 2;
            if len == buffer.len() {
                self.send_data(&buffer)?;
                len = 0;
            }
        }
        if len > 0 {
            self.send_data(&buffer[..len])?;
        }
        Ok(())
    }
}

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = Color;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.put_pixel(x, y, color)?;
        }
        Ok(())
    }

    fn fill_contiguous<Iter>(&mut self, area: &Rectangle, colors: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Self::Color>,
    {
        let drawable = area.intersection(&self.bounding_box());
        if drawable.is_zero_sized() {
            return Ok(());
        }

        if drawable != *area {
            // Colors are row-major over the whole area, clip per pixel
            let points = area
                .rows()
                .flat_map(|y| area.columns().map(move |x| Point::new(x, y)));
            return self.draw_iter(points.zip(colors).map(|(point, color)| Pixel(point, color)));
        }

        let Size { width, height } = area.size;
        self.set_address_window(
            area.top_left.x as u16,
            area.top_left.y as u16,
            width as u16,
            height as u16,
        )?;
        self.write_pixels(colors.into_iter().take((width * height) as usize))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let drawable = area.intersection(&self.bounding_box());
        if drawable.is_zero_sized() {
            return Ok(());
        }

        self.fill_rect_preclipped(
            drawable.top_left.x as u16,
            drawable.top_left.y as u16,
            drawable.size.width as u16,
            drawable.size.height as u16,
            color,
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color)
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CASET, PASET};
    use crate::config::Builder;
    use crate::mock::MockInterface;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    fn test_display() -> Display<MockInterface> {
        let config = Builder::new().build().unwrap();
        Display::new(MockInterface::new(), config)
    }

    #[test]
    fn test_size_follows_orientation() {
        let mut display = test_display();
        assert_eq!(display.size(), Size::new(240, 320));
        display.set_rotation(3).unwrap();
        assert_eq!(display.size(), Size::new(320, 240));
    }

    #[test]
    fn test_draw_iter_skips_off_screen_pixels() {
        let mut display = test_display();
        let pixels = [
            Pixel(Point::new(-1, 0), Color::RED),
            Pixel(Point::new(3, 4), Color::RED),
            Pixel(Point::new(240, 0), Color::RED),
            Pixel(Point::new(0, i32::MAX), Color::RED),
        ];
        display.draw_iter(pixels).unwrap();
        let expected: BTreeSet<_> = [(3, 4)].into_iter().collect();
        assert_eq!(display.interface().pixel_set(), expected);
    }

    #[test]
    fn test_fill_solid_clips_to_screen() {
        let mut display = test_display();
        Rectangle::new(Point::new(-2, 318), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(Color::RED))
            .draw(&mut display)
            .unwrap();

        let interface = display.interface();
        assert_eq!(interface.commands, [CASET, PASET, RAMWR]);
        assert_eq!(interface.pixel_writes, 6);
        assert_eq!(interface.pixel(2, 319), Some(Color::RED.raw()));
    }

    #[test]
    fn test_fill_solid_off_screen_is_noop() {
        let mut display = test_display();
        display
            .fill_solid(&Rectangle::new(Point::new(240, 0), Size::new(5, 5)), Color::RED)
            .unwrap();
        assert_eq!(display.interface().write_count(), 0);
    }

    #[test]
    fn test_fill_contiguous_streams_one_window() {
        let mut display = test_display();
        let colors: Vec<_> = (0..6u16).map(Color).collect();
        let area = Rectangle::new(Point::new(10, 20), Size::new(3, 2));
        display.fill_contiguous(&area, colors).unwrap();

        let interface = display.interface();
        assert_eq!(interface.commands, [CASET, PASET, RAMWR]);
        assert_eq!(interface.pixel(10, 20), Some(0));
        assert_eq!(interface.pixel(12, 20), Some(2));
        assert_eq!(interface.pixel(10, 21), Some(3));
        assert_eq!(interface.pixel(12, 21), Some(5));
    }

    #[test]
    fn test_fill_contiguous_partly_visible() {
        let mut display = test_display();
        let colors: Vec<_> = (0..4u16).map(Color).collect();
        let area = Rectangle::new(Point::new(-1, 0), Size::new(2, 2));
        display.fill_contiguous(&area, colors).unwrap();

        let interface = display.interface();
        assert_eq!(interface.pixel_writes, 2);
        assert_eq!(interface.pixel(0, 0), Some(1));
        assert_eq!(interface.pixel(0, 1), Some(3));
    }

    #[test]
    fn test_clear_fills_logical_screen() {
        let mut display = test_display();
        display.clear(Color::WHITE).unwrap();
        assert_eq!(display.interface().pixel_writes, 240 * 320);
    }

    #[test]
    fn test_line_primitive() {
        let mut display = test_display();
        Line::new(Point::new(0, 0), Point::new(3, 0))
            .into_styled(PrimitiveStyle::with_stroke(Color::GREEN, 1))
            .draw(&mut display)
            .unwrap();
        assert_eq!(display.interface().pixel_set().len(), 4);
    }
}

//! ILI9341 TFT Display and FT6206 Touch Driver
//!
//! A driver for 240x320 ILI9341 color TFT panels paired with an FT6206
//! capacitive touch controller, as found on the Adafruit 2.8" touch shield.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Clipped drawing primitives with no frame buffer
//! - Adafruit GFX bitmap font rendering
//! - Touch coordinates remapped to match the display rotation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::i2c::{I2c, Operation as I2cOperation};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ili9341_ft6206::{
//!     Builder, Color, Display, Ft6206, Interface, Orientation, TouchConfig,
//! };
//!
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
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [I2cOperation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let i2c = MockI2c;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst);
//! let config = match Builder::new().orientation(Orientation::Landscape).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.reset(&mut delay);
//! let _ = display.fill_screen(Color::BLACK);
//!
//! let mut touch = Ft6206::new(i2c, TouchConfig::default());
//! if touch.init(ili9341_ft6206::touch::DEFAULT_THRESHOLD).is_ok() {
//!     touch.set_orientation(display.orientation());
//!     if let Ok(sample) = touch.read_sample() {
//!         if sample.touched {
//!             let _ = display.fill_rect(sample.x as i16 - 2, sample.y as i16 - 2, 5, 5, Color::RED);
//!         }
//!     }
//! }
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// RGB565 color type
pub mod color;
/// ILI9341 command definitions and initialization table
pub mod command;
/// Display and touch configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Drawing primitives with clipping
pub mod draw;
/// Error types for the driver
pub mod error;
/// Bitmap font tables
pub mod font;
/// Hardware interface abstraction
pub mod interface;
/// Text rendering with bitmap fonts
pub mod text;
/// FT6206 capacitive touch controller
pub mod touch;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use color::Color;
pub use config::{
    Builder, Config, Dimensions, MAX_COLUMNS, MAX_ROWS, Orientation, TouchConfig, TouchStatusMode,
};
pub use display::Display;
pub use draw::{Rect, clip_rect};
pub use error::{BuilderError, Error, TouchError};
pub use font::{Font, Glyph};
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, Interface};
pub use text::TextRenderer;
pub use touch::{Ft6206, TouchSample};

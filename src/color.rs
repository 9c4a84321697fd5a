//! RGB565 color type
//!
//! The ILI9341 is configured for 16 bits per pixel (`PIXFMT` 0x55), so every
//! color is a packed 5-6-5 value sent most significant byte first.
//!
//! ## Bit Layout
//!
//! | Bits  | Channel |
//! |-------|---------|
//! | 15-11 | Red     |
//! | 10-5  | Green   |
//! | 4-0   | Blue    |
//!
//! ## Example
//!
//! ```
//! use ili9341_ft6206::Color;
//!
//! // 8-bit channels are truncated to 5/6/5 bits
//! let orange = Color::new(255, 165, 0);
//! assert_eq!(orange, Color::ORANGE);
//! assert_eq!(orange.to_be_bytes(), [0xFD, 0x20]);
//! ```

/// 16-bit RGB565 color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u16);

impl Color {
    /// 0, 0, 0
    pub const BLACK: Self = Self(0x0000);
    /// 0, 0, 123
    pub const NAVY: Self = Self(0x000F);
    /// 0, 125, 0
    pub const DARK_GREEN: Self = Self(0x03E0);
    /// 0, 125, 123
    pub const DARK_CYAN: Self = Self(0x03EF);
    /// 123, 0, 0
    pub const MAROON: Self = Self(0x7800);
    /// 123, 0, 123
    pub const PURPLE: Self = Self(0x780F);
    /// 123, 125, 0
    pub const OLIVE: Self = Self(0x7BE0);
    /// 198, 195, 198
    pub const LIGHT_GREY: Self = Self(0xC618);
    /// 123, 125, 123
    pub const DARK_GREY: Self = Self(0x7BEF);
    /// 0, 0, 255
    pub const BLUE: Self = Self(0x001F);
    /// 0, 255, 0
    pub const GREEN: Self = Self(0x07E0);
    /// 0, 255, 255
    pub const CYAN: Self = Self(0x07FF);
    /// 255, 0, 0
    pub const RED: Self = Self(0xF800);
    /// 255, 0, 255
    pub const MAGENTA: Self = Self(0xF81F);
    /// 255, 255, 0
    pub const YELLOW: Self = Self(0xFFE0);
    /// 255, 255, 255
    pub const WHITE: Self = Self(0xFFFF);
    /// 255, 165, 0
    pub const ORANGE: Self = Self(0xFD20);
    /// 173, 255, 41
    pub const GREEN_YELLOW: Self = Self(0xAFE5);
    /// 255, 130, 198
    pub const PINK: Self = Self(0xFC18);

    /// Pack 8-bit channels into RGB565
    ///
    /// The low 3 bits of red and blue and the low 2 bits of green are
    /// dropped.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// Raw packed value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Wire representation, most significant byte first
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Color {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU16;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::prelude::IntoStorage;
        Self(color.into_storage())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Color) -> Self {
        use embedded_graphics_core::pixelcolor::raw::RawU16;
        Self::from(RawU16::new(color.0))
    }
}

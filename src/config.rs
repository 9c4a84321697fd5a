//! Display and touch configuration types and builder

use crate::command::ILI9341_INIT_TABLE;
pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Native (unrotated) panel dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels (columns in portrait orientation)
    pub width: u16,
    /// Height in pixels (rows in portrait orientation)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero or
    /// exceeds the controller's `MAX_COLUMNS` x `MAX_ROWS` frame memory.
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_COLUMNS || height == 0 || height > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Dimensions as seen through the given orientation
    pub fn oriented(self, orientation: Orientation) -> Self {
        if orientation.is_swapped() {
            Self {
                width: self.height,
                height: self.width,
            }
        } else {
            self
        }
    }
}

impl Default for Dimensions {
    /// The 240x320 panel used on 2.8" breakout boards
    fn default() -> Self {
        Self {
            width: MAX_COLUMNS,
            height: MAX_ROWS,
        }
    }
}

/// Panel orientation, shared by the display and the touch controller
///
/// The numbering follows the rotation index used by the application:
/// 0 and 2 keep the native width/height, 1 and 3 swap them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Rotation 0, connector at the bottom
    #[default]
    Portrait,
    /// Rotation 1
    Landscape,
    /// Rotation 2
    PortraitFlipped,
    /// Rotation 3
    LandscapeFlipped,
}

impl Orientation {
    /// Build an orientation from a rotation index
    ///
    /// Only the low two bits are used, so `4` wraps back to `Portrait`.
    ///
    /// ```
    /// use ili9341_ft6206::Orientation;
    ///
    /// assert_eq!(Orientation::from_index(1), Orientation::Landscape);
    /// assert_eq!(Orientation::from_index(6), Orientation::PortraitFlipped);
    /// ```
    pub fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Self::Portrait,
            1 => Self::Landscape,
            2 => Self::PortraitFlipped,
            _ => Self::LandscapeFlipped,
        }
    }

    /// Rotation index in `0..=3`
    pub fn index(self) -> u8 {
        match self {
            Self::Portrait => 0,
            Self::Landscape => 1,
            Self::PortraitFlipped => 2,
            Self::LandscapeFlipped => 3,
        }
    }

    /// Whether logical width and height are swapped relative to native
    pub fn is_swapped(self) -> bool {
        matches!(self, Self::Landscape | Self::LandscapeFlipped)
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Native panel dimensions
    pub dimensions: Dimensions,
    /// Orientation applied at the end of initialization
    pub orientation: Orientation,
    /// Whether the panel's color filter is BGR ordered (MADCTL BGR bit)
    pub bgr: bool,
    /// Initialization table, see [`crate::command::InitSequence`]
    pub init_table: &'static [u8],
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust
/// use ili9341_ft6206::{Builder, Dimensions, Orientation};
///
/// let dims = match Dimensions::new(240, 320) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .orientation(Orientation::Landscape)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert!(config.bgr);
/// ```
#[must_use]
pub struct Builder {
    /// Native panel dimensions
    dimensions: Dimensions,
    /// Orientation applied at the end of initialization
    orientation: Orientation,
    /// MADCTL BGR bit
    bgr: bool,
    /// Initialization table
    init_table: &'static [u8],
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            orientation: Orientation::Portrait,
            // Adafruit 2.8" panels are BGR
            bgr: true,
            init_table: ILI9341_INIT_TABLE,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set native panel dimensions (defaults to 240x320)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = dims;
        self
    }

    /// Set the orientation applied after initialization
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set whether the panel uses BGR subpixel order
    pub fn bgr(mut self, bgr: bool) -> Self {
        self.bgr = bgr;
        self
    }

    /// Replace the vendor initialization table
    ///
    /// The table uses the `opcode, count|0x80, args...` layout terminated by
    /// a zero opcode, see [`crate::command::InitSequence`].
    pub fn init_table(mut self, table: &'static [u8]) -> Self {
        self.init_table = table;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if the dimensions exceed
    /// the controller's limits.
    pub fn build(self) -> Result<Config, BuilderError> {
        let Dimensions { width, height } = self.dimensions;
        let dimensions = Dimensions::new(width, height)?;
        Ok(Config {
            dimensions,
            orientation: self.orientation,
            bgr: self.bgr,
            init_table: self.init_table,
        })
    }
}

/// How the touch controller's status register is decoded
///
/// Two generations of FT6206 firmware report presence differently. The
/// choice is made when the driver is constructed and never mixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchStatusMode {
    /// Low nibble of the status register is non-zero while touched
    #[default]
    StatusNibble,
    /// Status register holds the number of contacts; values above 2 are
    /// sensor glitches and read as not touched
    ContactCount,
}

/// Touch controller configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Native panel dimensions used by the rotation remap
    pub native: Dimensions,
    /// Status register decoding
    pub status_mode: TouchStatusMode,
    /// Expected value of the vendor ID register
    pub vendor_id: u8,
    /// Expected value of the chip ID register
    pub chip_id: u8,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            address: crate::touch::FT6206_ADDRESS,
            native: Dimensions::default(),
            status_mode: TouchStatusMode::StatusNibble,
            vendor_id: crate::touch::FT6206_VENDOR_ID,
            chip_id: crate::touch::FT6206_CHIP_ID,
        }
    }
}

impl TouchConfig {
    /// Set the I2C address
    #[must_use]
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set native panel dimensions
    #[must_use]
    pub fn with_native(mut self, native: Dimensions) -> Self {
        self.native = native;
        self
    }

    /// Set status register decoding
    #[must_use]
    pub fn with_status_mode(mut self, mode: TouchStatusMode) -> Self {
        self.status_mode = mode;
        self
    }

    /// Set the expected vendor and chip IDs (e.g. 0x36 for FT6236)
    #[must_use]
    pub fn with_ids(mut self, vendor_id: u8, chip_id: u8) -> Self {
        self.vendor_id = vendor_id;
        self.chip_id = chip_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_reject_oversized_panel() {
        assert_eq!(
            Dimensions::new(241, 320),
            Err(BuilderError::InvalidDimensions {
                width: 241,
                height: 320
            })
        );
        assert!(Dimensions::new(240, 0).is_err());
        assert!(Dimensions::new(128, 160).is_ok());
    }

    #[test]
    fn test_oriented_dimensions_swap_for_odd_rotations() {
        let dims = Dimensions::default();
        for index in 0..4u8 {
            let oriented = dims.oriented(Orientation::from_index(index));
            if index % 2 == 0 {
                assert_eq!((oriented.width, oriented.height), (240, 320));
            } else {
                assert_eq!((oriented.width, oriented.height), (320, 240));
            }
        }
    }

    #[test]
    fn test_orientation_index_round_trip() {
        for index in 0..8u8 {
            assert_eq!(Orientation::from_index(index).index(), index % 4);
        }
    }

    #[test]
    fn test_builder_rejects_invalid_dimensions() {
        let result = Builder::new()
            .dimensions(Dimensions {
                width: 0,
                height: 320,
            })
            .build();
        assert!(matches!(result, Err(BuilderError::InvalidDimensions { .. })));
    }
}

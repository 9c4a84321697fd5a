//! FT6206 capacitive touch controller
//!
//! The FT6206 reports touches in native panel coordinates with the origin
//! in the opposite corner from the display's rotation 0. [`Ft6206`] polls
//! the chip, decodes the first touch point and remaps it into the logical
//! coordinates of the current [`Orientation`], so the numbers line up with
//! what [`Display`](crate::Display) draws.
//!
//! Only the single most recent sample is kept.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{ErrorType, I2c, Operation};
//! use ili9341_ft6206::touch::{DEFAULT_THRESHOLD, Ft6206};
//! use ili9341_ft6206::{Orientation, TouchConfig};
//!
//! # struct MockI2c;
//! # impl ErrorType for MockI2c { type Error = core::convert::Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! let mut touch = Ft6206::new(MockI2c, TouchConfig::default());
//! if touch.init(DEFAULT_THRESHOLD).is_ok() {
//!     touch.set_orientation(Orientation::Landscape);
//!     if let Ok(sample) = touch.read_sample() {
//!         if sample.touched {
//!             // sample.x in 0..320, sample.y in 0..240
//!         }
//!     }
//! }
//! ```

use embedded_hal::i2c::I2c;
use log::{Level, debug, log_enabled, trace, warn};

use crate::config::{Dimensions, Orientation, TouchConfig, TouchStatusMode};
use crate::error::TouchError;

/// 7-bit I2C address of the FT6206
pub const FT6206_ADDRESS: u8 = 0x38;

/// Expected vendor ID (FocalTech)
pub const FT6206_VENDOR_ID: u8 = 0x11;

/// Chip ID of the FT6206
pub const FT6206_CHIP_ID: u8 = 0x06;

/// Chip ID of the FT6236
pub const FT6236_CHIP_ID: u8 = 0x36;

/// Chip ID of the FT6236U
pub const FT6236U_CHIP_ID: u8 = 0x64;

/// Touch detection threshold used by the reference firmware
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Device mode, also the start of the touch data block
pub const REG_DEVICE_MODE: u8 = 0x00;
/// Touch status (number of touch points)
pub const REG_TD_STATUS: u8 = 0x02;
/// Threshold for touch detection
pub const REG_THRESHOLD: u8 = 0x80;
/// Report rate in active mode
pub const REG_POINT_RATE: u8 = 0x88;
/// Chip ID
pub const REG_CHIP_ID: u8 = 0xA3;
/// Firmware version
pub const REG_FIRMWARE_VERSION: u8 = 0xA6;
/// Vendor (panel) ID
pub const REG_VENDOR_ID: u8 = 0xA8;

/// Bytes read per poll: mode, gesture, status, then X and Y of point 1
const SAMPLE_LEN: usize = 7;

/// Registers covered by the debug dump in [`Ft6206::init`]
const DUMP_LEN: usize = 16;

type TouchResult<T, I> =
    core::result::Result<T, TouchError<<I as embedded_hal::i2c::ErrorType>::Error>>;

/// One decoded touch poll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchSample {
    /// Whether a finger is on the panel
    pub touched: bool,
    /// 12-bit X as reported by the chip
    pub raw_x: u16,
    /// 12-bit Y as reported by the chip
    pub raw_y: u16,
    /// X in logical coordinates
    pub x: u16,
    /// Y in logical coordinates
    pub y: u16,
}

/// Map a raw sample into logical coordinates
///
/// `native` is the panel size at rotation 0. Raw values beyond the panel
/// edge are clamped to 0 where the mapping subtracts them.
///
/// ```
/// use ili9341_ft6206::touch::remap;
/// use ili9341_ft6206::{Dimensions, Orientation};
///
/// let native = Dimensions::default();
/// assert_eq!(remap(Orientation::Portrait, native, 10, 20), (230, 300));
/// assert_eq!(remap(Orientation::Landscape, native, 10, 20), (300, 10));
/// ```
pub fn remap(orientation: Orientation, native: Dimensions, raw_x: u16, raw_y: u16) -> (u16, u16) {
    let Dimensions { width, height } = native;
    match orientation {
        Orientation::Portrait => (width.saturating_sub(raw_x), height.saturating_sub(raw_y)),
        Orientation::Landscape => (height.saturating_sub(raw_y), raw_x),
        Orientation::PortraitFlipped => (raw_x, raw_y),
        Orientation::LandscapeFlipped => (raw_y, width.saturating_sub(raw_x)),
    }
}

/// Decode presence and raw coordinates from the touch data block
fn decode(block: &[u8; SAMPLE_LEN], mode: TouchStatusMode) -> (bool, u16, u16) {
    let status = block[usize::from(REG_TD_STATUS)];
    let touched = match mode {
        TouchStatusMode::StatusNibble => status & 0x0F != 0,
        TouchStatusMode::ContactCount => matches!(status, 1 | 2),
    };
    let raw_x = (u16::from(block[3] & 0x0F) << 8) | u16::from(block[4]);
    let raw_y = (u16::from(block[5] & 0x0F) << 8) | u16::from(block[6]);
    (touched, raw_x, raw_y)
}

/// FT6206 driver
pub struct Ft6206<I2C> {
    i2c: I2C,
    config: TouchConfig,
    orientation: Orientation,
    width: u16,
    height: u16,
    sample: TouchSample,
}

impl<I2C> Ft6206<I2C>
where
    I2C: I2c,
{
    /// Create a driver; no bus traffic until [`init`](Self::init)
    pub fn new(i2c: I2C, config: TouchConfig) -> Self {
        Self {
            i2c,
            config,
            orientation: Orientation::Portrait,
            width: config.native.width,
            height: config.native.height,
            sample: TouchSample::default(),
        }
    }

    /// Program the touch threshold and verify the chip identity
    ///
    /// On success the stored sample is cleared and the orientation is reset
    /// to [`Orientation::Portrait`]. On an identity mismatch the driver
    /// state is left as it was.
    ///
    /// With `debug` logging enabled, registers `0x00..0x10` and the
    /// threshold are dumped before the threshold is written. Reads made
    /// only for logging never fail `init`.
    pub fn init(&mut self, threshold: u8) -> TouchResult<(), I2C> {
        if log_enabled!(Level::Debug) {
            self.dump_registers();
        }

        self.write_register(REG_THRESHOLD, threshold)?;

        let vendor_id = self.read_register(REG_VENDOR_ID)?;
        let chip_id = self.read_register(REG_CHIP_ID)?;
        if vendor_id != self.config.vendor_id || chip_id != self.config.chip_id {
            warn!(
                "ft6206: unexpected ids vendor 0x{vendor_id:02X} chip 0x{chip_id:02X} (want 0x{:02X}/0x{:02X})",
                self.config.vendor_id, self.config.chip_id
            );
            return Err(TouchError::Identity { vendor_id, chip_id });
        }

        self.sample = TouchSample::default();
        self.set_orientation(Orientation::Portrait);

        match (
            self.read_register(REG_FIRMWARE_VERSION),
            self.read_register(REG_POINT_RATE),
        ) {
            (Ok(firmware), Ok(point_rate)) => debug!(
                "ft6206: vendor 0x{vendor_id:02X} chip 0x{chip_id:02X} firmware 0x{firmware:02X} rate {point_rate}Hz threshold {threshold}"
            ),
            _ => debug!(
                "ft6206: vendor 0x{vendor_id:02X} chip 0x{chip_id:02X} threshold {threshold}, firmware info unavailable"
            ),
        }
        Ok(())
    }

    /// Set the orientation used to remap samples
    pub fn set_orientation(&mut self, orientation: Orientation) {
        let logical = self.config.native.oriented(orientation);
        self.orientation = orientation;
        self.width = logical.width;
        self.height = logical.height;
        trace!("ft6206: orientation {}", orientation.index());
    }

    /// Set orientation from a rotation index, taken modulo 4
    pub fn set_rotation(&mut self, rotation: u8) {
        self.set_orientation(Orientation::from_index(rotation));
    }

    /// Poll the controller and decode the first touch point
    ///
    /// The result is also stored and available through
    /// [`sample`](Self::sample). A bus error leaves the stored sample as it
    /// was.
    pub fn read_sample(&mut self) -> TouchResult<TouchSample, I2C> {
        let mut block = [0u8; SAMPLE_LEN];
        self.i2c
            .write_read(self.config.address, &[REG_DEVICE_MODE], &mut block)
            .map_err(TouchError::Bus)?;

        let (touched, raw_x, raw_y) = decode(&block, self.config.status_mode);
        let (x, y) = remap(self.orientation, self.config.native, raw_x, raw_y);
        self.sample = TouchSample {
            touched,
            raw_x,
            raw_y,
            x,
            y,
        };
        Ok(self.sample)
    }

    /// Latest sample
    pub fn sample(&self) -> TouchSample {
        self.sample
    }

    /// Whether the latest sample was a touch
    pub fn is_touched(&self) -> bool {
        self.sample.touched
    }

    /// Logical X of the latest sample
    pub fn touch_x(&self) -> u16 {
        self.sample.x
    }

    /// Logical Y of the latest sample
    pub fn touch_y(&self) -> u16 {
        self.sample.y
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Logical width for the current orientation
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height for the current orientation
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Driver configuration
    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Firmware version register
    pub fn firmware_version(&mut self) -> TouchResult<u8, I2C> {
        self.read_register(REG_FIRMWARE_VERSION)
    }

    /// Vendor ID register
    pub fn vendor_id(&mut self) -> TouchResult<u8, I2C> {
        self.read_register(REG_VENDOR_ID)
    }

    /// Chip ID register
    pub fn chip_id(&mut self) -> TouchResult<u8, I2C> {
        self.read_register(REG_CHIP_ID)
    }

    /// Touch threshold register
    pub fn threshold(&mut self) -> TouchResult<u8, I2C> {
        self.read_register(REG_THRESHOLD)
    }

    /// Report rate register, in Hz
    pub fn point_rate(&mut self) -> TouchResult<u8, I2C> {
        self.read_register(REG_POINT_RATE)
    }

    /// Release the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn dump_registers(&mut self) {
        let mut block = [0u8; DUMP_LEN];
        match self
            .i2c
            .write_read(self.config.address, &[REG_DEVICE_MODE], &mut block)
        {
            Ok(()) => {
                for (register, value) in block.iter().enumerate() {
                    debug!("ft6206: reg 0x{register:02X} = 0x{value:02X}");
                }
            }
            Err(_) => debug!("ft6206: register dump failed"),
        }
        if let Ok(value) = self.read_register(REG_THRESHOLD) {
            debug!("ft6206: reg 0x{REG_THRESHOLD:02X} = 0x{value:02X}");
        }
    }

    fn read_register(&mut self, register: u8) -> TouchResult<u8, I2C> {
        let mut value = [0u8];
        self.i2c
            .write_read(self.config.address, &[register], &mut value)
            .map_err(TouchError::Bus)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> TouchResult<(), I2C> {
        self.i2c
            .write(self.config.address, &[register, value])
            .map_err(TouchError::Bus)
    }
}

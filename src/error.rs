//! Error types for the driver
//!
//! - [`BuilderError`]: rejected panel geometry, raised before any bus traffic
//! - [`Error`]: a failed SPI/pin write or a malformed init table
//! - [`TouchError`]: a failed I2C transfer or an unexpected touch chip
//! - [`InterfaceError`](crate::interface::InterfaceError): what [`Interface`](crate::Interface)
//!   reports as `Error::Interface`
//!
//! Geometry that falls off screen and characters missing from a font are
//! not errors; the drawing engine absorbs them silently.
//!
//! ## Example
//!
//! ```
//! use ili9341_ft6206::{BuilderError, Dimensions};
//!
//! // Wider than the controller can address
//! let result = Dimensions::new(480, 320);
//! assert!(matches!(result, Err(BuilderError::InvalidDimensions { .. })));
//! ```

use crate::interface::DisplayInterface;

/// Maximum columns (native width) addressable by the ILI9341
pub const MAX_COLUMNS: u16 = 240;

/// Maximum rows (native height) addressable by the ILI9341
pub const MAX_ROWS: u16 = 320;

/// Display driver error
///
/// Carries the interface's own error type so callers can inspect what the
/// bus reported.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// The [`DisplayInterface`] failed to send a command or data
    Interface(I::Error),
    /// The initialization table is malformed
    ///
    /// Raised when an entry runs past the end of the table, the terminating
    /// zero opcode is missing, or the table holds more entries than
    /// [`MAX_INIT_COMMANDS`](crate::command::MAX_INIT_COMMANDS).
    InvalidInitTable {
        /// Byte offset of the offending entry
        offset: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidInitTable { offset } => {
                write!(f, "Invalid init table entry at byte {offset}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when talking to the touch controller
#[derive(Debug, PartialEq)]
pub enum TouchError<E> {
    /// I2C bus error
    Bus(E),
    /// The chip did not report the expected vendor/chip identifiers
    ///
    /// Either no controller is present or it is a different variant.
    Identity {
        /// Vendor ID read from the chip
        vendor_id: u8,
        /// Chip ID read from the chip
        chip_id: u8,
    },
}

impl<E: core::fmt::Debug> core::fmt::Display for TouchError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "I2C error: {e:?}"),
            Self::Identity { vendor_id, chip_id } => write!(
                f,
                "Unexpected touch controller: vendor 0x{vendor_id:02X}, chip 0x{chip_id:02X}"
            ),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for TouchError<E> {}

/// Configuration error from [`Builder::build`](crate::config::Builder::build)
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// A side is zero or larger than the controller's frame memory
    InvalidDimensions {
        /// Native width requested
        width: u16,
        /// Native height requested
        height: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

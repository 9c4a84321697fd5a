//! ILI9341 command definitions
//!
//! This module defines the command bytes used to control the ILI9341
//! TFT controller, the vendor initialization table, and its parsed form.
//! Commands are sent over SPI with the DC pin low for the opcode and high
//! for the argument bytes.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Set DC low (command mode)
//! 2. Send command byte
//! 3. Set DC high (data mode)
//! 4. Send argument bytes (if any)
//!
//! Multi-byte coordinates are big-endian on the wire.
//!
//! ## Example
//!
//! ```
//! use ili9341_ft6206::command::{InitSequence, ILI9341_INIT_TABLE, SLPOUT};
//!
//! let sequence = match InitSequence::parse(ILI9341_INIT_TABLE) {
//!     Ok(sequence) => sequence,
//!     Err(_) => return,
//! };
//! let sleep_out = sequence.iter().find(|cmd| cmd.opcode == SLPOUT);
//! assert!(sleep_out.is_some_and(|cmd| cmd.delay_after));
//! ```

use heapless::Vec;

// System control commands

/// No operation (0x00), also terminates the initialization table
pub const NOP: u8 = 0x00;

/// Software reset (0x01)
///
/// Wait [`RESET_DELAY_MS`] before sending further commands.
pub const SWRESET: u8 = 0x01;

/// Enter sleep mode (0x10)
pub const SLPIN: u8 = 0x10;

/// Sleep out (0x11)
///
/// The controller needs 120ms before it accepts further commands.
pub const SLPOUT: u8 = 0x11;

/// Normal display mode on (0x13)
pub const NORON: u8 = 0x13;

/// Display inversion off (0x20)
pub const INVOFF: u8 = 0x20;

/// Display inversion on (0x21)
pub const INVON: u8 = 0x21;

/// Gamma set (0x26)
pub const GAMMASET: u8 = 0x26;

/// Display off (0x28)
pub const DISPOFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPON: u8 = 0x29;

// Memory window commands

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const CASET: u8 = 0x2A;

/// Page (row) address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const PASET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Followed by 2 bytes per pixel (RGB565, MSB first) filling the current
/// address window row by row.
pub const RAMWR: u8 = 0x2C;

/// Vertical scrolling definition (0x33)
///
/// Requires 6 bytes: top fixed area, scroll area, bottom fixed area,
/// each big-endian. The three must sum to the native height.
pub const VSCRDEF: u8 = 0x33;

/// Memory access control (0x36)
///
/// Requires 1 byte built from the `MADCTL_*` bits.
pub const MADCTL: u8 = 0x36;

/// Vertical scrolling start address (0x37)
///
/// Requires 2 bytes: [line_MSB, line_LSB]
pub const VSCRSADD: u8 = 0x37;

/// Pixel format set (0x3A)
pub const PIXFMT: u8 = 0x3A;

// Panel tuning commands used by the initialization table

/// Frame rate control, normal mode (0xB1)
pub const FRMCTR1: u8 = 0xB1;

/// Display function control (0xB6)
pub const DFUNCTR: u8 = 0xB6;

/// Power control 1 (0xC0)
pub const PWCTR1: u8 = 0xC0;

/// Power control 2 (0xC1)
pub const PWCTR2: u8 = 0xC1;

/// VCOM control 1 (0xC5)
pub const VMCTR1: u8 = 0xC5;

/// VCOM control 2 (0xC7)
pub const VMCTR2: u8 = 0xC7;

/// Positive gamma correction (0xE0)
pub const GMCTRP1: u8 = 0xE0;

/// Negative gamma correction (0xE1)
pub const GMCTRN1: u8 = 0xE1;

// MADCTL bits

/// Row address order, bottom to top
pub const MADCTL_MY: u8 = 0x80;
/// Column address order, right to left
pub const MADCTL_MX: u8 = 0x40;
/// Row/column exchange
pub const MADCTL_MV: u8 = 0x20;
/// LCD vertical refresh bottom to top
pub const MADCTL_ML: u8 = 0x10;
/// BGR color filter order
pub const MADCTL_BGR: u8 = 0x08;
/// LCD horizontal refresh right to left
pub const MADCTL_MH: u8 = 0x04;

// Timing

/// Delay after software reset and after flagged init entries, in ms
pub const RESET_DELAY_MS: u32 = 150;

/// Settle time after sleep in/out, in ms
pub const SLEEP_DELAY_MS: u32 = 120;

/// Set in an entry's length byte to request [`RESET_DELAY_MS`] after it
pub const DELAY_FLAG: u8 = 0x80;

/// Maximum number of entries an initialization table may hold
pub const MAX_INIT_COMMANDS: usize = 32;

/// Initialization table for the Adafruit 2.8" ILI9341 panel
///
/// Each entry is `opcode, length, args...` where the low 7 bits of
/// `length` count the arguments and [`DELAY_FLAG`] requests a pause after
/// the command. A zero opcode ends the table.
#[rustfmt::skip]
pub const ILI9341_INIT_TABLE: &[u8] = &[
    0xEF, 3, 0x03, 0x80, 0x02,
    0xCF, 3, 0x00, 0xC1, 0x30,
    0xED, 4, 0x64, 0x03, 0x12, 0x81,
    0xE8, 3, 0x85, 0x00, 0x78,
    0xCB, 5, 0x39, 0x2C, 0x00, 0x34, 0x02,
    0xF7, 1, 0x20,
    0xEA, 2, 0x00, 0x00,
    PWCTR1, 1, 0x23,
    PWCTR2, 1, 0x10,
    VMCTR1, 2, 0x3E, 0x28,
    VMCTR2, 1, 0x86,
    MADCTL, 1, 0x48,
    VSCRSADD, 1, 0x00,
    PIXFMT, 1, 0x55,
    FRMCTR1, 2, 0x00, 0x18,
    DFUNCTR, 3, 0x08, 0x82, 0x27,
    0xF2, 1, 0x00,
    GAMMASET, 1, 0x01,
    GMCTRP1, 15, 0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08,
        0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09, 0x00,
    GMCTRN1, 15, 0x00, 0x0E, 0x14, 0x03, 0x11, 0x07,
        0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36, 0x0F,
    SLPOUT, DELAY_FLAG,
    DISPON, DELAY_FLAG,
    NOP,
];

/// One parsed entry of an initialization table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitCommand<'a> {
    /// Command byte
    pub opcode: u8,
    /// Argument bytes
    pub args: &'a [u8],
    /// Whether to wait [`RESET_DELAY_MS`] after sending
    pub delay_after: bool,
}

/// Initialization table parsed into ordered records
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitSequence<'a> {
    commands: Vec<InitCommand<'a>, MAX_INIT_COMMANDS>,
}

impl<'a> InitSequence<'a> {
    /// Parse a zero-terminated `opcode, length, args...` table
    ///
    /// # Errors
    ///
    /// Returns the byte offset of the first entry that runs past the end of
    /// the table, or of the position where the terminator was expected when
    /// it is missing or the table has more than [`MAX_INIT_COMMANDS`] entries.
    pub fn parse(table: &'a [u8]) -> Result<Self, usize> {
        let mut commands = Vec::new();
        let mut offset = 0;

        loop {
            let Some(&opcode) = table.get(offset) else {
                return Err(offset);
            };
            if opcode == NOP {
                return Ok(Self { commands });
            }

            let Some(&length) = table.get(offset + 1) else {
                return Err(offset);
            };
            let count = (length & !DELAY_FLAG) as usize;
            let start = offset + 2;
            let Some(args) = table.get(start..start + count) else {
                return Err(offset);
            };

            commands
                .push(InitCommand {
                    opcode,
                    args,
                    delay_after: length & DELAY_FLAG != 0,
                })
                .map_err(|_| offset)?;
            offset = start + count;
        }
    }

    /// Iterate over the records in table order
    pub fn iter(&self) -> core::slice::Iter<'_, InitCommand<'a>> {
        self.commands.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the table held nothing but the terminator
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

//! Core display operations
//!
//! [`Display`] owns the interface and the surface state (orientation and
//! logical size) and implements the ILI9341 command protocol. Drawing
//! primitives live in [`crate::draw`].

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::command::{
    CASET, DISPOFF, DISPON, INVOFF, INVON, InitSequence, MADCTL, MADCTL_BGR, MADCTL_MV, MADCTL_MX,
    MADCTL_MY, PASET, RESET_DELAY_MS, SLEEP_DELAY_MS, SLPIN, SLPOUT, SWRESET, VSCRDEF, VSCRSADD,
};
use crate::config::{Config, Dimensions, Orientation};
use crate::error::Error;
use crate::interface::DisplayInterface;

pub(crate) type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Core display driver for the ILI9341
///
/// Coordinates passed to drawing methods are logical: they are measured
/// in the current [`Orientation`], whose width and height are returned by
/// [`width`](Self::width) and [`height`](Self::height).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Current orientation
    orientation: Orientation,
    /// Logical width for the current orientation
    width: u16,
    /// Logical height for the current orientation
    height: u16,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// No bus traffic happens until [`reset`](Self::reset) or
    /// [`init`](Self::init) is called.
    pub fn new(interface: I, config: Config) -> Self {
        let Dimensions { width, height } = config.dimensions;
        Self {
            interface,
            config,
            orientation: Orientation::Portrait,
            width,
            height,
        }
    }

    /// Perform hardware reset followed by [`init`](Self::init)
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.reset(delay);
        self.init(delay)
    }

    /// Software reset and run the configured initialization table
    ///
    /// The table is parsed before anything is sent, so a malformed table
    /// leaves the panel untouched. Afterwards the configured orientation is
    /// applied.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let sequence = InitSequence::parse(self.config.init_table)
            .map_err(|offset| Error::InvalidInitTable { offset })?;

        self.send_command(SWRESET, &[])?;
        delay.delay_ms(RESET_DELAY_MS);

        debug!("ili9341: sending {} init commands", sequence.len());
        for command in sequence.iter() {
            self.send_command(command.opcode, command.args)?;
            if command.delay_after {
                delay.delay_ms(RESET_DELAY_MS);
            }
        }

        // The table leaves MADCTL at MX|BGR, which is rotation 0
        self.orientation = Orientation::Portrait;
        self.width = self.config.dimensions.width;
        self.height = self.config.dimensions.height;

        if self.config.orientation != Orientation::Portrait {
            self.set_orientation(self.config.orientation)?;
        }
        Ok(())
    }

    /// Send a command byte followed by its argument bytes
    ///
    /// The argument phase is skipped when `args` is empty.
    pub fn send_command(&mut self, opcode: u8, args: &[u8]) -> DisplayResult<I> {
        self.interface.send_command(opcode).map_err(Error::Interface)?;
        if !args.is_empty() {
            self.send_data(args)?;
        }
        Ok(())
    }

    /// Send raw data bytes to the controller
    pub(crate) fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// MADCTL value for an orientation
    pub fn madctl(&self, orientation: Orientation) -> u8 {
        let bits = match orientation {
            Orientation::Portrait => MADCTL_MX,
            Orientation::Landscape => MADCTL_MV,
            Orientation::PortraitFlipped => MADCTL_MY,
            Orientation::LandscapeFlipped => MADCTL_MX | MADCTL_MY | MADCTL_MV,
        };
        if self.config.bgr {
            bits | MADCTL_BGR
        } else {
            bits
        }
    }

    /// Set the origin and scan direction of the panel
    ///
    /// Updates the logical width and height: orientations 1 and 3 swap the
    /// native dimensions.
    pub fn set_orientation(&mut self, orientation: Orientation) -> DisplayResult<I> {
        let madctl = self.madctl(orientation);
        self.send_command(MADCTL, &[madctl])?;

        let logical = self.config.dimensions.oriented(orientation);
        self.orientation = orientation;
        self.width = logical.width;
        self.height = logical.height;
        trace!(
            "ili9341: orientation {} ({}x{})",
            orientation.index(),
            self.width,
            self.height
        );
        Ok(())
    }

    /// Set orientation from a rotation index, taken modulo 4
    pub fn set_rotation(&mut self, rotation: u8) -> DisplayResult<I> {
        self.set_orientation(Orientation::from_index(rotation))
    }

    /// Set the address window that subsequent pixel data fills
    ///
    /// The window spans `x..x+w` by `y..y+h` in panel coordinates; the end
    /// coordinates sent are inclusive. No clipping is performed.
    #[allow(clippy::many_single_char_names)]
    pub fn set_address_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> DisplayResult<I> {
        let [x0_hi, x0_lo] = x.to_be_bytes();
        let [x1_hi, x1_lo] = x.wrapping_add(w).wrapping_sub(1).to_be_bytes();
        self.send_command(CASET, &[x0_hi, x0_lo, x1_hi, x1_lo])?;

        let [y0_hi, y0_lo] = y.to_be_bytes();
        let [y1_hi, y1_lo] = y.wrapping_add(h).wrapping_sub(1).to_be_bytes();
        self.send_command(PASET, &[y0_hi, y0_lo, y1_hi, y1_lo])
    }

    /// Enable or disable color inversion
    pub fn invert_colors(&mut self, invert: bool) -> DisplayResult<I> {
        self.send_command(if invert { INVON } else { INVOFF }, &[])
    }

    /// Set the first line of the vertical scroll area shown at the top
    pub fn set_scroll_offset(&mut self, y: u16) -> DisplayResult<I> {
        self.send_command(VSCRSADD, &y.to_be_bytes())
    }

    /// Define fixed top and bottom areas excluded from vertical scrolling
    ///
    /// Ignored when `top + bottom` exceeds the native height.
    pub fn set_scroll_margins(&mut self, top: u16, bottom: u16) -> DisplayResult<I> {
        let height = self.config.dimensions.height;
        let fixed = u32::from(top) + u32::from(bottom);
        if fixed > u32::from(height) {
            warn!("ili9341: scroll margins {top}+{bottom} exceed height {height}");
            return Ok(());
        }

        let middle = height - top - bottom;
        let [t_hi, t_lo] = top.to_be_bytes();
        let [m_hi, m_lo] = middle.to_be_bytes();
        let [b_hi, b_lo] = bottom.to_be_bytes();
        self.send_command(VSCRDEF, &[t_hi, t_lo, m_hi, m_lo, b_hi, b_lo])
    }

    /// Turn the panel output on or off
    ///
    /// Frame memory is retained while the display is off.
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        self.send_command(if on { DISPON } else { DISPOFF }, &[])
    }

    /// Enter or leave sleep mode
    ///
    /// Waits the controller's settle time after the command.
    pub fn set_sleep<D: DelayNs>(&mut self, sleep: bool, delay: &mut D) -> DisplayResult<I> {
        self.send_command(if sleep { SLPIN } else { SLPOUT }, &[])?;
        delay.delay_ms(SLEEP_DELAY_MS);
        Ok(())
    }

    /// Logical width in the current orientation
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height in the current orientation
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Native panel dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Mutable access to the interface
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Release the interface
    pub fn release(self) -> I {
        self.interface
    }
}

//! Test doubles shared by the unit tests
//!
//! [`MockInterface`] records every command and data write and also plays
//! the panel: it tracks the CASET/PASET window and decodes RAMWR data into
//! a pixel map, so tests can assert on what ends up on screen.
//! [`MockI2c`] is a register file behind a single I2C address.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use crate::command::{CASET, PASET, RAMWR};
use crate::interface::DisplayInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError;

#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    pub commands: Vec<u8>,
    pub data: Vec<Vec<u8>>,
    pub command_data: Vec<(u8, Vec<u8>)>,
    /// Fail every write once this many writes have succeeded
    pub fail_after: Option<usize>,
    writes: usize,
    columns: (u16, u16),
    rows: (u16, u16),
    cursor: (u16, u16),
    pending: Option<u8>,
    /// Pixels written through RAMWR, last write wins
    pub pixels: BTreeMap<(u16, u16), u16>,
    /// Number of pixel values streamed through RAMWR
    pub pixel_writes: usize,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget recorded traffic and pixels, keep the window state
    pub fn clear(&mut self) {
        self.commands.clear();
        self.data.clear();
        self.command_data.clear();
        self.pixels.clear();
        self.pixel_writes = 0;
    }

    /// Total number of command and data writes
    pub fn write_count(&self) -> usize {
        self.commands.len() + self.data.len()
    }

    pub fn pixel_set(&self) -> BTreeSet<(u16, u16)> {
        self.pixels.keys().copied().collect()
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        self.pixels.get(&(x, y)).copied()
    }

    fn check_failure(&mut self) -> Result<(), MockError> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(MockError);
        }
        self.writes += 1;
        Ok(())
    }

    fn store_pixel(&mut self, value: u16) {
        self.pixels.insert(self.cursor, value);
        self.pixel_writes += 1;

        let (x, y) = self.cursor;
        if x >= self.columns.1 {
            self.cursor = (self.columns.0, y.wrapping_add(1));
        } else {
            self.cursor = (x + 1, y);
        }
    }
}

impl DisplayInterface for MockInterface {
    type Error = MockError;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.commands.push(command);
        self.command_data.push((command, Vec::new()));
        if command == RAMWR {
            self.cursor = (self.columns.0, self.rows.0);
            self.pending = None;
        }
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.check_failure()?;
        self.data.push(data.to_vec());
        let Some((command, args)) = self.command_data.last_mut() else {
            return Ok(());
        };
        args.extend_from_slice(data);
        let command = *command;

        match command {
            CASET | PASET => {
                let args = &self.command_data[self.command_data.len() - 1].1;
                if args.len() == 4 {
                    let range = (
                        u16::from_be_bytes([args[0], args[1]]),
                        u16::from_be_bytes([args[2], args[3]]),
                    );
                    if command == CASET {
                        self.columns = range;
                    } else {
                        self.rows = range;
                    }
                }
            }
            RAMWR => {
                for &byte in data {
                    match self.pending.take() {
                        Some(high) => self.store_pixel(u16::from_be_bytes([high, byte])),
                        None => self.pending = Some(byte),
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) {}
}

#[derive(Debug, Default)]
pub(crate) struct MockDelay {
    pub total_ms: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += ns / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
    }
}

#[derive(Debug)]
pub(crate) struct MockI2c {
    pub address: u8,
    pub registers: [u8; 256],
    /// Register writes as `(register, value)`
    pub writes: Vec<(u8, u8)>,
    /// Block reads as `(start register, length)`
    pub reads: Vec<(u8, usize)>,
    /// Fail every transaction once this many have succeeded
    pub fail_after: Option<usize>,
    transactions: usize,
}

impl MockI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: [0; 256],
            writes: Vec::new(),
            reads: Vec::new(),
            fail_after: None,
            transactions: 0,
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail_after.is_some_and(|limit| self.transactions >= limit) {
            return Err(ErrorKind::Other);
        }
        self.transactions += 1;
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut pointer = 0u8;
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&register, values)) = bytes.split_first() else {
                        continue;
                    };
                    pointer = register;
                    for &value in values {
                        self.registers[usize::from(pointer)] = value;
                        self.writes.push((pointer, value));
                        pointer = pointer.wrapping_add(1);
                    }
                }
                Operation::Read(buffer) => {
                    self.reads.push((pointer, buffer.len()));
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[usize::from(pointer)];
                        pointer = pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

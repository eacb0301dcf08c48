use std::time::Duration;

use anyhow::{ensure, Context};
use tracing::{trace, warn};

use crate::bus::EepromBus;

/// Page-buffer capacity of the 24LC1025 in bytes. Longer writes would wrap
/// inside the device's page buffer and clobber the start of the page.
pub const PAGE_SIZE: usize = 128;

/// Reported necessary for the device's internal write timing; bytes pushed
/// faster than this can end up corrupted.
const BYTE_DELAY: Duration = Duration::from_millis(5);
/// Pause after closing a transaction so the bus and device settle.
const SETTLE_DELAY: Duration = Duration::from_millis(5);

/// A 24LC1025-class EEPROM behind an injected bus driver.
#[derive(Debug)]
pub struct Eeprom<B> {
    bus: B,
    address: u16,
}

impl<B: EepromBus> Eeprom<B> {
    pub fn new(bus: B, address: u16) -> Self {
        Self { bus, address }
    }

    /// Write one page of data at `offset`.
    ///
    /// This is the device's buffer write mode: the whole page lands in a
    /// single transaction. The part only survives a limited number of write
    /// cycles, so callers batch changes into as few pages as possible.
    pub fn write_page(&mut self, offset: u16, data: &[u8]) -> anyhow::Result<()> {
        trace!("Eeprom::write_page(offset=0x{:04X}, len={})", offset, data.len());

        ensure!(
            data.len() <= PAGE_SIZE,
            "Page write of {} bytes exceeds the {} byte page buffer",
            data.len(),
            PAGE_SIZE
        );

        self.bus.begin(self.address).context("Begin transaction")?;

        // Target address, most significant byte first
        self.bus.send((offset >> 8) as u8).context("Send address high")?;
        self.bus.send((offset & 0xFF) as u8).context("Send address low")?;

        for &byte in data {
            self.bus.send(byte).context("Send payload")?;
            self.bus.settle(BYTE_DELAY);
        }

        self.bus.end(true).context("End transaction")?;
        self.bus.settle(SETTLE_DELAY);

        Ok(())
    }

    /// Read a page of data at `offset` into `buffer`, returning how many
    /// bytes the bus actually delivered.
    ///
    /// Slots the bus never delivers keep their previous contents; a short
    /// read shows up in the returned count, not in the buffer.
    pub fn read_page(&mut self, offset: u16, buffer: &mut [u8]) -> anyhow::Result<usize> {
        trace!("Eeprom::read_page(offset=0x{:04X}, len={})", offset, buffer.len());

        ensure!(
            buffer.len() <= PAGE_SIZE,
            "Page read of {} bytes exceeds the {} byte page buffer",
            buffer.len(),
            PAGE_SIZE
        );

        // Address phase, identical to writing
        self.bus.begin(self.address).context("Begin transaction")?;
        self.bus.send((offset >> 8) as u8).context("Send address high")?;
        self.bus.send((offset & 0xFF) as u8).context("Send address low")?;
        self.bus.end(true).context("End address phase")?;
        self.bus.settle(SETTLE_DELAY);

        self.bus
            .request_from(self.address, buffer.len())
            .context("Request read")?;

        let mut filled = 0;
        for slot in buffer.iter_mut() {
            // Take a byte only if the device delivered one
            if self.bus.available() {
                *slot = self.bus.receive().context("Receive byte")?;
                filled += 1;
            }
        }

        if filled < buffer.len() {
            warn!("Short read: {} of {} bytes", filled, buffer.len());
        }

        Ok(filled)
    }
}

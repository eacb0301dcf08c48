use std::collections::VecDeque;

use anyhow::Context;
use rppal::i2c::I2c;
use tracing::trace;

use crate::bus::EepromBus;

/// Bus driver backed by the Linux I2C character device.
///
/// Outgoing bytes are buffered per transaction and flushed as a single bus
/// write when the transaction closes, so the two address bytes and the payload
/// reach the device in one start/stop bracket.
#[derive(Debug)]
pub struct I2cBus {
    i2c: I2c,
    outgoing: Vec<u8>,
    incoming: VecDeque<u8>,
}

impl I2cBus {
    #[tracing::instrument]
    pub fn new() -> anyhow::Result<Self> {
        trace!("I2cBus::new()");

        let i2c = I2c::new().context("Create i2c")?;

        Ok(Self {
            i2c,
            outgoing: Vec::new(),
            incoming: VecDeque::new(),
        })
    }
}

impl EepromBus for I2cBus {
    fn begin(&mut self, address: u16) -> anyhow::Result<()> {
        self.i2c.set_slave_address(address).context("Set address")?;
        self.outgoing.clear();

        Ok(())
    }

    fn send(&mut self, byte: u8) -> anyhow::Result<()> {
        self.outgoing.push(byte);

        Ok(())
    }

    fn end(&mut self, _stop: bool) -> anyhow::Result<()> {
        // The kernel brackets every write with start and stop conditions
        self.i2c.write(&self.outgoing).context("Flush transaction")?;
        self.outgoing.clear();

        Ok(())
    }

    fn request_from(&mut self, address: u16, length: usize) -> anyhow::Result<()> {
        self.i2c.set_slave_address(address).context("Set address")?;

        let mut buffer = vec![0; length];
        let received = self.i2c.read(&mut buffer).context("Read")?;
        self.incoming.extend(&buffer[..received]);

        Ok(())
    }

    fn available(&mut self) -> bool {
        !self.incoming.is_empty()
    }

    fn receive(&mut self) -> anyhow::Result<u8> {
        self.incoming.pop_front().context("No byte pending")
    }
}

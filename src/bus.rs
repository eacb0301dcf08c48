use std::thread;
use std::time::Duration;

pub mod i2c;

/// The transaction primitives the EEPROM driver needs from the bus.
///
/// One `begin`/`end` bracket is a single transaction addressed to one device.
/// Production code uses [`i2c::I2cBus`]; tests inject a simulated bus instead.
pub trait EepromBus {
    /// Open a transaction addressed to `address`.
    fn begin(&mut self, address: u16) -> anyhow::Result<()>;

    /// Queue one byte for transmission in the open transaction.
    fn send(&mut self, byte: u8) -> anyhow::Result<()>;

    /// Close the open transaction. `stop` requests a stop condition on the
    /// wire.
    fn end(&mut self, stop: bool) -> anyhow::Result<()>;

    /// Request `length` bytes from `address`.
    fn request_from(&mut self, address: u16, length: usize) -> anyhow::Result<()>;

    /// Whether a received byte is waiting to be consumed.
    fn available(&mut self) -> bool;

    /// Consume one received byte.
    fn receive(&mut self) -> anyhow::Result<u8>;

    /// Suspend execution to respect device timing.
    fn settle(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

impl<B: EepromBus + ?Sized> EepromBus for &mut B {
    fn begin(&mut self, address: u16) -> anyhow::Result<()> {
        (**self).begin(address)
    }

    fn send(&mut self, byte: u8) -> anyhow::Result<()> {
        (**self).send(byte)
    }

    fn end(&mut self, stop: bool) -> anyhow::Result<()> {
        (**self).end(stop)
    }

    fn request_from(&mut self, address: u16, length: usize) -> anyhow::Result<()> {
        (**self).request_from(address, length)
    }

    fn available(&mut self) -> bool {
        (**self).available()
    }

    fn receive(&mut self) -> anyhow::Result<u8> {
        (**self).receive()
    }

    fn settle(&mut self, duration: Duration) {
        (**self).settle(duration)
    }
}

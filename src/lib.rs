//! Page-granular access to a 24LC1025-class I2C EEPROM.
//!
//! The EEPROM holds data that is read often and written almost never; writes
//! wear the part out, so callers batch changes into page-sized chunks and push
//! them through [`Eeprom::write_page`]. The bus sits behind the
//! [`bus::EepromBus`] trait so a simulated bus can stand in during tests.

pub mod bus;
pub mod eeprom;

pub use crate::bus::EepromBus;
pub use crate::eeprom::{Eeprom, PAGE_SIZE};

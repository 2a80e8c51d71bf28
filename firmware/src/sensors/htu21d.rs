//! HTU21D relative-humidity / temperature sensor over I²C.
//!
//! Uses the no-hold-master trigger commands: the driver writes the
//! command, waits out the worst-case conversion time, then reads three
//! bytes (MSB, LSB, CRC).  The two status bits in the LSB are masked off
//! before conversion and the CRC-8 is checked, so a corrupted transfer
//! surfaces as [`ErrorKind::SensorUnavailable`] instead of a bogus value.
//!
//! The conversion waits (50 ms + 16 ms) bound the time a read holds the
//! bus.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error, I2c};
use log::debug;

use crate::app::ports::{IndoorReading, SensorPort};
use crate::error::ErrorKind;
use crate::pins::HTU21D_ADDR;

const CMD_TRIGGER_TEMP_NO_HOLD: u8 = 0xF3;
const CMD_TRIGGER_HUMIDITY_NO_HOLD: u8 = 0xF5;
const CMD_SOFT_RESET: u8 = 0xFE;

/// Worst-case 14-bit temperature conversion.
const TEMP_CONVERSION_MS: u32 = 50;
/// Worst-case 12-bit humidity conversion.
const HUMIDITY_CONVERSION_MS: u32 = 16;
const SOFT_RESET_MS: u32 = 15;

const STATUS_MASK: u16 = 0xFFFC;
/// x⁸ + x⁵ + x⁴ + 1
const CRC_POLY: u8 = 0x31;

/// Operating range from the datasheet.
const MIN_TEMP_C: f32 = -40.0;
const MAX_TEMP_C: f32 = 125.0;

pub struct Htu21d<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Htu21d<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: HTU21D_ADDR,
        }
    }

    /// Soft reset; restores default resolution and heater off.
    pub fn reset(&mut self) -> Result<(), ErrorKind> {
        self.i2c
            .write(self.address, &[CMD_SOFT_RESET])
            .map_err(bus_error)?;
        self.delay.delay_ms(SOFT_RESET_MS);
        Ok(())
    }

    /// Temperature in °C.
    pub fn read_temperature(&mut self) -> Result<f32, ErrorKind> {
        let raw = self.measure(CMD_TRIGGER_TEMP_NO_HOLD, TEMP_CONVERSION_MS)?;
        let celsius = raw_to_celsius(raw);
        if !(MIN_TEMP_C..=MAX_TEMP_C).contains(&celsius) {
            debug!("HTU21D: implausible temperature {:.2} C", celsius);
            return Err(ErrorKind::SensorUnavailable);
        }
        Ok(celsius)
    }

    /// Relative humidity in %, clamped to 0..=100.
    pub fn read_humidity(&mut self) -> Result<f32, ErrorKind> {
        let raw = self.measure(CMD_TRIGGER_HUMIDITY_NO_HOLD, HUMIDITY_CONVERSION_MS)?;
        Ok(raw_to_humidity(raw))
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn measure(&mut self, command: u8, conversion_ms: u32) -> Result<u16, ErrorKind> {
        self.i2c.write(self.address, &[command]).map_err(bus_error)?;
        self.delay.delay_ms(conversion_ms);

        let mut frame = [0u8; 3];
        self.i2c.read(self.address, &mut frame).map_err(bus_error)?;

        let expected = crc8(&frame[..2]);
        if expected != frame[2] {
            debug!(
                "HTU21D: CRC mismatch (got {:#04x}, expected {:#04x})",
                frame[2], expected
            );
            return Err(ErrorKind::SensorUnavailable);
        }
        Ok(u16::from_be_bytes([frame[0], frame[1]]) & STATUS_MASK)
    }
}

impl<I2C: I2c, D: DelayNs> SensorPort for Htu21d<I2C, D> {
    fn read_indoor(&mut self) -> Result<IndoorReading, ErrorKind> {
        let temp_c = self.read_temperature()?;
        let humidity = self.read_humidity()?;
        Ok(IndoorReading { temp_c, humidity })
    }
}

fn bus_error<E: Error>(e: E) -> ErrorKind {
    debug!("HTU21D: I2C error {:?}", e.kind());
    ErrorKind::SensorUnavailable
}

pub fn raw_to_celsius(raw: u16) -> f32 {
    -46.85 + 175.72 * f32::from(raw) / 65536.0
}

pub fn raw_to_humidity(raw: u16) -> f32 {
    (-6.0 + 125.0 * f32::from(raw) / 65536.0).clamp(0.0, 100.0)
}

/// CRC-8, polynomial 0x31, initial value 0, no reflection.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

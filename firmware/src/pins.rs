//! GPIO / bus assignments for the Tamapet board (ESP32 DevKit).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers or bus addresses.

// ---------------------------------------------------------------------------
// I2C bus (HTU21D sensor)
// ---------------------------------------------------------------------------

/// I2C0 data line.
pub const I2C_SDA_GPIO: i32 = 21;
/// I2C0 clock line.
pub const I2C_SCL_GPIO: i32 = 22;
/// Bus clock in Hz (fast mode).
pub const I2C_FREQ_HZ: u32 = 400_000;

/// HTU21D temperature/humidity sensor address (fixed by the part).
pub const HTU21D_ADDR: u8 = 0x40;

use crate::hw_def::*;

use core::fmt;

#[cfg(feature="defmt")]
use defmt::Format;

/// SHT3x device driver (blocking)
#[cfg(feature = "blocking")]
#[derive(Debug)]
pub struct Sht3x<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
}

/// SHT3x device driver (async)
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct Sht3xAsync<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
}

/// All possible errors in this crate
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// I²C communication error
    I2c(E),
    /// A received frame failed its checksum
    Checksum(ChecksumError),
}

impl<E> From<ChecksumError> for Error<E> {
    fn from(err: ChecksumError) -> Self {
        Error::Checksum(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C bus error: {e:?}"),
            Error::Checksum(e) => write!(f, "{e}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// Which data word of a frame a checksum covers
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Word {
    /// bytes 0..2 of the frame
    Temperature,
    /// bytes 3..5 of the frame
    Humidity,
}

/// A frame's CRC byte did not match the CRC computed over its data word
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChecksumError {
    /// first word found to mismatch
    pub word: Word,
}

impl fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self.word {
            Word::Temperature => "temperature",
            Word::Humidity => "humidity",
        };
        write!(f, "checksum mismatch on {word} word")
    }
}

impl core::error::Error for ChecksumError {}

/// Raw (still in u16 format) temperature and relative humidity from the device
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawMeasurement {
    /// unprocessed temperature
    pub temperature: u16,
    /// unprocessed relative humidity
    pub humidity: u16,
}
impl RawMeasurement {
    /// Get temperature in Centigrade
    pub fn centigrade(&self) -> f32 {
        raw_temp_to_centigrade(self.temperature)
    }
    /// Get temperature in Fahrenheit
    pub fn fahrenheit(&self) -> f32 {
        raw_temp_to_fahrenheit(self.temperature)
    }
    /// Get relative humidity in percent
    pub fn humidity_percent(&self) -> f32 {
        raw_rel_humid_to_percent(self.humidity)
    }
}

/// Temperature and relative humidity from a frame that passed both checksums
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// degrees centigrade
    pub temperature: f32,
    /// relative humidity in percent
    pub humidity: f32,
    /// words the values were computed from
    pub raw: RawMeasurement,
}
impl Measurement {
    /// Get temperature in Fahrenheit
    pub fn fahrenheit(&self) -> f32 {
        self.raw.fahrenheit()
    }
}
impl From<RawMeasurement> for Measurement {
    fn from(raw: RawMeasurement) -> Self {
        Self {
            temperature: raw.centigrade(),
            humidity: raw.humidity_percent(),
            raw,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} °C, {:.2} %RH", self.temperature, self.humidity)
    }
}

//! This is a platform-agnostic Rust driver for the Sensirion SHT30, SHT31 and SHT35
//! humidity and temperature digital sensors using the [`embedded-hal`] or
//! [`embedded-hal-async`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal
//! [`embedded-hal-async`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal-async
//!
//! This driver allows you to:
//! - Trigger a single-shot measurement and read the raw frame.
//! - Enter periodic mode and fetch the latest buffered frame.
//! - Choose repeatability, clock stretching and periodic sample rate.
//! - Validate a frame's CRC-8 words and convert it to °C / %RH.
//! - Trigger a software reset.
//! - blocking API support.
//! - async API support.
//!
//! This driver does not support the following device features:
//! - Stopping periodic mode other than through a soft reset.
//! - The alternate 0x45 address, alert mode, the heater and the status register.
//!
//! ## Features
//!
//! - `async`: Enables the async API (`Sht3xAsync`).
//! - `blocking`: Enables the blocking API (`Sht3x`).
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//!
//! ## Sharing the bus
//!
//! The driver owns its bus handle. To put several devices on one bus, or to use the bus from
//! more than one thread, hand the driver a sharing wrapper from `embedded-hal-bus`
//! (`RefCellDevice`, `CriticalSectionDevice`, `MutexDevice`).
//!
//! Datasheet:
//!   [SHT3x-DIS](https://sensirion.com/media/documents/213E6A3B/63A5A569/Datasheet_SHT3x_DIS.pdf)
//!
//! ## Blocking Example:
//!
//! ```ignore
//! use sht3x::{validate_and_convert, Sht3x, FRAME_LEN};
//!
//! // Platform-specific
//! let i2c = /* embedded_hal::i2c::I2c instance */;
//! let delay = /* embedded_hal::delay::DelayNs instance */;
//!
//! let mut sht3x = Sht3x::new(i2c, delay);
//! sht3x.reset().unwrap();
//!
//! // Read and display a single-shot sample
//! let mut frame = [0u8; FRAME_LEN];
//! sht3x.single_shot_read(&mut frame).unwrap();
//! let m = validate_and_convert(&frame).unwrap();
//! println!("{:0.1} °C, {:0.1} %RH", m.temperature, m.humidity);
//!
//! // Let the sensor sample on its own and fetch the latest values
//! sht3x.enable_periodic_mode().unwrap();
//! loop {
//!     // Platform-specific: sleep at least one sample period
//!     sleep_ms(500);
//!     match sht3x.read_periodic() {
//!         Ok(m) => println!("{m}"),
//!         Err(e) => println!("dropped sample: {e}"),
//!     }
//! }
//! ```
//!
//! ## Async Example:
//!
//! ```ignore
//! use sht3x::Sht3xAsync;
//!
//! // Platform-specific
//! let i2c = /* embedded_hal_async::i2c::I2c instance */;
//! let delay = /* embedded_hal_async::delay::DelayNs instance */;
//!
//! let mut sht3x = Sht3xAsync::new(i2c, delay);
//! let m = sht3x.measure().await.unwrap();
//! println!("{:0.1} °C, {:0.1} %RH", m.temperature, m.humidity);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("At least one of \"async\" and \"blocking\" features must be enabled");

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

// Defined ahead of the module declarations so every module sees them textually.
#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)*) => { defmt::trace!($($arg)*) };
}
#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}
#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}
#[cfg(feature = "log")]
macro_rules! warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}
#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "blocking")]
mod device_impl;
#[cfg(feature = "async")]
mod device_impl_async;
mod frame;
mod hw_def;
mod types;

pub use crate::{frame::*, hw_def::*, types::*};

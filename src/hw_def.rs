//! Hardware definitions for the SHT3x: bus address, command opcodes, timing and the
//! datasheet linearization formulas.

#[cfg(feature = "defmt")]
use defmt::Format;

/// 7-bit I²C address of the sensor with the ADDR pin tied to VSS
pub const I2C_ADDR: u8 = 0x44;
/// Address byte on the wire for a write transaction (R/W bit clear)
pub const I2C_ADDR_WRITE: u8 = I2C_ADDR << 1;
/// Address byte on the wire for a read transaction (R/W bit set)
pub const I2C_ADDR_READ: u8 = (I2C_ADDR << 1) | 1;

/// Time the sensor needs to come back up after a soft reset
pub const RESET_DELAY_MS: u32 = 20;
/// Conversion wait after a single-shot command, long enough for high repeatability
pub const MEASUREMENT_DELAY_MS: u32 = 20;

/// Length of a measurement frame: two data words, each followed by its CRC
pub const FRAME_LEN: usize = 6;

/// Raw frame as read from the sensor
///
/// `[T_msb, T_lsb, T_crc, RH_msb, RH_lsb, RH_crc]`
pub type MeasurementFrame = [u8; FRAME_LEN];

/// Sensor commands
///
/// Single-shot variants are named `SingleShot<Repeatability><ClockStretching>`, periodic
/// variants `Periodic<Repeatability><measurements per second>`.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u16)]
pub enum Command {
    /// soft reset
    SoftReset = 0x30A2,

    /// single shot, high repeatability, clock stretching enabled
    SingleShotHighStretch = 0x2C06,
    /// single shot, medium repeatability, clock stretching enabled
    SingleShotMediumStretch = 0x2C0D,
    /// single shot, low repeatability, clock stretching enabled
    SingleShotLowStretch = 0x2C10,
    /// single shot, high repeatability, clock stretching disabled
    SingleShotHigh = 0x2400,
    /// single shot, medium repeatability, clock stretching disabled
    SingleShotMedium = 0x240B,
    /// single shot, low repeatability, clock stretching disabled
    SingleShotLow = 0x2416,

    /// periodic, high repeatability, 0.5 mps
    PeriodicHigh0_5 = 0x2032,
    /// periodic, medium repeatability, 0.5 mps
    PeriodicMedium0_5 = 0x2024,
    /// periodic, low repeatability, 0.5 mps
    PeriodicLow0_5 = 0x202F,
    /// periodic, high repeatability, 1 mps
    PeriodicHigh1 = 0x2130,
    /// periodic, medium repeatability, 1 mps
    PeriodicMedium1 = 0x2126,
    /// periodic, low repeatability, 1 mps
    PeriodicLow1 = 0x212D,
    /// periodic, high repeatability, 2 mps
    PeriodicHigh2 = 0x2236,
    /// periodic, medium repeatability, 2 mps
    PeriodicMedium2 = 0x2220,
    /// periodic, low repeatability, 2 mps
    PeriodicLow2 = 0x222B,
    /// periodic, high repeatability, 4 mps
    PeriodicHigh4 = 0x2334,
    /// periodic, medium repeatability, 4 mps
    PeriodicMedium4 = 0x2322,
    /// periodic, low repeatability, 4 mps
    PeriodicLow4 = 0x2329,
    /// periodic, high repeatability, 10 mps
    PeriodicHigh10 = 0x2737,
    /// periodic, medium repeatability, 10 mps
    PeriodicMedium10 = 0x2721,
    /// periodic, low repeatability, 10 mps
    PeriodicLow10 = 0x272A,

    /// fetch the latest buffered frame while in periodic mode
    ReadoutForPeriodicMode = 0xE000,
}

impl Command {
    /// 16-bit opcode
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Opcode as sent on the bus, MSB first
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.as_u16().to_be_bytes()
    }
}

/// Measurement repeatability; higher takes longer and is less noisy
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Repeatability {
    /// high
    High,
    /// medium
    Medium,
    /// low
    Low,
}

/// Whether the sensor holds SCL low until a single-shot conversion is done
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClockStretching {
    /// enabled
    Enabled,
    /// disabled
    Disabled,
}

/// Periodic mode sample rate in measurements per second
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rate {
    /// 0.5 mps
    Mps0_5,
    /// 1 mps
    Mps1,
    /// 2 mps
    Mps2,
    /// 4 mps
    Mps4,
    /// 10 mps
    Mps10,
}

/// Single-shot command for a repeatability and clock stretching setting
pub const fn single_shot_command(repeatability: Repeatability, clock_stretching: ClockStretching) -> Command {
    match (clock_stretching, repeatability) {
        (ClockStretching::Enabled, Repeatability::High) => Command::SingleShotHighStretch,
        (ClockStretching::Enabled, Repeatability::Medium) => Command::SingleShotMediumStretch,
        (ClockStretching::Enabled, Repeatability::Low) => Command::SingleShotLowStretch,
        (ClockStretching::Disabled, Repeatability::High) => Command::SingleShotHigh,
        (ClockStretching::Disabled, Repeatability::Medium) => Command::SingleShotMedium,
        (ClockStretching::Disabled, Repeatability::Low) => Command::SingleShotLow,
    }
}

/// Periodic mode command for a repeatability and sample rate
pub const fn periodic_command(repeatability: Repeatability, rate: Rate) -> Command {
    match (rate, repeatability) {
        (Rate::Mps0_5, Repeatability::High) => Command::PeriodicHigh0_5,
        (Rate::Mps0_5, Repeatability::Medium) => Command::PeriodicMedium0_5,
        (Rate::Mps0_5, Repeatability::Low) => Command::PeriodicLow0_5,
        (Rate::Mps1, Repeatability::High) => Command::PeriodicHigh1,
        (Rate::Mps1, Repeatability::Medium) => Command::PeriodicMedium1,
        (Rate::Mps1, Repeatability::Low) => Command::PeriodicLow1,
        (Rate::Mps2, Repeatability::High) => Command::PeriodicHigh2,
        (Rate::Mps2, Repeatability::Medium) => Command::PeriodicMedium2,
        (Rate::Mps2, Repeatability::Low) => Command::PeriodicLow2,
        (Rate::Mps4, Repeatability::High) => Command::PeriodicHigh4,
        (Rate::Mps4, Repeatability::Medium) => Command::PeriodicMedium4,
        (Rate::Mps4, Repeatability::Low) => Command::PeriodicLow4,
        (Rate::Mps10, Repeatability::High) => Command::PeriodicHigh10,
        (Rate::Mps10, Repeatability::Medium) => Command::PeriodicMedium10,
        (Rate::Mps10, Repeatability::Low) => Command::PeriodicLow10,
    }
}

/// Command issued by the drivers' `single_shot_read`
pub const DEFAULT_SINGLE_SHOT: Command = single_shot_command(Repeatability::High, ClockStretching::Enabled);
/// Command issued by the drivers' `enable_periodic_mode`
pub const DEFAULT_PERIODIC: Command = periodic_command(Repeatability::Medium, Rate::Mps2);

const RAW_FULL_SCALE: f32 = 65535.0;

/// Convert a raw temperature word to degrees centigrade
pub fn raw_temp_to_centigrade(raw: u16) -> f32 {
    -45.0 + 175.0 * (raw as f32 / RAW_FULL_SCALE)
}

/// Convert a raw temperature word to degrees fahrenheit
pub fn raw_temp_to_fahrenheit(raw: u16) -> f32 {
    -49.0 + 315.0 * (raw as f32 / RAW_FULL_SCALE)
}

/// Convert a raw humidity word to percent relative humidity
pub fn raw_rel_humid_to_percent(raw: u16) -> f32 {
    100.0 * (raw as f32 / RAW_FULL_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_addresses() {
        assert_eq!(I2C_ADDR_WRITE, 0x88);
        assert_eq!(I2C_ADDR_READ, 0x89);
    }

    #[test]
    fn command_bytes_are_big_endian() {
        assert_eq!(Command::SingleShotHighStretch.to_be_bytes(), [0x2C, 0x06]);
        assert_eq!(Command::SoftReset.to_be_bytes(), [0x30, 0xA2]);
        assert_eq!(Command::ReadoutForPeriodicMode.to_be_bytes(), [0xE0, 0x00]);
    }

    #[test]
    fn defaults() {
        assert_eq!(DEFAULT_SINGLE_SHOT.as_u16(), 0x2C06);
        assert_eq!(DEFAULT_PERIODIC.as_u16(), 0x2220);
    }

    #[test]
    fn selectors_cover_the_table() {
        assert_eq!(single_shot_command(Repeatability::Low, ClockStretching::Disabled).as_u16(), 0x2416);
        assert_eq!(single_shot_command(Repeatability::Medium, ClockStretching::Enabled).as_u16(), 0x2C0D);
        assert_eq!(periodic_command(Repeatability::High, Rate::Mps0_5).as_u16(), 0x2032);
        assert_eq!(periodic_command(Repeatability::Low, Rate::Mps4).as_u16(), 0x2329);
        assert_eq!(periodic_command(Repeatability::Medium, Rate::Mps10).as_u16(), 0x2721);
    }

    #[test]
    fn conversion_endpoints() {
        assert_eq!(raw_temp_to_centigrade(0), -45.0);
        assert_eq!(raw_temp_to_centigrade(u16::MAX), 130.0);
        assert_eq!(raw_temp_to_fahrenheit(0), -49.0);
        assert_eq!(raw_temp_to_fahrenheit(u16::MAX), 266.0);
        assert_eq!(raw_rel_humid_to_percent(0), 0.0);
        assert_eq!(raw_rel_humid_to_percent(u16::MAX), 100.0);
    }
}

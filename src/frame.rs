//! Frame validation and decoding.

use crate::hw_def::MeasurementFrame;
use crate::types::{ChecksumError, Measurement, RawMeasurement, Word};

use crc::{Crc, CRC_8_NRSC_5};

// poly 0x31, init 0xFF, no reflection, no final xor
const CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_NRSC_5);

/// Initial remainder the sensor uses for every data word
pub const CRC_INIT: u8 = 0xFF;

/// CRC-8 (polynomial 0x31, MSB first, no final XOR) of a 2-byte word, starting from
/// `initial`
pub fn checksum(word: &[u8; 2], initial: u8) -> u8 {
    let mut digest = CRC.digest_with_initial(initial);
    digest.update(word);
    digest.finalize()
}

fn checked_word(frame: &MeasurementFrame, offset: usize, word: Word) -> Result<u16, ChecksumError> {
    let data = [frame[offset], frame[offset + 1]];
    let read_crc = frame[offset + 2];
    let crc_expect = checksum(&data, CRC_INIT);
    if read_crc != crc_expect {
        warn!("sht3x: crc mismatch at offset {}: frame={:?}, read_crc={}, crc_expect={}", offset, frame, read_crc, crc_expect);
        return Err(ChecksumError { word });
    }
    Ok(u16::from_be_bytes(data))
}

/// Check both CRCs of a frame and convert it into a [`Measurement`]
///
/// Nothing is decoded unless both words pass, so a torn or corrupted transfer never yields a
/// value. The caller should drop the frame and read again.
pub fn validate_and_convert(frame: &MeasurementFrame) -> Result<Measurement, ChecksumError> {
    let temperature = checked_word(frame, 0, Word::Temperature)?;
    let humidity = checked_word(frame, 3, Word::Humidity)?;
    trace!("sht3x: frame ok, raw temperature={}, raw humidity={}", temperature, humidity);
    Ok(RawMeasurement { temperature, humidity }.into())
}

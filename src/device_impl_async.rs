use crate::frame::validate_and_convert;
use crate::hw_def::*;
use crate::types::*;

use embedded_hal_async::{delay::DelayNs, i2c::I2c};

// Same sequencing as the blocking driver; only the bus and delay awaits differ.
impl<I2C, Delay, E> Sht3xAsync<I2C, Delay>
where
    I2C: I2c<Error = E>,
    Delay: DelayNs,
{
    /// Create a new SHT3x driver instance
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self { i2c, delay }
    }

    /// Destroy the driver and give back the bus and delay
    pub fn destroy(self) -> (I2C, Delay) {
        (self.i2c, self.delay)
    }

    /// Send a 16-bit command, MSB first
    pub async fn send_command(&mut self, cmd: Command) -> Result<(), Error<E>> {
        trace!("sht3x::send_command(): cmd={:?}", cmd);
        self.i2c.write(I2C_ADDR, &cmd.to_be_bytes()).await.map_err(Error::I2c)
    }

    async fn receive(&mut self, frame: &mut MeasurementFrame) -> Result<(), Error<E>> {
        self.i2c.read(I2C_ADDR, frame).await.map_err(Error::I2c)?;
        trace!("sht3x::receive(): frame={:?}", frame);
        Ok(())
    }

    /// Soft reset, waiting for the sensor to reinitialize even if the command failed
    pub async fn reset(&mut self) -> Result<(), Error<E>> {
        let status = self.send_command(Command::SoftReset).await;
        self.delay.delay_ms(RESET_DELAY_MS).await;
        if status.is_err() {
            warn!("sht3x::reset(): soft reset command was not acknowledged");
        }
        status
    }

    /// Trigger a high repeatability, clock stretching single shot and read back the raw frame
    pub async fn single_shot_read(&mut self, frame: &mut MeasurementFrame) -> Result<(), Error<E>> {
        self.single_shot_read_with(frame, Repeatability::High, ClockStretching::Enabled).await
    }

    /// Trigger a single shot with the given settings and read back the raw frame
    pub async fn single_shot_read_with(
        &mut self,
        frame: &mut MeasurementFrame,
        repeatability: Repeatability,
        clock_stretching: ClockStretching,
    ) -> Result<(), Error<E>> {
        self.send_command(single_shot_command(repeatability, clock_stretching)).await?;
        self.delay.delay_ms(MEASUREMENT_DELAY_MS).await;
        self.receive(frame).await
    }

    /// Enter periodic mode at medium repeatability, 2 measurements per second
    pub async fn enable_periodic_mode(&mut self) -> Result<(), Error<E>> {
        self.start_periodic(Repeatability::Medium, Rate::Mps2).await
    }

    /// Enter periodic mode with the given settings
    pub async fn start_periodic(&mut self, repeatability: Repeatability, rate: Rate) -> Result<(), Error<E>> {
        self.send_command(periodic_command(repeatability, rate)).await
    }

    /// Fetch the latest frame buffered in periodic mode; the readout command is best-effort
    pub async fn periodic_read(&mut self, frame: &mut MeasurementFrame) -> Result<(), Error<E>> {
        if self.send_command(Command::ReadoutForPeriodicMode).await.is_err() {
            warn!("sht3x::periodic_read(): readout command failed, reading anyway");
        }
        self.receive(frame).await
    }

    /// Single shot followed by validation
    pub async fn measure(&mut self) -> Result<Measurement, Error<E>> {
        let mut frame = [0u8; FRAME_LEN];
        self.single_shot_read(&mut frame).await?;
        Ok(validate_and_convert(&frame)?)
    }

    /// Periodic readout followed by validation
    pub async fn read_periodic(&mut self) -> Result<Measurement, Error<E>> {
        let mut frame = [0u8; FRAME_LEN];
        self.periodic_read(&mut frame).await?;
        Ok(validate_and_convert(&frame)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::tests::frame_from_raw;

    use embassy_futures::block_on;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[derive(Debug, Default)]
    struct RecordingDelay {
        total_ns: u64,
    }

    impl DelayNs for RecordingDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn sht3x(expectations: &[Transaction]) -> Sht3xAsync<I2cMock, RecordingDelay> {
        Sht3xAsync::new(I2cMock::new(expectations), RecordingDelay::default())
    }

    fn finish(sensor: Sht3xAsync<I2cMock, RecordingDelay>) -> u64 {
        let (mut i2c, delay) = sensor.destroy();
        i2c.done();
        delay.total_ns / 1_000_000
    }

    #[test]
    fn reset_waits_and_reports_failure() {
        let mut sensor = sht3x(&[Transaction::write(0x44, vec![0x30, 0xA2]).with_error(ErrorKind::Other)]);
        assert_eq!(block_on(sensor.reset()), Err(Error::I2c(ErrorKind::Other)));
        assert_eq!(finish(sensor), 20);
    }

    #[test]
    fn measure() {
        let mut sensor = sht3x(&[
            Transaction::write(0x44, vec![0x2C, 0x06]),
            Transaction::read(0x44, frame_from_raw(u16::MAX, u16::MAX).to_vec()),
        ]);
        let m = block_on(sensor.measure()).unwrap();
        assert_eq!(m.temperature, 130.0);
        assert_eq!(m.humidity, 100.0);
        assert_eq!(finish(sensor), 20);
    }

    #[test]
    fn single_shot_read_skips_receive_on_failed_command() {
        let mut sensor = sht3x(&[Transaction::write(0x44, vec![0x2C, 0x06]).with_error(ErrorKind::Other)]);
        let mut frame = [0u8; FRAME_LEN];
        assert_eq!(block_on(sensor.single_shot_read(&mut frame)), Err(Error::I2c(ErrorKind::Other)));
        assert_eq!(finish(sensor), 0);
    }

    #[test]
    fn periodic_mode() {
        let frame = frame_from_raw(0x6666, 0x8000);
        let mut sensor = sht3x(&[
            Transaction::write(0x44, vec![0x22, 0x20]),
            Transaction::write(0x44, vec![0xE0, 0x00]).with_error(ErrorKind::Other),
            Transaction::read(0x44, frame.to_vec()),
        ]);
        block_on(sensor.enable_periodic_mode()).unwrap();
        let mut read = [0u8; FRAME_LEN];
        block_on(sensor.periodic_read(&mut read)).unwrap();
        assert_eq!(read, frame);
        finish(sensor);
    }

    #[test]
    fn send_command_writes_big_endian_opcode() {
        let mut sensor = sht3x(&[Transaction::write(0x44, vec![0x2C, 0x06])]);
        block_on(sensor.send_command(Command::SingleShotHighStretch)).unwrap();
        finish(sensor);
    }

    #[test]
    fn single_shot_read_reports_receive_error() {
        let mut sensor = sht3x(&[
            Transaction::write(0x44, vec![0x2C, 0x06]),
            Transaction::read(0x44, vec![0; FRAME_LEN]).with_error(ErrorKind::ArbitrationLoss),
        ]);
        let mut frame = [0u8; FRAME_LEN];
        assert_eq!(block_on(sensor.single_shot_read(&mut frame)), Err(Error::I2c(ErrorKind::ArbitrationLoss)));
        assert_eq!(finish(sensor), 20);
    }

    #[test]
    fn single_shot_read_with_other_settings() {
        let expected = frame_from_raw(1, 2);
        let mut sensor = sht3x(&[
            Transaction::write(0x44, vec![0x24, 0x16]),
            Transaction::read(0x44, expected.to_vec()),
        ]);
        let mut frame = [0u8; FRAME_LEN];
        block_on(sensor.single_shot_read_with(&mut frame, Repeatability::Low, ClockStretching::Disabled)).unwrap();
        assert_eq!(frame, expected);
        finish(sensor);
    }

    #[test]
    fn start_periodic_sends_selected_command() {
        let mut sensor = sht3x(&[Transaction::write(0x44, vec![0x27, 0x37])]);
        block_on(sensor.start_periodic(Repeatability::High, Rate::Mps10)).unwrap();
        assert_eq!(finish(sensor), 0);
    }

    #[test]
    fn periodic_read_reports_receive_error() {
        let mut sensor = sht3x(&[
            Transaction::write(0x44, vec![0xE0, 0x00]),
            Transaction::read(0x44, vec![0; FRAME_LEN]).with_error(ErrorKind::Other),
        ]);
        let mut frame = [0u8; FRAME_LEN];
        assert_eq!(block_on(sensor.periodic_read(&mut frame)), Err(Error::I2c(ErrorKind::Other)));
        finish(sensor);
    }

    #[test]
    fn read_periodic_converts_valid_frame() {
        let mut sensor = sht3x(&[
            Transaction::write(0x44, vec![0xE0, 0x00]),
            Transaction::read(0x44, frame_from_raw(u16::MAX, 0).to_vec()),
        ]);
        let m = block_on(sensor.read_periodic()).unwrap();
        assert_eq!(m.temperature, 130.0);
        assert_eq!(m.humidity, 0.0);
        finish(sensor);
    }

    #[test]
    fn read_periodic_rejects_corrupted_frame() {
        let mut bad = frame_from_raw(0x6666, 0x8000);
        bad[2] ^= 0x01;
        let mut sensor = sht3x(&[
            Transaction::write(0x44, vec![0xE0, 0x00]),
            Transaction::read(0x44, bad.to_vec()),
        ]);
        assert_eq!(
            block_on(sensor.read_periodic()),
            Err(Error::Checksum(ChecksumError { word: Word::Temperature }))
        );
        finish(sensor);
    }
}

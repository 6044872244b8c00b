use crate::frame::validate_and_convert;
use crate::hw_def::*;
use crate::types::*;

use embedded_hal::{delay::DelayNs, i2c::I2c};

impl<I2C, Delay, E> Sht3x<I2C, Delay>
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
    pub fn send_command(&mut self, cmd: Command) -> Result<(), Error<E>> {
        trace!("sht3x::send_command(): cmd={:?}", cmd);
        self.i2c.write(I2C_ADDR, &cmd.to_be_bytes()).map_err(Error::I2c)
    }

    fn receive(&mut self, frame: &mut MeasurementFrame) -> Result<(), Error<E>> {
        self.i2c.read(I2C_ADDR, frame).map_err(Error::I2c)?;
        trace!("sht3x::receive(): frame={:?}", frame);
        Ok(())
    }

    /// Soft reset
    ///
    /// Always waits for the sensor to reinitialize, even if the command could not be sent; the
    /// transmit failure is reported afterwards.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        let status = self.send_command(Command::SoftReset);
        self.delay.delay_ms(RESET_DELAY_MS);
        if status.is_err() {
            warn!("sht3x::reset(): soft reset command was not acknowledged");
        }
        status
    }

    /// Trigger a high repeatability, clock stretching single shot and read back the raw frame
    ///
    /// The frame is not checked; pass it to [`validate_and_convert`](crate::validate_and_convert).
    pub fn single_shot_read(&mut self, frame: &mut MeasurementFrame) -> Result<(), Error<E>> {
        self.single_shot_read_with(frame, Repeatability::High, ClockStretching::Enabled)
    }

    /// Trigger a single shot with the given settings and read back the raw frame
    ///
    /// Nothing is read if the command is not acknowledged.
    pub fn single_shot_read_with(
        &mut self,
        frame: &mut MeasurementFrame,
        repeatability: Repeatability,
        clock_stretching: ClockStretching,
    ) -> Result<(), Error<E>> {
        self.send_command(single_shot_command(repeatability, clock_stretching))?;
        self.delay.delay_ms(MEASUREMENT_DELAY_MS);
        self.receive(frame)
    }

    /// Enter periodic mode at medium repeatability, 2 measurements per second
    pub fn enable_periodic_mode(&mut self) -> Result<(), Error<E>> {
        self.start_periodic(Repeatability::Medium, Rate::Mps2)
    }

    /// Enter periodic mode with the given settings
    pub fn start_periodic(&mut self, repeatability: Repeatability, rate: Rate) -> Result<(), Error<E>> {
        self.send_command(periodic_command(repeatability, rate))
    }

    /// Fetch the latest frame buffered in periodic mode
    ///
    /// The readout command is best-effort: if it is not acknowledged a warning is logged and the
    /// read is still issued, and its status is what gets returned.
    pub fn periodic_read(&mut self, frame: &mut MeasurementFrame) -> Result<(), Error<E>> {
        if self.send_command(Command::ReadoutForPeriodicMode).is_err() {
            warn!("sht3x::periodic_read(): readout command failed, reading anyway");
        }
        self.receive(frame)
    }

    /// Single shot (see [`single_shot_read`](Self::single_shot_read)) followed by validation
    pub fn measure(&mut self) -> Result<Measurement, Error<E>> {
        let mut frame = [0u8; FRAME_LEN];
        self.single_shot_read(&mut frame)?;
        Ok(validate_and_convert(&frame)?)
    }

    /// Periodic readout (see [`periodic_read`](Self::periodic_read)) followed by validation
    pub fn read_periodic(&mut self) -> Result<Measurement, Error<E>> {
        let mut frame = [0u8; FRAME_LEN];
        self.periodic_read(&mut frame)?;
        Ok(validate_and_convert(&frame)?)
    }
}

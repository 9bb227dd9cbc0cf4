//! Driver for the ADT7410 I2C temperature sensor.
//!
//! [`Adt7410`] only holds which of the sensors on the bus it talks to. The bus itself is passed to
//! every operation, so several sensors can share one I2C peripheral.

mod address;
mod error;
pub mod registers;
mod sample;

#[cfg(any(test, feature = "fake"))]
pub mod fake;

use embedded_hal::blocking::i2c::{Write, WriteRead};

pub use self::{
    address::{IdSelection, SensorId, BASE_ADDRESS},
    error::*,
    registers::{AlertMode, Config, FaultQueue, OperationMode, Polarity, Resolution, Status},
    sample::{decode_13bit, decode_16bit, RawTemperature, Reading},
};
use crate::thermometer::{self, Temperature};

/// I2C bus the driver can talk over
pub trait I2cBus<E>: Write<Error = E> + WriteRead<Error = E> {}

impl<T, E> I2cBus<E> for T where T: Write<Error = E> + WriteRead<Error = E> {}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Adt7410 {
    id: SensorId,
}

impl Adt7410 {
    /// Sensor `id` on the bus. Ids other than 0, 1 or 2 fall back to sensor 0.
    pub fn new(id: u8) -> Self {
        let selection = SensorId::select(id);
        if let IdSelection::Defaulted { requested } = selection {
            warn!("Sensor id {=u8} out of range, using sensor 0", requested);
        }
        Self::with_id(selection.id())
    }

    #[inline]
    pub const fn with_id(id: SensorId) -> Self {
        Self { id }
    }

    #[inline]
    pub const fn id(&self) -> SensorId {
        self.id
    }

    #[inline]
    pub const fn address(&self) -> u8 {
        self.id.address()
    }

    fn read_registers<E>(
        &self,
        i2c: &mut impl I2cBus<E>,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), E> {
        i2c.write_read(self.address(), &[reg], buf)?;
        Ok(())
    }

    fn read_register<E>(&self, i2c: &mut impl I2cBus<E>, reg: u8) -> Result<u8, E> {
        let mut buf = [0u8; 1];
        self.read_registers(i2c, reg, &mut buf)?;
        Ok(buf[0])
    }

    fn write_register<E>(&self, i2c: &mut impl I2cBus<E>, reg: u8, value: u8) -> Result<(), E> {
        i2c.write(self.address(), &[reg, value])?;
        Ok(())
    }

    fn write_setpoint<E>(
        &self,
        i2c: &mut impl I2cBus<E>,
        reg: u8,
        temp: Temperature,
    ) -> Result<(), E> {
        let [msb, lsb] = thermometer::to_register_format(temp);
        i2c.write(self.address(), &[reg, msb, lsb])?;
        Ok(())
    }

    /// Configures the sensor with [`Config::DEFAULT`]: continuous conversion, 16-bit resolution
    /// and a fault queue of 2.
    ///
    /// Returns the contents of the ID register, which can be checked with
    /// [`registers::is_adt7410`] to see if a sensor is present.
    pub fn initialise<E>(&mut self, i2c: &mut impl I2cBus<E>) -> Result<u8, E> {
        let id = self.read_register(i2c, registers::ID)?;
        self.configure(i2c, Config::DEFAULT)?;

        if registers::is_adt7410(id) {
            debug!("Sensor {=u8}: found ADT7410 rev {=u8}", self.id.value(), id & 0x07);
        } else {
            warn!("Sensor {=u8}: unexpected ID {=u8:#x}", self.id.value(), id);
        }

        Ok(id)
    }

    /// Writes the configuration register
    pub fn configure<E>(&mut self, i2c: &mut impl I2cBus<E>, config: Config) -> Result<(), E> {
        self.write_register(i2c, registers::CONFIG, config.to_register())
    }

    /// Reads back the configuration register
    pub fn config<E>(&self, i2c: &mut impl I2cBus<E>) -> Result<Config, E> {
        Ok(Config::from_register(
            self.read_register(i2c, registers::CONFIG)?,
        ))
    }

    /// Changes the resolution, leaving the other configuration bits untouched
    pub fn set_resolution<E>(
        &mut self,
        i2c: &mut impl I2cBus<E>,
        resolution: Resolution,
    ) -> Result<(), E> {
        let config = self.config(i2c)?.with_resolution(resolution);
        self.configure(i2c, config)
    }

    /// Contents of the status register
    pub fn status<E>(&self, i2c: &mut impl I2cBus<E>) -> Result<Status, E> {
        Ok(Status(self.read_register(i2c, registers::STATUS)?))
    }

    /// Reads the latest conversion result
    ///
    /// If the sensor reports a conversion in progress, nothing else is read and
    /// [`Reading::NotReady`] is returned. There is no retry.
    pub fn sample<E>(&self, i2c: &mut impl I2cBus<E>) -> Result<Reading, E> {
        if self.status(i2c)?.not_ready() {
            warn!("Sensor {=u8}: conversion not ready", self.id.value());
            return Ok(Reading::NotReady);
        }

        let resolution = self.config(i2c)?.resolution;

        let mut buf = [0u8; 2];
        self.read_registers(i2c, registers::TEMP_MSB, &mut buf)?;

        let raw = RawTemperature::decode(buf, resolution);
        trace!("Sensor {=u8}: raw {=i16}", self.id.value(), raw.value());

        Ok(Reading::Ready(raw))
    }

    /// Reads the temperature as a signed raw value, or 0 if no conversion result was available
    ///
    /// In 16-bit mode one LSB is 1/128 °C; in 13-bit mode it is 1/16 °C.
    pub fn read_temperature<E>(&self, i2c: &mut impl I2cBus<E>) -> Result<i16, E> {
        Ok(self.sample(i2c)?.value())
    }

    /// Reads the temperature in degrees Celsius, or `None` if no conversion result was available
    pub fn read_celsius<E>(&self, i2c: &mut impl I2cBus<E>) -> Result<Option<Temperature>, E> {
        Ok(self.sample(i2c)?.celsius())
    }

    pub fn set_high_limit<E>(
        &mut self,
        i2c: &mut impl I2cBus<E>,
        temp: Temperature,
    ) -> Result<(), E> {
        self.write_setpoint(i2c, registers::T_HIGH_MSB, temp)
    }

    pub fn set_low_limit<E>(
        &mut self,
        i2c: &mut impl I2cBus<E>,
        temp: Temperature,
    ) -> Result<(), E> {
        self.write_setpoint(i2c, registers::T_LOW_MSB, temp)
    }

    pub fn set_critical_limit<E>(
        &mut self,
        i2c: &mut impl I2cBus<E>,
        temp: Temperature,
    ) -> Result<(), E> {
        self.write_setpoint(i2c, registers::T_CRIT_MSB, temp)
    }

    /// Sets the hysteresis applied to all three limits, in whole degrees. Values above 15 are
    /// clamped.
    pub fn set_hysteresis<E>(&mut self, i2c: &mut impl I2cBus<E>, degrees: u8) -> Result<(), E> {
        self.write_register(i2c, registers::T_HYST, degrees.min(15))
    }

    /// Issues a software reset. The sensor needs ~200us before it answers again.
    pub fn reset<E>(&mut self, i2c: &mut impl I2cBus<E>) -> Result<(), E> {
        i2c.write(self.address(), &[registers::SOFTWARE_RESET])?;
        Ok(())
    }
}

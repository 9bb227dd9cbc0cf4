use embedded_hal::blocking::i2c::{Write, WriteRead};

use crate::adt7410::{Adt7410, Reading, Result, SensorId};

/// Up to `N` ADT7410s sharing one I2C bus
pub struct Adt7410Array<I, const N: usize> {
    bus: I,
    sensors: heapless::Vec<Adt7410, N>,
}

impl<I, const N: usize> Adt7410Array<I, N> {
    pub const fn new(bus: I) -> Self {
        Self {
            bus,
            sensors: heapless::Vec::new(),
        }
    }

    pub fn bus(&self) -> &I {
        &self.bus
    }
    pub fn bus_mut(&mut self) -> &mut I {
        &mut self.bus
    }

    /// Gives the bus back
    pub fn release(self) -> I {
        self.bus
    }

    pub fn sensors(&self) -> &[Adt7410] {
        &self.sensors
    }

    /// Adds sensor `id` (falling back to sensor 0 for out-of-range ids)
    ///
    /// Returns the sensor back if the array is full.
    pub fn add(&mut self, id: u8) -> core::result::Result<SensorId, Adt7410> {
        let sensor = Adt7410::new(id);
        self.sensors.push(sensor)?;
        Ok(sensor.id())
    }
}

impl<I, E, const N: usize> Adt7410Array<I, N>
where
    I: Write<Error = E> + WriteRead<Error = E>,
{
    /// Initialises every sensor, returning the contents of their ID registers in order
    pub fn initialise_all(&mut self) -> Result<heapless::Vec<u8, N>, E> {
        let mut ids = heapless::Vec::new();

        for sensor in &mut self.sensors {
            let id = sensor.initialise(&mut self.bus)?;
            info!(
                "Sensor {=u8} at {=u8:#x}: ID {=u8:#x}",
                sensor.id().value(),
                sensor.address(),
                id
            );
            // SAFETY: ids has the same capacity as sensors
            unsafe {
                ids.push_unchecked(id);
            }
        }

        Ok(ids)
    }

    /// Samples every sensor once, in order
    pub fn sample_all(&mut self) -> Result<heapless::Vec<Reading, N>, E> {
        let mut readings = heapless::Vec::new();

        for sensor in &self.sensors {
            let reading = sensor.sample(&mut self.bus)?;
            // SAFETY: readings has the same capacity as sensors
            unsafe {
                readings.push_unchecked(reading);
            }
        }

        Ok(readings)
    }

    /// Reads the raw temperature of every sensor
    ///
    /// Slots without a sensor, sensors that are mid-conversion and sensors that fail to answer all
    /// read as 0. Bus errors are logged, not returned, so one missing sensor does not stop the
    /// others from being read.
    pub fn readings(&mut self) -> [i16; N] {
        let mut out = [0i16; N];

        for (slot, sensor) in out.iter_mut().zip(self.sensors.iter()) {
            match sensor.read_temperature(&mut self.bus) {
                Ok(value) => *slot = value,
                Err(e) => {
                    error!("Sensor {=u8}: {=str}", sensor.id().value(), e.as_str());
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adt7410::{
        fake::{FakeAdt7410, FakeBus},
        registers, Config,
    };

    fn three_sensor_bus() -> FakeBus {
        FakeBus::new()
            .with_device(FakeAdt7410::new(0x48).with_conversion(0x0C, 0x80))
            .with_device(FakeAdt7410::new(0x49).with_conversion(0xF3, 0x80))
            .with_device(FakeAdt7410::new(0x4A))
    }

    #[test]
    fn add_rejects_when_full() {
        let mut array = Adt7410Array::<_, 2>::new(FakeBus::new());
        assert_eq!(array.add(0), Ok(SensorId::ZERO));
        assert_eq!(array.add(9), Ok(SensorId::ZERO));
        assert!(array.add(1).is_err());
        assert_eq!(array.sensors().len(), 2);
    }

    #[test]
    fn initialise_all_configures_each_sensor() {
        let mut array = Adt7410Array::<_, 3>::new(three_sensor_bus());
        for id in 0..3 {
            array.add(id).unwrap();
        }

        let ids = array.initialise_all().unwrap();
        assert_eq!(ids.as_slice(), &[0xCB, 0xCB, 0xCB]);

        let bus = array.release();
        for addr in 0x48..=0x4A {
            assert_eq!(
                bus.device(addr).unwrap().register(registers::CONFIG),
                Config::DEFAULT.to_register()
            );
        }
    }

    #[test]
    fn readings_are_in_sensor_order_with_zero_for_not_ready() {
        let mut array = Adt7410Array::<_, 3>::new(three_sensor_bus());
        for id in 0..3 {
            array.add(id).unwrap();
        }
        array.initialise_all().unwrap();

        assert_eq!(array.readings(), [3200, -3200, 0]);

        let readings = array.sample_all().unwrap();
        assert_eq!(readings[2], Reading::NotReady);
    }

    #[test]
    fn conversion_finishing_between_cycles() {
        let mut array = Adt7410Array::<_, 3>::new(three_sensor_bus());
        for id in 0..3 {
            array.add(id).unwrap();
        }
        array.initialise_all().unwrap();

        assert_eq!(array.readings()[2], 0);
        let reads_before = array.bus().reads(0x4A);

        array
            .bus_mut()
            .device_mut(0x4A)
            .unwrap()
            .finish_conversion(0x00, 0x80);

        assert_eq!(array.readings(), [3200, -3200, 128]);
        // status, config & temperature
        assert_eq!(array.bus().reads(0x4A), reads_before + 3);
    }

    #[test]
    fn missing_sensor_reads_zero() {
        let bus = FakeBus::new().with_device(
            FakeAdt7410::new(0x48)
                .with_register(registers::CONFIG, 0x81)
                .with_conversion(0x00, 0x80),
        );
        let mut array = Adt7410Array::<_, 3>::new(bus);
        array.add(0).unwrap();
        array.add(1).unwrap();

        assert_eq!(array.readings(), [128, 0, 0]);
        assert!(array.sample_all().is_err());
    }
}

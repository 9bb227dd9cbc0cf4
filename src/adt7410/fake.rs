//! Fake I2C bus for testing
//!
//! Holds the register file of up to four ADT7410s and answers register reads and writes the way
//! the device does: the first written byte sets the address pointer, which then auto-increments.

use embedded_hal::blocking::i2c::{Write, WriteRead};

use super::registers;

const REGISTERS: usize = 0x30;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FakeError {
    /// Nothing answered at this address
    Nack(u8),
}

#[derive(Debug, Clone)]
pub struct FakeAdt7410 {
    address: u8,
    regs: [u8; REGISTERS],
}

impl FakeAdt7410 {
    /// A device in its power-on state
    pub fn new(address: u8) -> Self {
        let mut regs = [0u8; REGISTERS];
        regs[usize::from(registers::STATUS)] = 0x80;
        regs[usize::from(registers::T_HIGH_MSB)] = 0x20;
        regs[usize::from(registers::T_LOW_MSB)] = 0x05;
        regs[usize::from(registers::T_CRIT_MSB)] = 0x49;
        regs[usize::from(registers::T_CRIT_MSB) + 1] = 0x80;
        regs[usize::from(registers::T_HYST)] = 0x05;
        regs[usize::from(registers::ID)] = 0xCB;
        Self { address, regs }
    }

    /// Loads a finished conversion into the temperature register and clears `/RDY`
    pub fn with_conversion(mut self, msb: u8, lsb: u8) -> Self {
        self.finish_conversion(msb, lsb);
        self
    }

    pub fn finish_conversion(&mut self, msb: u8, lsb: u8) {
        self.regs[usize::from(registers::TEMP_MSB)] = msb;
        self.regs[usize::from(registers::TEMP_LSB)] = lsb;
        self.regs[usize::from(registers::STATUS)] &= 0x7F;
    }

    pub fn with_register(mut self, reg: u8, value: u8) -> Self {
        self.regs[usize::from(reg)] = value;
        self
    }

    pub fn register(&self, reg: u8) -> u8 {
        self.regs[usize::from(reg)]
    }
}

#[derive(Debug, Default)]
pub struct FakeBus {
    devices: heapless::Vec<FakeAdt7410, 4>,
    /// Every register write seen, as `(address, register, value)`
    writes: heapless::Vec<(u8, u8, u8), 32>,
    /// Writes that only set the address pointer, as `(address, pointer)`
    commands: heapless::Vec<(u8, u8), 8>,
    /// Number of reads per address
    reads: heapless::Vec<(u8, usize), 4>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_device(mut self, device: FakeAdt7410) -> Self {
        assert!(self.devices.push(device).is_ok(), "too many fake devices");
        self
    }

    pub fn device(&self, address: u8) -> Option<&FakeAdt7410> {
        self.devices.iter().find(|d| d.address == address)
    }

    pub fn device_mut(&mut self, address: u8) -> Option<&mut FakeAdt7410> {
        self.devices.iter_mut().find(|d| d.address == address)
    }

    pub fn writes(&self) -> &[(u8, u8, u8)] {
        &self.writes
    }

    pub fn commands(&self) -> &[(u8, u8)] {
        &self.commands
    }

    pub fn reads(&self, address: u8) -> usize {
        self.reads
            .iter()
            .find(|(a, _)| *a == address)
            .map_or(0, |(_, n)| *n)
    }

    fn count_read(&mut self, address: u8) {
        if let Some((_, n)) = self.reads.iter_mut().find(|(a, _)| *a == address) {
            *n += 1;
        } else {
            let _ = self.reads.push((address, 1));
        }
    }
}

impl Write for FakeBus {
    type Error = FakeError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        let device = self
            .devices
            .iter_mut()
            .find(|d| d.address == address)
            .ok_or(FakeError::Nack(address))?;

        let Some((&pointer, data)) = bytes.split_first() else {
            return Ok(());
        };

        if data.is_empty() {
            let _ = self.commands.push((address, pointer));
            return Ok(());
        }

        for (i, b) in data.iter().enumerate() {
            let reg = pointer.wrapping_add(i as u8);
            if let Some(slot) = device.regs.get_mut(usize::from(reg)) {
                *slot = *b;
            }
            let _ = self.writes.push((address, reg, *b));
        }

        Ok(())
    }
}

impl WriteRead for FakeBus {
    type Error = FakeError;

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        let device = self
            .devices
            .iter()
            .find(|d| d.address == address)
            .ok_or(FakeError::Nack(address))?;

        let pointer = bytes.first().copied().unwrap_or(0);
        for (i, b) in buffer.iter_mut().enumerate() {
            let reg = usize::from(pointer) + i;
            *b = device.regs.get(reg).copied().unwrap_or(0);
        }

        self.count_read(address);
        Ok(())
    }
}

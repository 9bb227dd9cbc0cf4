//! Decoding of the temperature register

use super::registers::Resolution;
use crate::thermometer::Temperature;

/// Sign-extends a 16-bit register value.
#[allow(clippy::cast_possible_truncation)]
pub const fn decode_16bit(raw: u16) -> i16 {
    let v = raw as i32;
    (if v >= 32_768 { v - 65_536 } else { v }) as i16
}

/// Sign-extends a 13-bit value, i.e. the temperature register already shifted right by 3.
/// Bits above the 13-bit field are ignored.
#[allow(clippy::cast_possible_truncation)]
pub const fn decode_13bit(raw: u16) -> i16 {
    let v = (raw & 0x1FFF) as i32;
    (if v >= 4096 { v - 8192 } else { v }) as i16
}

/// Signed temperature value as read from the sensor, along with the resolution it was read in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTemperature {
    value: i16,
    resolution: Resolution,
}

impl RawTemperature {
    pub const fn new(value: i16, resolution: Resolution) -> Self {
        Self { value, resolution }
    }

    /// Decode the temperature MSB & LSB registers
    pub const fn decode(bytes: [u8; 2], resolution: Resolution) -> Self {
        let raw = u16::from_be_bytes(bytes);
        let value = match resolution {
            Resolution::Bits13 => decode_13bit(raw >> 3),
            Resolution::Bits16 => decode_16bit(raw),
        };
        Self { value, resolution }
    }

    #[inline]
    pub const fn value(self) -> i16 {
        self.value
    }

    #[inline]
    pub const fn resolution(self) -> Resolution {
        self.resolution
    }

    /// Degrees Celsius. 13-bit values count sixteenths, 16-bit values count 128ths.
    pub const fn celsius(self) -> Temperature {
        let bits = self.value as i32;
        match self.resolution {
            Resolution::Bits13 => Temperature::from_bits(bits << 3),
            Resolution::Bits16 => Temperature::from_bits(bits),
        }
    }
}

/// Result of polling a sensor once
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    Ready(RawTemperature),
    /// The status register reported a conversion in progress. Nothing was read.
    NotReady,
}

impl Reading {
    /// The raw value, or 0 if no conversion result was available
    pub const fn value(self) -> i16 {
        match self {
            Self::Ready(raw) => raw.value(),
            Self::NotReady => 0,
        }
    }

    pub const fn raw(self) -> Option<RawTemperature> {
        match self {
            Self::Ready(raw) => Some(raw),
            Self::NotReady => None,
        }
    }

    pub const fn celsius(self) -> Option<Temperature> {
        match self {
            Self::Ready(raw) => Some(raw.celsius()),
            Self::NotReady => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_bit_sign_extension() {
        assert_eq!(decode_16bit(0), 0);
        assert_eq!(decode_16bit(0x0C80), 3200);
        assert_eq!(decode_16bit(32_767), 32_767);
        assert_eq!(decode_16bit(32_768), -32_768);
        assert_eq!(decode_16bit(0xFFFF), -1);
        assert_eq!(decode_16bit(0xF380), -3200);
    }

    #[test]
    fn sixteen_bit_matches_subtraction_rule() {
        for v in (0..=u16::MAX).step_by(257) {
            let expected = if v < 32_768 {
                i32::from(v)
            } else {
                i32::from(v) - 65_536
            };
            assert_eq!(i32::from(decode_16bit(v)), expected, "raw {v}");
        }
    }

    #[test]
    fn thirteen_bit_sign_extension() {
        assert_eq!(decode_13bit(0), 0);
        assert_eq!(decode_13bit(4095), 4095);
        assert_eq!(decode_13bit(4096), -4096);
        assert_eq!(decode_13bit(8191), -1);
        assert_eq!(decode_13bit(0x1E70), -400);
    }

    #[test]
    fn decode_shifts_thirteen_bit_registers() {
        // +25 °C: 400 sixteenths, left aligned
        let raw = RawTemperature::decode([0x0C, 0x80], Resolution::Bits13);
        assert_eq!(raw.value(), 400);
        assert_eq!(raw.celsius(), Temperature::from_num(25));

        // -25 °C
        let raw = RawTemperature::decode([0xF3, 0x80], Resolution::Bits13);
        assert_eq!(raw.value(), -400);
        assert_eq!(raw.celsius(), Temperature::from_num(-25));
    }

    #[test]
    fn decode_sixteen_bit_registers() {
        let raw = RawTemperature::decode([0x0C, 0x80], Resolution::Bits16);
        assert_eq!(raw.value(), 3200);
        assert_eq!(raw.celsius(), Temperature::from_num(25));

        let raw = RawTemperature::decode([0xFF, 0xFF], Resolution::Bits16);
        assert_eq!(raw.value(), -1);
        assert_eq!(raw.celsius(), Temperature::from_num(-0.0078125));
    }

    #[test]
    fn not_ready_reads_as_zero() {
        assert_eq!(Reading::NotReady.value(), 0);
        assert_eq!(Reading::NotReady.celsius(), None);

        let ready = Reading::Ready(RawTemperature::new(-12, Resolution::Bits16));
        assert_eq!(ready.value(), -12);
        assert!(ready.raw().is_some());
    }
}

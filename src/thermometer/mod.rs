//! Temperature values and the multi-sensor array

pub mod adt7410;

use fixed::types::I25F7;

/// I25F7 is a fixed point number with 7 fractional bits and 25 integer bits.
/// This matches the ADT7410's 16-bit format exactly: a precision of 0.0078125 degrees Celsius.
pub type Temperature = I25F7;

/// Encodes `temp` in the 16-bit two's complement format used by the setpoint registers,
/// saturating at the ends of the representable range.
#[allow(clippy::cast_possible_truncation)]
pub fn to_register_format(temp: Temperature) -> [u8; 2] {
    let bits = temp
        .to_bits()
        .clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
    bits.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_format_is_big_endian_128ths() {
        assert_eq!(to_register_format(Temperature::from_num(64)), [0x20, 0x00]);
        assert_eq!(to_register_format(Temperature::from_num(-0.5)), [0xFF, 0xC0]);
        assert_eq!(to_register_format(Temperature::from_num(1000)), [0x7F, 0xFF]);
        assert_eq!(to_register_format(Temperature::from_num(-1000)), [0x80, 0x00]);
    }
}

//! Line-oriented output of the polling loop
//!
//! Every cycle produces one [`Frame`], written as CRLF-terminated lines: the marker, the
//! timestamp in milliseconds, then one raw reading per sensor. A host divides the readings by 128
//! to get degrees Celsius.
//!
//! ```text
//! tx
//! 10250
//! 3200
//! -3200
//! 0
//! ```

use core::fmt::Write;

use num_traits::AsPrimitive;

use crate::config::{FRAME_MARKER, SENSOR_COUNT};

const NEWLINE: &str = "\r\n";

/// One polling cycle's worth of readings
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub timestamp_ms: u32,
    pub readings: [i16; SENSOR_COUNT],
}

impl Frame {
    pub const fn new(timestamp_ms: u32, readings: [i16; SENSOR_COUNT]) -> Self {
        Self {
            timestamp_ms,
            readings,
        }
    }

    pub fn write_to<W: Write>(&self, tx: &mut W) -> core::fmt::Result {
        tx.write_str(FRAME_MARKER)?;
        tx.write_str(NEWLINE)?;

        write_uint(tx, self.timestamp_ms)?;
        tx.write_str(NEWLINE)?;

        for reading in self.readings {
            write_int(tx, reading)?;
            tx.write_str(NEWLINE)?;
        }

        Ok(())
    }
}

/// Writes `num` in decimal without going through `core::fmt`'s integer formatting
pub fn write_uint<W: Write>(tx: &mut W, mut num: u32) -> core::fmt::Result {
    const BUF_SIZE: usize = 10;

    let mut buf = [0u8; BUF_SIZE];
    let mut idx = 0;

    loop {
        let digit: u8 = (num % 10).as_();
        num /= 10;

        buf[BUF_SIZE - idx - 1] = b'0' + digit;
        idx += 1;

        if num == 0 {
            break;
        }
    }

    let buf = &buf[BUF_SIZE - idx..];
    // SAFETY: buf only holds ASCII digits
    tx.write_str(unsafe { core::str::from_utf8_unchecked(buf) })
}

pub fn write_int<W: Write>(tx: &mut W, num: i16) -> core::fmt::Result {
    if num.is_negative() {
        tx.write_str("-")?;
    }
    write_uint(tx, u32::from(num.unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use heapless::String;

    use super::*;

    #[test]
    fn integers() {
        let mut s = String::<16>::new();
        write_uint(&mut s, 0).unwrap();
        s.push(' ').unwrap();
        write_uint(&mut s, u32::MAX).unwrap();
        assert_eq!(s.as_str(), "0 4294967295");

        let mut s = String::<16>::new();
        write_int(&mut s, i16::MIN).unwrap();
        s.push(' ').unwrap();
        write_int(&mut s, -1).unwrap();
        s.push(' ').unwrap();
        write_int(&mut s, 3200).unwrap();
        assert_eq!(s.as_str(), "-32768 -1 3200");
    }

    #[test]
    fn frame_layout() {
        let mut s = String::<64>::new();
        Frame::new(10_250, [3200, -3200, 0]).write_to(&mut s).unwrap();
        assert_eq!(s.as_str(), "tx\r\n10250\r\n3200\r\n-3200\r\n0\r\n");
    }

    #[test]
    fn frame_reports_writer_overflow() {
        let mut s = String::<8>::new();
        assert!(Frame::new(1, [1, 2, 3]).write_to(&mut s).is_err());
    }
}

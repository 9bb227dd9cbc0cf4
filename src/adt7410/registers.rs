//! Register map and bit-level encodings of the ADT7410.

use static_assertions::assert_eq_size;

pub const TEMP_MSB: u8 = 0x00;
pub const TEMP_LSB: u8 = 0x01;
pub const STATUS: u8 = 0x02;
pub const CONFIG: u8 = 0x03;
pub const T_HIGH_MSB: u8 = 0x04;
pub const T_LOW_MSB: u8 = 0x06;
pub const T_CRIT_MSB: u8 = 0x08;
pub const T_HYST: u8 = 0x0A;
pub const ID: u8 = 0x0B;
pub const SOFTWARE_RESET: u8 = 0x2F;

/// Upper five bits of the ID register. The lower three are the silicon revision.
pub const MANUFACTURER_ID: u8 = 0b1100_1000;
const MANUFACTURER_MASK: u8 = 0b1111_1000;

/// Returns true if `id` (contents of the ID register) belongs to an ADT7410.
#[inline]
pub const fn is_adt7410(id: u8) -> bool {
    id & MANUFACTURER_MASK == MANUFACTURER_ID
}

/// Contents of the status register
///
/// Bits `[3:0]` always read 0. Bits `[6:4]` go high when the temperature goes below `T_LOW`, above
/// `T_HIGH` or above `T_CRIT`. Bit 7 (`/RDY`) reads 1 until a conversion result has been written
/// to the temperature register.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(pub u8);

assert_eq_size!(Status, u8);

impl Status {
    const T_LOW: u8 = 1 << 4;
    const T_HIGH: u8 = 1 << 5;
    const T_CRIT: u8 = 1 << 6;
    const NOT_READY: u8 = 1 << 7;

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// A conversion is in progress and the temperature register holds no new result.
    #[inline]
    pub const fn not_ready(self) -> bool {
        self.0 & Self::NOT_READY != 0
    }

    #[inline]
    pub const fn below_low(self) -> bool {
        self.0 & Self::T_LOW != 0
    }

    #[inline]
    pub const fn above_high(self) -> bool {
        self.0 & Self::T_HIGH != 0
    }

    #[inline]
    pub const fn above_critical(self) -> bool {
        self.0 & Self::T_CRIT != 0
    }

    /// Any of the three threshold flags is set
    #[inline]
    pub const fn excursion(self) -> bool {
        self.0 & (Self::T_LOW | Self::T_HIGH | Self::T_CRIT) != 0
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.0625 °C per LSB, value left aligned in the temperature register
    Bits13,
    /// 0.0078125 °C per LSB
    Bits16,
}

impl Resolution {
    const MASK: u8 = 0b1000_0000;

    /// Config bit 7: set selects 16-bit, clear selects 13-bit (the power-on default).
    const fn from_config_register(reg: u8) -> Self {
        if reg & Self::MASK == 0 {
            Self::Bits13
        } else {
            Self::Bits16
        }
    }

    const fn to_config_register(self) -> u8 {
        match self {
            Self::Bits13 => 0,
            Self::Bits16 => Self::MASK,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    Continuous,
    OneShot,
    OneSps,
    Shutdown,
}

impl OperationMode {
    const MASK: u8 = 0b0110_0000;

    const fn from_config_register(reg: u8) -> Self {
        match (reg & Self::MASK) >> 5 {
            0b00 => Self::Continuous,
            0b01 => Self::OneShot,
            0b10 => Self::OneSps,
            _ => Self::Shutdown,
        }
    }

    const fn to_config_register(self) -> u8 {
        let bits = match self {
            Self::Continuous => 0b00,
            Self::OneShot => 0b01,
            Self::OneSps => 0b10,
            Self::Shutdown => 0b11,
        };
        bits << 5
    }
}

/// Number of consecutive threshold violations before INT/CT assert
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultQueue {
    One,
    Two,
    Three,
    Four,
}

impl FaultQueue {
    const MASK: u8 = 0b0000_0011;

    const fn from_config_register(reg: u8) -> Self {
        match reg & Self::MASK {
            0b00 => Self::One,
            0b01 => Self::Two,
            0b10 => Self::Three,
            _ => Self::Four,
        }
    }

    const fn to_config_register(self) -> u8 {
        match self {
            Self::One => 0b00,
            Self::Two => 0b01,
            Self::Three => 0b10,
            Self::Four => 0b11,
        }
    }

    pub const fn depth(self) -> u8 {
        self.to_config_register() + 1
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertMode {
    Interrupt,
    Comparator,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    const fn from_bit(reg: u8, bit: u8) -> Self {
        if reg & (1 << bit) == 0 {
            Self::ActiveLow
        } else {
            Self::ActiveHigh
        }
    }

    const fn to_bit(self, bit: u8) -> u8 {
        match self {
            Self::ActiveLow => 0,
            Self::ActiveHigh => 1 << bit,
        }
    }
}

/// Decoded configuration register
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub resolution: Resolution,
    pub mode: OperationMode,
    pub alert_mode: AlertMode,
    pub int_polarity: Polarity,
    pub ct_polarity: Polarity,
    pub fault_queue: FaultQueue,
}

impl Config {
    const CT_POLARITY_BIT: u8 = 2;
    const INT_POLARITY_BIT: u8 = 3;
    const ALERT_MODE: u8 = 1 << 4;

    /// 16-bit resolution, continuous conversion, two faults in the fault queue (`0x81`)
    pub const DEFAULT: Self = Self {
        resolution: Resolution::Bits16,
        mode: OperationMode::Continuous,
        alert_mode: AlertMode::Interrupt,
        int_polarity: Polarity::ActiveLow,
        ct_polarity: Polarity::ActiveLow,
        fault_queue: FaultQueue::Two,
    };

    pub const fn from_register(reg: u8) -> Self {
        Self {
            resolution: Resolution::from_config_register(reg),
            mode: OperationMode::from_config_register(reg),
            alert_mode: if reg & Self::ALERT_MODE == 0 {
                AlertMode::Interrupt
            } else {
                AlertMode::Comparator
            },
            int_polarity: Polarity::from_bit(reg, Self::INT_POLARITY_BIT),
            ct_polarity: Polarity::from_bit(reg, Self::CT_POLARITY_BIT),
            fault_queue: FaultQueue::from_config_register(reg),
        }
    }

    pub const fn to_register(self) -> u8 {
        let alert = match self.alert_mode {
            AlertMode::Interrupt => 0,
            AlertMode::Comparator => Self::ALERT_MODE,
        };

        self.resolution.to_config_register()
            | self.mode.to_config_register()
            | alert
            | self.int_polarity.to_bit(Self::INT_POLARITY_BIT)
            | self.ct_polarity.to_bit(Self::CT_POLARITY_BIT)
            | self.fault_queue.to_config_register()
    }

    #[must_use]
    pub const fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: OperationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_fault_queue(mut self, fault_queue: FaultQueue) -> Self {
        self.fault_queue = fault_queue;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_0x81() {
        assert_eq!(Config::DEFAULT.to_register(), 0x81);
        assert_eq!(Config::from_register(0x81), Config::DEFAULT);
    }

    #[test]
    fn config_fields_map_to_their_bits() {
        let cfg = Config::DEFAULT
            .with_resolution(Resolution::Bits13)
            .with_mode(OperationMode::Shutdown)
            .with_fault_queue(FaultQueue::Four);
        assert_eq!(cfg.to_register(), 0b0110_0011);

        assert_eq!(
            Config::DEFAULT.with_mode(OperationMode::OneSps).to_register(),
            0x80 | 0x40 | 0x01
        );
        assert_eq!(
            Config::DEFAULT.with_mode(OperationMode::OneShot).to_register(),
            0x80 | 0x20 | 0x01
        );
    }

    #[test]
    fn comparator_and_polarity_bits() {
        let cfg = Config::from_register(0b0001_1100);
        assert_eq!(cfg.alert_mode, AlertMode::Comparator);
        assert_eq!(cfg.int_polarity, Polarity::ActiveHigh);
        assert_eq!(cfg.ct_polarity, Polarity::ActiveHigh);
        assert_eq!(cfg.resolution, Resolution::Bits13);
    }

    #[test]
    fn resolution_follows_bit_7() {
        assert_eq!(Config::from_register(0x80).resolution, Resolution::Bits16);
        assert_eq!(Config::from_register(0x7F).resolution, Resolution::Bits13);
    }

    #[test]
    fn fault_queue_depth() {
        assert_eq!(FaultQueue::One.depth(), 1);
        assert_eq!(FaultQueue::Two.depth(), 2);
        assert_eq!(FaultQueue::Four.depth(), 4);
    }

    #[test]
    fn status_bits() {
        let idle = Status(0x00);
        assert!(!idle.not_ready());
        assert!(!idle.excursion());

        assert!(Status(0x80).not_ready());
        assert!(Status(0x10).below_low());
        assert!(Status(0x20).above_high());
        assert!(Status(0x40).above_critical());
        assert!(Status(0x70).excursion());
        assert!(!Status(0x80).excursion());
    }

    #[test]
    fn manufacturer_id_ignores_revision() {
        assert!(is_adt7410(0xC8));
        assert!(is_adt7410(0xCB));
        assert!(!is_adt7410(0x00));
        assert!(!is_adt7410(0xFF));
    }
}

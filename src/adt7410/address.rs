/// I2C address of the sensor with both address pins tied low
pub const BASE_ADDRESS: u8 = 0x48;

/// Index of one of the (up to three) sensors sharing a bus. The sensor's I2C address is
/// [`BASE_ADDRESS`] plus the index.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorId(u8);

impl SensorId {
    pub const MAX: u8 = 2;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);

    /// Returns `None` if `id` is not one of 0, 1 or 2
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if id <= Self::MAX {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Picks the sensor id for `requested`, falling back to [`SensorId::ZERO`] when it is out of
    /// range.
    pub const fn select(requested: u8) -> IdSelection {
        match Self::new(requested) {
            Some(id) => IdSelection::Exact(id),
            None => IdSelection::Defaulted { requested },
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn address(self) -> u8 {
        BASE_ADDRESS + self.0
    }
}

/// Outcome of [`SensorId::select`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdSelection {
    Exact(SensorId),
    /// The requested id was out of range and sensor 0 is used instead
    Defaulted { requested: u8 },
}

impl IdSelection {
    pub const fn id(self) -> SensorId {
        match self {
            Self::Exact(id) => id,
            Self::Defaulted { .. } => SensorId::ZERO,
        }
    }

    pub const fn is_defaulted(self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }
}

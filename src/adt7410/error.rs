pub type Result<T, E> = core::result::Result<T, Error<E>>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The I2C transaction failed. The driver does not retry.
    Bus(E),
}

impl<E> Error<E> {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Error::Bus(_) => "I2C bus error",
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(value: E) -> Self {
        Self::Bus(value)
    }
}

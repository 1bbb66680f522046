use core::fmt;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    Port,
    Iom,
    Scl,
    Sda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    NoSuchBus(usize),
    Config(ConfigError),
    TimedOut,
    /// 传输失败，通常是从机未应答
    Io,
    /// 缓冲区方向与读标志不一致
    Direction,
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchBus(id) => write!(f, "I2C({id}) doesn't exist"),
            Self::Config(ConfigError::Port) => f.write_str("Invalid I2C port"),
            Self::Config(ConfigError::Iom) => f.write_str("I2C config error"),
            Self::Config(ConfigError::Scl) => f.write_str("SCL config error"),
            Self::Config(ConfigError::Sda) => f.write_str("SDA config error"),
            Self::TimedOut => f.write_str("I2C transfer timed out"),
            Self::Io => f.write_str("I2C transfer failed"),
            Self::Direction => f.write_str("buffer direction doesn't match transfer flags"),
        }
    }
}

impl core::error::Error for Error {}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Io => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
            _ => ErrorKind::Other,
        }
    }
}

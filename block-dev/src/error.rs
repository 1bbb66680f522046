use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// 块号超出设备范围
    OutOfRange { block: usize, count: usize },
    /// 偏移或长度未按闪存的编程粒度对齐
    Misaligned,
    /// 底层驱动报告的错误
    Device,
    UnknownIoctl(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { block, count } => {
                write!(f, "block {block} out of range (device has {count})")
            }
            Self::Misaligned => f.write_str("misaligned access"),
            Self::Device => f.write_str("device error"),
            Self::UnknownIoctl(op) => write!(f, "unknown ioctl op {op}"),
        }
    }
}

impl core::error::Error for Error {}

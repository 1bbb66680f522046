use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    AlreadyExists,
    NotFound,
    IsADirectory,
    NotADirectory,
    DirectoryNotEmpty,
    Unsupported,
    /// 块设备上没有可识别的文件系统
    Corrupted,
    NotMounted,
    AlreadyMounted,
    Device(block_dev::Error),
}

impl From<block_dev::Error> for Error {
    fn from(e: block_dev::Error) -> Self {
        Self::Device(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExists => f.write_str("file exists"),
            Self::NotFound => f.write_str("no such file or directory"),
            Self::IsADirectory => f.write_str("is a directory"),
            Self::NotADirectory => f.write_str("not a directory"),
            Self::DirectoryNotEmpty => f.write_str("directory not empty"),
            Self::Unsupported => f.write_str("operation not supported"),
            Self::Corrupted => f.write_str("no valid filesystem"),
            Self::NotMounted => f.write_str("no filesystem mounted"),
            Self::AlreadyMounted => f.write_str("mount point busy"),
            Self::Device(e) => write!(f, "block device: {e}"),
        }
    }
}

impl core::error::Error for Error {}

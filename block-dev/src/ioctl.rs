use crate::Error;

/// 块设备控制操作，操作码与运行时的块设备协议一致
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoctlOp {
    Init,
    Deinit,
    Sync,
    BlockCount,
    BlockSize,
    /// 擦除参数所指的块
    BlockErase(usize),
}

impl IoctlOp {
    pub const INIT: u8 = 1;
    pub const DEINIT: u8 = 2;
    pub const SYNC: u8 = 3;
    pub const BLOCK_COUNT: u8 = 4;
    pub const BLOCK_SIZE: u8 = 5;
    pub const BLOCK_ERASE: u8 = 6;

    /// `arg` is only meaningful for [`IoctlOp::BlockErase`].
    pub fn from_raw(op: u8, arg: usize) -> Result<Self, Error> {
        match op {
            Self::INIT => Ok(Self::Init),
            Self::DEINIT => Ok(Self::Deinit),
            Self::SYNC => Ok(Self::Sync),
            Self::BLOCK_COUNT => Ok(Self::BlockCount),
            Self::BLOCK_SIZE => Ok(Self::BlockSize),
            Self::BLOCK_ERASE => Ok(Self::BlockErase(arg)),
            op => Err(Error::UnknownIoctl(op)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Init => Self::INIT,
            Self::Deinit => Self::DEINIT,
            Self::Sync => Self::SYNC,
            Self::BlockCount => Self::BLOCK_COUNT,
            Self::BlockSize => Self::BLOCK_SIZE,
            Self::BlockErase(_) => Self::BLOCK_ERASE,
        }
    }
}

//! 扇区的抽象

use derive_more::{Add, From, Into};

/// 闪存扇区的字节数，也是块设备的块大小
pub const SECTOR_SIZE: usize = 8192;

/// 闪存上的绝对扇区号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Add, From, Into)]
#[repr(transparent)]
pub struct SectorId(usize);

impl core::ops::Add<usize> for SectorId {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        self + Self(rhs)
    }
}

impl SectorId {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// 包含该地址的扇区
    pub const fn containing(addr: usize) -> Self {
        Self(addr / SECTOR_SIZE)
    }

    /// 扇区首字节的绝对地址
    pub const fn address(self) -> usize {
        self.0 * SECTOR_SIZE
    }
}

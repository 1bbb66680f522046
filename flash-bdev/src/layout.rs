use crate::{SectorId, SECTOR_SIZE};

/// 小于 1MiB 的闪存放不下文件系统，不提供块设备
pub const MIN_FLASH_SIZE: usize = 1024 * 1024;

/// 文件系统在闪存上占据的区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashLayout {
    /// 第一个块对应的扇区
    pub start: SectorId,
    /// 块的个数
    pub blocks: usize,
}

impl FlashLayout {
    /// Places the filesystem area after the user application.
    ///
    /// The sector holding `user_start` is left to the application, the area
    /// begins at the next sector and runs to the end of the flash.
    pub fn probe(flash_size: usize, user_start: usize) -> Option<Self> {
        if flash_size < MIN_FLASH_SIZE {
            return None;
        }

        let start = SectorId::containing(user_start) + 1;
        let blocks = (flash_size / SECTOR_SIZE).checked_sub(start.into())?;
        (blocks > 0).then_some(Self { start, blocks })
    }

    #[inline]
    pub fn sector(&self, block_id: usize) -> SectorId {
        self.start + block_id
    }

    /// 区域的字节数
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks * SECTOR_SIZE
    }
}

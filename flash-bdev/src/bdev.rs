use block_dev::{BlockDevice, Error};
use embedded_storage::nor_flash::{NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash};
use spin::Mutex;

use crate::{FlashLayout, SectorId, SECTOR_SIZE};

/// 以闪存扇区为块的块设备
#[derive(Debug)]
pub struct FlashBdev<F> {
    flash: Mutex<F>,
    layout: FlashLayout,
}

impl<F: NorFlash> FlashBdev<F> {
    pub fn new(flash: F, layout: FlashLayout) -> Self {
        Self {
            flash: Mutex::new(flash),
            layout,
        }
    }

    /// 闪存太小或用户区占满闪存时返回 `None`
    pub fn probe(flash: F, user_start: usize) -> Option<Self> {
        let size = flash.capacity();
        let Some(layout) = FlashLayout::probe(size, user_start) else {
            log::info!("flash too small for a filesystem: size={size:#x}, user_start={user_start:#x}");
            return None;
        };
        log::debug!(
            "flash block device: start={:?} blocks={}",
            layout.start,
            layout.blocks
        );
        Some(Self::new(flash, layout))
    }

    pub fn layout(&self) -> FlashLayout {
        self.layout
    }

    pub fn into_inner(self) -> F {
        self.flash.into_inner()
    }

    /// 检查访问范围并换算成闪存上的绝对地址
    fn address(&self, block_id: usize, offset: usize, len: usize) -> Result<u32, Error> {
        let count = self.layout.blocks;
        let out_of_range = Error::OutOfRange {
            block: block_id,
            count,
        };
        if block_id >= count {
            return Err(out_of_range);
        }
        offset
            .checked_add(len)
            .filter(|&end| end <= (count - block_id) * SECTOR_SIZE)
            .ok_or(out_of_range)?;
        let addr = self.layout.sector(block_id).address() + offset;
        u32::try_from(addr).map_err(|_| out_of_range)
    }

    fn erase_sector(flash: &mut F, sid: SectorId) -> Result<(), Error> {
        let from = sid.address() as u32;
        flash
            .erase(from, from + SECTOR_SIZE as u32)
            .map_err(|e| flash_error("erase", from, e))
    }
}

impl<F> BlockDevice for FlashBdev<F>
where
    F: NorFlash + Send + 'static,
{
    fn read_blocks(&self, block_id: usize, offset: usize, buf: &mut [u8]) -> Result<(), Error> {
        let addr = self.address(block_id, offset, buf.len())?;
        self.flash
            .lock()
            .read(addr, buf)
            .map_err(|e| flash_error("read", addr, e))
    }

    fn write_blocks(
        &self,
        block_id: usize,
        offset: Option<usize>,
        buf: &[u8],
    ) -> Result<(), Error> {
        let addr = self.address(block_id, offset.unwrap_or(0), buf.len())?;
        let mut flash = self.flash.lock();
        if offset.is_none() {
            Self::erase_sector(&mut flash, self.layout.sector(block_id))?;
        }
        flash
            .write(addr, buf)
            .map_err(|e| flash_error("write", addr, e))
    }

    fn block_count(&self) -> usize {
        self.layout.blocks
    }

    fn block_size(&self) -> usize {
        SECTOR_SIZE
    }

    fn erase_block(&self, block_id: usize) -> Result<(), Error> {
        self.address(block_id, 0, 0)?;
        Self::erase_sector(&mut self.flash.lock(), self.layout.sector(block_id))
    }
}

fn flash_error(op: &str, addr: u32, e: impl NorFlashError) -> Error {
    let kind = e.kind();
    log::warn!("flash {op} at {addr:#x} failed: {kind:?}");
    match kind {
        NorFlashErrorKind::NotAligned => Error::Misaligned,
        _ => Error::Device,
    }
}

use alloc::vec;
use alloc::vec::Vec;

use embedded_storage::nor_flash::{
    check_erase, check_read, check_write, ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash,
};

use crate::SECTOR_SIZE;

/// 内存中的闪存，用于主机端与测试
///
/// Behaves like NOR flash: erased bytes read `0xFF` and programming can only
/// clear bits, so rewriting without an erase ANDs the old and new data.
#[derive(Debug, Clone)]
pub struct RamFlash {
    data: Vec<u8>,
}

impl RamFlash {
    pub const ERASED: u8 = 0xFF;

    /// `size` is rounded down to whole sectors.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![Self::ERASED; size / SECTOR_SIZE * SECTOR_SIZE],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl ErrorType for RamFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for RamFlash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        check_read(self, offset, bytes.len())?;
        let offset = offset as usize;
        bytes.copy_from_slice(&self.data[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl NorFlash for RamFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = SECTOR_SIZE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        check_erase(self, from, to)?;
        self.data[from as usize..to as usize].fill(Self::ERASED);
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        check_write(self, offset, bytes.len())?;
        let offset = offset as usize;
        self.data[offset..offset + bytes.len()]
            .iter_mut()
            .zip(bytes)
            .for_each(|(cell, byte)| *cell &= byte);
        Ok(())
    }
}

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use embedded_storage::nor_flash::{
    check_erase, check_read, check_write, ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash,
};
use flash_bdev::{RamFlash, SECTOR_SIZE};

/// 以镜像文件模拟的闪存，编程时与原有内容按位与
#[derive(Debug)]
pub struct FileFlash {
    file: File,
    capacity: usize,
}

impl FileFlash {
    pub fn open(file: File) -> io::Result<Self> {
        let capacity = file.metadata()?.len() as usize / SECTOR_SIZE * SECTOR_SIZE;
        Ok(Self { file, capacity })
    }

    /// 把文件截成`size`字节并全部置为擦除态
    pub fn create(mut file: File, size: u64) -> io::Result<Self> {
        let sector = [RamFlash::ERASED; SECTOR_SIZE];
        file.set_len(0)?;
        for _ in 0..size / SECTOR_SIZE as u64 {
            file.write_all(&sector)?;
        }
        file.flush()?;
        Self::open(file)
    }

    fn read_at(&mut self, offset: u32, bytes: &mut [u8]) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset as u64))?;
        self.file.read_exact(bytes)
    }

    fn write_at(&mut self, offset: u32, bytes: &[u8]) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset as u64))?;
        self.file.write_all(bytes)
    }
}

fn io_error(op: &str, e: io::Error) -> NorFlashErrorKind {
    log::error!("image {op} failed: {e}");
    NorFlashErrorKind::Other
}

impl ErrorType for FileFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for FileFlash {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        check_read(self, offset, bytes.len())?;
        self.read_at(offset, bytes).map_err(|e| io_error("read", e))
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl NorFlash for FileFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = SECTOR_SIZE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        check_erase(self, from, to)?;
        let erased = vec![RamFlash::ERASED; (to - from) as usize];
        self.write_at(from, &erased)
            .map_err(|e| io_error("erase", e))
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        check_write(self, offset, bytes.len())?;
        let mut cells = vec![0u8; bytes.len()];
        self.read_at(offset, &mut cells)
            .map_err(|e| io_error("read", e))?;
        cells.iter_mut().zip(bytes).for_each(|(cell, byte)| *cell &= byte);
        self.write_at(offset, &cells)
            .map_err(|e| io_error("write", e))
    }
}

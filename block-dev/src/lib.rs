//! # 块设备接口层
//!
//! 块设备是以**块**为单位存储数据的设备，例如片上闪存、SD卡等；
//! [`BlockDevice`] 就是对读写块设备的抽象，
//! 实现了此特质的类型称为**块设备驱动**。
//!
//! 文件系统通过块设备驱动读写、擦除块，并通过 [`IoctlOp`] 查询设备的几何信息。

#![no_std]

mod error;
mod ioctl;

use core::any::Any;

pub use self::{error::Error, ioctl::IoctlOp};

/// 块设备驱动特质
pub trait BlockDevice: Send + Sync + Any {
    /// Reads `buf.len()` bytes starting `offset` bytes into block `block_id`.
    fn read_blocks(&self, block_id: usize, offset: usize, buf: &mut [u8]) -> Result<(), Error>;

    /// Writes `buf` into block `block_id`.
    ///
    /// With `offset == None` the block is erased first and `buf` lands at the
    /// start of the block. With `Some(off)` the bytes are programmed in place,
    /// so the target range must already be erased.
    fn write_blocks(&self, block_id: usize, offset: Option<usize>, buf: &[u8])
        -> Result<(), Error>;

    fn block_count(&self) -> usize;

    fn block_size(&self) -> usize;

    fn erase_block(&self, block_id: usize) -> Result<(), Error>;

    /// 按操作码分派的控制接口
    fn ioctl(&self, op: IoctlOp) -> Result<Option<usize>, Error> {
        match op {
            IoctlOp::BlockCount => Ok(Some(self.block_count())),
            IoctlOp::BlockSize => Ok(Some(self.block_size())),
            IoctlOp::BlockErase(block_id) => self.erase_block(block_id).map(|()| Some(0)),
            IoctlOp::Init | IoctlOp::Deinit | IoctlOp::Sync => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::sync::Mutex;
    use std::vec;
    use std::vec::Vec;

    use super::*;

    const BLOCK: usize = 16;

    struct Plain(Mutex<Vec<u8>>);

    impl BlockDevice for Plain {
        fn read_blocks(&self, block_id: usize, offset: usize, buf: &mut [u8]) -> Result<(), Error> {
            let data = self.0.lock().unwrap();
            let start = block_id * BLOCK + offset;
            buf.copy_from_slice(&data[start..start + buf.len()]);
            Ok(())
        }

        fn write_blocks(
            &self,
            block_id: usize,
            offset: Option<usize>,
            buf: &[u8],
        ) -> Result<(), Error> {
            if offset.is_none() {
                self.erase_block(block_id)?;
            }
            let start = block_id * BLOCK + offset.unwrap_or(0);
            self.0.lock().unwrap()[start..start + buf.len()].copy_from_slice(buf);
            Ok(())
        }

        fn block_count(&self) -> usize {
            self.0.lock().unwrap().len() / BLOCK
        }

        fn block_size(&self) -> usize {
            BLOCK
        }

        fn erase_block(&self, block_id: usize) -> Result<(), Error> {
            let count = self.block_count();
            if block_id >= count {
                return Err(Error::OutOfRange {
                    block: block_id,
                    count,
                });
            }
            self.0.lock().unwrap()[block_id * BLOCK..][..BLOCK].fill(0xFF);
            Ok(())
        }
    }

    #[test]
    fn ioctl_geometry() {
        let dev = Plain(Mutex::new(vec![0; BLOCK * 4]));
        assert_eq!(Ok(Some(4)), dev.ioctl(IoctlOp::BlockCount));
        assert_eq!(Ok(Some(BLOCK)), dev.ioctl(IoctlOp::BlockSize));
        assert_eq!(Ok(None), dev.ioctl(IoctlOp::Sync));
    }

    #[test]
    fn ioctl_erase() {
        let dev = Plain(Mutex::new(vec![0; BLOCK * 2]));
        assert_eq!(Ok(Some(0)), dev.ioctl(IoctlOp::BlockErase(1)));

        let mut buf = [0u8; BLOCK];
        dev.read_blocks(1, 0, &mut buf).unwrap();
        assert!(buf.iter().all(|&b| b == 0xFF));
        dev.read_blocks(0, 0, &mut buf).unwrap();
        assert!(buf.iter().all(|&b| b == 0));

        assert_eq!(
            Err(Error::OutOfRange { block: 2, count: 2 }),
            dev.ioctl(IoctlOp::BlockErase(2))
        );
    }
}

use alloc::sync::Arc;
use alloc::vec::Vec;

use block_dev::BlockDevice;

use crate::Error;

/// 块设备上的文件系统格式
pub trait FileSystem {
    type Volume: Volume + 'static;

    /// 在块设备上建立空的文件系统，原有数据全部丢失
    fn mkfs(dev: &Arc<dyn BlockDevice>) -> Result<(), Error>;

    /// Fails with [`Error::Corrupted`] when the device holds no filesystem.
    fn mount(dev: &Arc<dyn BlockDevice>) -> Result<Self::Volume, Error>;
}

/// 已挂载的卷，路径相对于卷的根目录
pub trait Volume: Send {
    /// 创建或覆盖文件
    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), Error>;

    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, Error>;

    fn exists(&mut self, path: &str) -> bool {
        self.read_file(path).is_ok()
    }
}

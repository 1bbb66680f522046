//! 首次启动的初始化

use alloc::sync::Arc;

use block_dev::BlockDevice;
use vfs::{FileSystem, MountTable};

/// 每次启动都会执行的脚本
pub const BOOT_SCRIPT: &str = "boot.py";

pub const BOOT_SCRIPT_CONTENT: &str = "\
# This file is executed on every boot (including wake-boot from deepsleep)
import gc
gc.collect()
";

/// 格式化块设备、挂载到根目录并写入默认的启动脚本
pub fn setup<Fs: FileSystem>(
    dev: &Arc<dyn BlockDevice>,
    mounts: &mut MountTable,
) -> Result<(), vfs::Error> {
    log::info!("Performing initial setup");
    Fs::mkfs(dev)?;
    let volume = Fs::mount(dev)?;
    mounts.mount("/", volume)?;
    mounts.write_file(BOOT_SCRIPT, BOOT_SCRIPT_CONTENT.as_bytes())
}

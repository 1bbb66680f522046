//! # 启动引导
//!
//! 上电后依次：
//!
//! 1. 在闪存块设备上挂载根文件系统，挂载失败则视为首次启动，格式化后再挂载；
//! 2. 回收一次内存并重新设定垃圾回收阈值。

#![no_std]

extern crate alloc;

mod heap;
mod setup;

use alloc::sync::Arc;

use block_dev::BlockDevice;
use embedded_storage::nor_flash::NorFlash;
use flash_bdev::FlashBdev;
use vfs::{FileSystem, MountTable};

pub use self::{
    heap::{gc_threshold, tune as tune_heap, Heap},
    setup::{setup, BOOT_SCRIPT, BOOT_SCRIPT_CONTENT},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 已有的文件系统挂载成功
    Mounted,
    /// 首次启动，格式化后挂载
    Formatted,
    /// 闪存太小，没有块设备
    NoDevice,
    /// 挂载或首次启动的初始化失败；`/`可能已挂载，但启动脚本不一定写入
    Failed(vfs::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    pub outcome: Outcome,
    pub gc_threshold: usize,
}

/// 在用户区之后的闪存上建立根文件系统所用的块设备
pub fn flash_bdev<F>(flash: F, user_start: usize) -> Option<Arc<dyn BlockDevice>>
where
    F: NorFlash + Send + 'static,
{
    FlashBdev::probe(flash, user_start).map(|bdev| Arc::new(bdev) as Arc<dyn BlockDevice>)
}

/// Mounts the root filesystem, formatting it on first boot, then tunes the heap.
///
/// Errors are logged and folded into the report; booting always continues.
pub fn run<Fs: FileSystem>(
    dev: Option<&Arc<dyn BlockDevice>>,
    mounts: &mut MountTable,
    heap: &mut impl Heap,
) -> BootReport {
    let outcome = match dev {
        None => Outcome::NoDevice,
        Some(dev) => mount_root::<Fs>(dev, mounts),
    };

    BootReport {
        outcome,
        gc_threshold: heap::tune(heap),
    }
}

fn mount_root<Fs: FileSystem>(dev: &Arc<dyn BlockDevice>, mounts: &mut MountTable) -> Outcome {
    let result = match Fs::mount(dev) {
        Ok(volume) => mounts.mount("/", volume).map(|()| Outcome::Mounted),
        Err(e) => {
            log::info!("mount / failed: {e}");
            setup::<Fs>(dev, mounts).map(|()| Outcome::Formatted)
        }
    };
    result.unwrap_or_else(|e| {
        log::error!("no root filesystem: {e}");
        Outcome::Failed(e)
    })
}

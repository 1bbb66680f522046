//! 闪存块设备
//!
//! 片上闪存的用户区之后，按扇区划出一段作为文件系统所用的块设备。
//! 一个块即一个闪存扇区。

#![no_std]

extern crate alloc;

mod bdev;
mod layout;
mod ram;
mod sector;

pub use self::{
    bdev::FlashBdev,
    layout::{FlashLayout, MIN_FLASH_SIZE},
    ram::RamFlash,
    sector::{SectorId, SECTOR_SIZE},
};

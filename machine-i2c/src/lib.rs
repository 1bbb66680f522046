//! # 硬件 I2C 驱动
//!
//! 在 IOM 外设之上提供总线级的读写、扫描与加锁，
//! 并实现 [`embedded_hal::i2c::I2c`]，供上层的设备驱动使用。

#![no_std]

extern crate alloc;

mod config;
mod error;
pub mod hal;
mod i2c;
mod scan;

pub use self::{
    config::{default_pads, I2cConfig, DEFAULT_FREQ, DEFAULT_TIMEOUT_US, I2C_INTERFACES},
    error::{ConfigError, Error},
    i2c::{HwI2c, TransferFlag},
    scan::{scan_bus, SCAN_RANGE},
};

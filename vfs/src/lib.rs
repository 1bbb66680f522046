//! # 虚拟文件系统层
//!
//! 文件系统本身（目标板上为 littlefs v2）由外部实现，
//! 这里只约定格式化、挂载的接口，并维护挂载点表。

#![no_std]

extern crate alloc;

mod error;
mod fs;
mod mount;

pub use self::{
    error::Error,
    fs::{FileSystem, Volume},
    mount::MountTable,
};

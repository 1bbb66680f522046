//! # Qwiic 设备的 I2C 总线驱动
//!
//! 以命令码为单位读写字节、字（小端）与数据块。
//! 总线在第一次使用时才连接，连接失败会记录日志，之后的调用会再次尝试。

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use embedded_hal::i2c::I2c;
use machine_i2c::hal::Iom;
use machine_i2c::{scan_bus, HwI2c, I2cConfig};

pub const PLATFORM_NAME: &str = "MicroPython";

/// Apollo3/Artemis 与 ESP32 板卡
pub fn is_platform(sysname: &str) -> bool {
    matches!(sysname, "artemis" | "esp32")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// 无法连接到总线
    NotConnected,
    Bus(E),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Self::Bus(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => f.write_str("not connected to the I2C bus"),
            Self::Bus(e) => write!(f, "I2C bus error: {e:?}"),
        }
    }
}

/// 按需连接 0 号硬件总线
pub fn machine_bus<I, F>(mut make_iom: F) -> impl FnMut() -> Result<HwI2c<I>, machine_i2c::Error>
where
    I: Iom,
    F: FnMut() -> I,
{
    move || HwI2c::new(0, make_iom(), I2cConfig::default())
}

pub struct I2cDriver<B, C> {
    bus: Option<B>,
    connect: C,
}

impl<B, C> fmt::Debug for I2cDriver<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I2cDriver")
            .field("name", &PLATFORM_NAME)
            .field("connected", &self.bus.is_some())
            .finish()
    }
}

impl<B, C, CE> I2cDriver<B, C>
where
    B: I2c,
    C: FnMut() -> Result<B, CE>,
    CE: fmt::Display,
{
    pub fn new(connect: C) -> Self {
        Self { bus: None, connect }
    }

    pub fn is_connected(&self) -> bool {
        self.bus.is_some()
    }

    /// 取得总线，尚未连接时先连接
    pub fn bus(&mut self) -> Result<&mut B, Error<B::Error>> {
        if self.bus.is_none() {
            match (self.connect)() {
                Ok(bus) => self.bus = Some(bus),
                Err(e) => {
                    log::error!("Unable to connect to I2C bus. {e}");
                    return Err(Error::NotConnected);
                }
            }
        }
        self.bus.as_mut().ok_or(Error::NotConnected)
    }

    fn read_into(&mut self, address: u8, command: u8, buf: &mut [u8]) -> Result<(), Error<B::Error>> {
        self.bus()?.write_read(address, &[command], buf)?;
        Ok(())
    }

    /// 读一个小端字
    pub fn read_word(&mut self, address: u8, command: u8) -> Result<u16, Error<B::Error>> {
        let mut buf = [0u8; 2];
        self.read_into(address, command, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_byte(&mut self, address: u8, command: u8) -> Result<u8, Error<B::Error>> {
        let mut buf = [0u8; 1];
        self.read_into(address, command, &mut buf)?;
        Ok(buf[0])
    }

    pub fn read_block(
        &mut self,
        address: u8,
        command: u8,
        len: usize,
    ) -> Result<Vec<u8>, Error<B::Error>> {
        let mut buf = alloc::vec![0u8; len];
        self.read_into(address, command, &mut buf)?;
        Ok(buf)
    }

    pub fn write_command(&mut self, address: u8, command: u8) -> Result<(), Error<B::Error>> {
        self.bus()?.write(address, &[command])?;
        Ok(())
    }

    /// 先低字节后高字节
    pub fn write_word(
        &mut self,
        address: u8,
        command: u8,
        value: u16,
    ) -> Result<(), Error<B::Error>> {
        let [lo, hi] = value.to_le_bytes();
        self.bus()?.write(address, &[command, lo, hi])?;
        Ok(())
    }

    pub fn write_byte(&mut self, address: u8, command: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.bus()?.write(address, &[command, value])?;
        Ok(())
    }

    pub fn write_block(
        &mut self,
        address: u8,
        command: u8,
        data: &[u8],
    ) -> Result<(), Error<B::Error>> {
        let mut buf = Vec::with_capacity(data.len() + 1);
        buf.push(command);
        buf.extend_from_slice(data);
        self.bus()?.write(address, &buf)?;
        Ok(())
    }

    /// 返回有设备应答的地址；连不上总线时为空
    pub fn scan(&mut self) -> Vec<u8> {
        match self.bus() {
            Ok(bus) => scan_bus(bus),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests;

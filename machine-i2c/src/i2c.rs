use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::i2c::{self, Operation, SevenBitAddress};
use enumflags2::{bitflags, BitFlags};

use crate::config::{default_pads, I2cConfig, PORTS};
use crate::hal::{Buf, Iom, IomConfig, Pad, PinConfig, PowerState, Status, Transfer};
use crate::{scan_bus, ConfigError, Error};

#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFlag {
    /// 所有缓冲区都是接收方向
    Read = 0b01,
    /// 最后一个缓冲区之后发 STOP
    Stop = 0b10,
}

/// 一条硬件 I2C 总线
pub struct HwI2c<I> {
    iom: I,
    port: u8,
    scl: Pad,
    sda: Pad,
    freq: u32,
    initialized: bool,
    locked: AtomicBool,
}

impl<I: Iom> HwI2c<I> {
    pub fn new(id: usize, iom: I, config: I2cConfig) -> Result<Self, Error> {
        let (scl, sda) = default_pads(id).ok_or(Error::NoSuchBus(id))?;

        let mut i2c = Self {
            iom,
            port: PORTS[id],
            scl,
            sda,
            freq: config.freq,
            initialized: false,
            locked: AtomicBool::new(false),
        };
        i2c.init(config)?;
        Ok(i2c)
    }

    /// 按新配置重新初始化，未给出的焊盘保持不变
    pub fn init(&mut self, config: I2cConfig) -> Result<(), Error> {
        self.scl = config.scl.unwrap_or(self.scl);
        self.sda = config.sda.unwrap_or(self.sda);
        self.unlock();

        // Clear previous config if exists
        if self.initialized {
            self.iom.disable();
            self.iom.power(PowerState::DeepSleep);
            self.iom.uninitialize();
            self.initialized = false;
        }

        if !self.iom.initialize(self.port).is_success() {
            return Err(ConfigError::Port.into());
        }
        self.initialized = true;
        self.freq = config.freq;

        self.iom.power(PowerState::Wake);
        let iom_config = IomConfig {
            clock_freq: config.freq,
            timeout_us: config.timeout_us,
        };
        if !self.iom.configure(&iom_config).is_success() {
            return Err(ConfigError::Iom.into());
        }
        self.iom.enable();

        let pin_config = PinConfig::i2c(self.port);
        if !self.iom.configure_pin(self.scl, &pin_config).is_success() {
            return Err(ConfigError::Scl.into());
        }
        if !self.iom.configure_pin(self.sda, &pin_config).is_success() {
            return Err(ConfigError::Sda.into());
        }

        log::debug!("{self}");
        Ok(())
    }

    /// Runs one blocking IOM transfer per buffer and returns the bytes moved.
    ///
    /// Every buffer but the last keeps the bus (repeated start); the last one
    /// releases it only when `flags` carries [`TransferFlag::Stop`].
    pub fn transfer(
        &mut self,
        addr: u16,
        bufs: &mut [Buf<'_>],
        flags: BitFlags<TransferFlag>,
    ) -> Result<usize, Error> {
        let read = flags.contains(TransferFlag::Read);
        if bufs.iter().any(|buf| buf.is_rx() != read) {
            return Err(Error::Direction);
        }

        let count = bufs.len();
        let mut data_len = 0;
        for (i, buf) in bufs.iter_mut().enumerate() {
            let cont = i + 1 < count || !flags.contains(TransferFlag::Stop);
            let len = buf.len();
            let transfer = Transfer {
                addr,
                buf,
                cont,
                priority: 1,
            };
            match self.iom.blocking_transfer(transfer) {
                Status::Success => data_len += len,
                Status::Timeout => return Err(Error::TimedOut),
                _ => return Err(Error::Io),
            }
        }
        Ok(data_len)
    }

    pub fn readfrom_into(&mut self, addr: u16, buf: &mut [u8], stop: bool) -> Result<(), Error> {
        let flags = stop_flag(stop) | TransferFlag::Read;
        self.transfer(addr, &mut [Buf::Rx(buf)], flags).map(|_| ())
    }

    pub fn readfrom(&mut self, addr: u16, len: usize, stop: bool) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0; len];
        self.readfrom_into(addr, &mut buf, stop)?;
        Ok(buf)
    }

    /// 返回写出的字节数
    pub fn writeto(&mut self, addr: u16, buf: &[u8], stop: bool) -> Result<usize, Error> {
        self.transfer(addr, &mut [Buf::Tx(buf)], stop_flag(stop))
    }

    pub fn scan(&mut self) -> Vec<u8> {
        scan_bus(self)
    }

    /// 非阻塞地占用总线；已被占用时返回`false`
    pub fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    pub fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    pub fn port(&self) -> u8 {
        self.port
    }

    pub fn pads(&self) -> (Pad, Pad) {
        (self.scl, self.sda)
    }

    pub fn freq(&self) -> u32 {
        self.freq
    }

    pub fn iom(&self) -> &I {
        &self.iom
    }
}

fn stop_flag(stop: bool) -> BitFlags<TransferFlag> {
    if stop {
        TransferFlag::Stop.into()
    } else {
        BitFlags::empty()
    }
}

impl<I> fmt::Display for HwI2c<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "I2C({}, scl={}, sda={}, freq={})",
            self.port, self.scl, self.sda, self.freq
        )
    }
}

impl<I> fmt::Debug for HwI2c<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HwI2c")
            .field("port", &self.port)
            .field("scl", &self.scl)
            .field("sda", &self.sda)
            .field("freq", &self.freq)
            .field("locked", &self.locked)
            .finish()
    }
}

impl<I> i2c::ErrorType for HwI2c<I> {
    type Error = Error;
}

impl<I: Iom> i2c::I2c<SevenBitAddress> for HwI2c<I> {
    /// 相邻的同向操作合并成一次传输，中间不发重复起始；只有最后一组发 STOP
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        mut operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        while let Some(first) = operations.first() {
            let read = matches!(first, Operation::Read(_));
            let n = operations
                .iter()
                .take_while(|op| matches!(op, Operation::Read(_)) == read)
                .count();
            let (group, rest) = core::mem::take(&mut operations).split_at_mut(n);
            let stop = rest.is_empty();
            match group {
                [Operation::Read(buf)] => self.readfrom_into(address.into(), buf, stop)?,
                [Operation::Write(buf)] => {
                    self.writeto(address.into(), buf, stop)?;
                }
                _ if read => self.read_group(address.into(), group, stop)?,
                _ => self.write_group(address.into(), group, stop)?,
            }
            operations = rest;
        }
        Ok(())
    }
}

impl<I: Iom> HwI2c<I> {
    fn read_group(
        &mut self,
        addr: u16,
        group: &mut [Operation<'_>],
        stop: bool,
    ) -> Result<(), Error> {
        let len = group
            .iter()
            .map(|op| match op {
                Operation::Read(buf) => buf.len(),
                Operation::Write(_) => 0,
            })
            .sum();
        let data = self.readfrom(addr, len, stop)?;
        let mut data = &data[..];
        for op in group {
            if let Operation::Read(buf) = op {
                let (head, tail) = data.split_at(buf.len());
                buf.copy_from_slice(head);
                data = tail;
            }
        }
        Ok(())
    }

    fn write_group(&mut self, addr: u16, group: &[Operation<'_>], stop: bool) -> Result<(), Error> {
        let mut data = Vec::new();
        for op in group {
            if let Operation::Write(buf) = op {
                data.extend_from_slice(buf);
            }
        }
        self.writeto(addr, &data, stop).map(|_| ())
    }
}

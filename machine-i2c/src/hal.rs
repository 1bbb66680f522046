//! IO 主控（IOM）外设的硬件抽象
//!
//! 由厂商 HAL 实现；I2C 的电气时序全部在这一层之下完成。

use derive_more::{Display, From, Into};

/// 芯片焊盘编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From, Into)]
#[repr(transparent)]
pub struct Pad(u8);

impl Pad {
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }
}

/// HAL 调用的返回状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Fail,
    Timeout,
    InvalidHandle,
    InvalidArg,
    InvalidOperation,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    Wake,
    DeepSleep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pullup {
    None,
    R1K5,
    R6K,
    R12K,
    R24K,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveStrength {
    Ma2,
    Ma4,
    Ma8,
    Ma12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputConfig {
    Disable,
    PushPull,
    OpenDrain,
    Tristate,
}

/// 焊盘配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    pub func_sel: u8,
    pub pullup: Pullup,
    pub drive: DriveStrength,
    pub output: OutputConfig,
    /// 焊盘连接的 IOM 编号
    pub iom: u8,
}

impl PinConfig {
    /// I2C 焊盘：功能4，1.5K上拉，12mA 开漏
    pub const fn i2c(iom: u8) -> Self {
        Self {
            func_sel: 4,
            pullup: Pullup::R1K5,
            drive: DriveStrength::Ma12,
            output: OutputConfig::OpenDrain,
            iom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IomConfig {
    pub clock_freq: u32,
    pub timeout_us: u32,
}

/// 单个缓冲区的传输方向与数据
#[derive(Debug)]
pub enum Buf<'a> {
    Tx(&'a [u8]),
    Rx(&'a mut [u8]),
}

impl Buf<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Tx(buf) => buf.len(),
            Self::Rx(buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_rx(&self) -> bool {
        matches!(self, Self::Rx(_))
    }
}

/// 一次阻塞传输
#[derive(Debug)]
pub struct Transfer<'a, 'b> {
    pub addr: u16,
    pub buf: &'a mut Buf<'b>,
    /// 传输结束后不发 STOP，保持总线以便重复起始
    pub cont: bool,
    pub priority: u8,
}

/// IOM 外设驱动
pub trait Iom {
    /// 取得`port`号 IOM 的句柄
    fn initialize(&mut self, port: u8) -> Status;

    fn uninitialize(&mut self);

    fn power(&mut self, state: PowerState);

    fn configure(&mut self, config: &IomConfig) -> Status;

    fn enable(&mut self);

    fn disable(&mut self);

    fn configure_pin(&mut self, pad: Pad, config: &PinConfig) -> Status;

    fn blocking_transfer(&mut self, transfer: Transfer<'_, '_>) -> Status;
}

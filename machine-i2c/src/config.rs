use crate::hal::Pad;

/// 可用的 I2C 总线个数
pub const I2C_INTERFACES: usize = 2;

pub const DEFAULT_FREQ: u32 = 100_000;

/// 10ms
pub const DEFAULT_TIMEOUT_US: u32 = 10_000;

/// 各总线所用的 IOM 编号
pub(crate) const PORTS: [u8; I2C_INTERFACES] = [4, 3];

const DEFAULT_PADS: [(Pad, Pad); I2C_INTERFACES] = [
    (Pad::new(39), Pad::new(40)),
    (Pad::new(42), Pad::new(43)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cConfig {
    /// `None` keeps the pad the bus already uses, or its default.
    pub scl: Option<Pad>,
    pub sda: Option<Pad>,
    pub freq: u32,
    pub timeout_us: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            scl: None,
            sda: None,
            freq: DEFAULT_FREQ,
            timeout_us: DEFAULT_TIMEOUT_US,
        }
    }
}

impl I2cConfig {
    pub fn scl(mut self, pad: Pad) -> Self {
        self.scl = Some(pad);
        self
    }

    pub fn sda(mut self, pad: Pad) -> Self {
        self.sda = Some(pad);
        self
    }

    pub fn freq(mut self, freq: u32) -> Self {
        self.freq = freq;
        self
    }

    pub fn timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }
}

/// 总线`id`的默认`(SCL, SDA)`焊盘
pub fn default_pads(id: usize) -> Option<(Pad, Pad)> {
    DEFAULT_PADS.get(id).copied()
}

use alloc::vec::Vec;
use core::ops::Range;

use embedded_hal::i2c::I2c;

/// 7位地址中 0b0000xxx 与 0b1111xxx 为保留地址
pub const SCAN_RANGE: Range<u8> = 0x08..0x78;

/// 逐个地址读一个字节，返回有应答的地址
pub fn scan_bus<B: I2c>(bus: &mut B) -> Vec<u8> {
    let mut probe = [0u8; 1];
    SCAN_RANGE
        .filter(|&addr| bus.read(addr, &mut probe).is_ok())
        .collect()
}

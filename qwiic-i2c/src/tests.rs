use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use machine_i2c::hal::{IomConfig, Pad, PinConfig, PowerState, Status, Transfer};

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Write(Vec<u8>),
    Read(usize),
}

/// 记录每次事务并以固定数据应答的总线
#[derive(Debug, Default)]
struct RecordingBus {
    present: Vec<u8>,
    reply: Vec<u8>,
    transactions: Vec<(u8, Vec<Op>)>,
}

impl ErrorType for RecordingBus {
    type Error = ErrorKind;
}

impl I2c for RecordingBus {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if !self.present.contains(&address) {
            return Err(ErrorKind::Other);
        }
        let mut ops = Vec::new();
        for op in operations {
            match op {
                Operation::Write(data) => ops.push(Op::Write(data.to_vec())),
                Operation::Read(buf) => {
                    buf.copy_from_slice(&self.reply[..buf.len()]);
                    ops.push(Op::Read(buf.len()));
                }
            }
        }
        self.transactions.push((address, ops));
        Ok(())
    }
}

fn driver(
    reply: &[u8],
) -> I2cDriver<RecordingBus, impl FnMut() -> Result<RecordingBus, String>> {
    let reply = reply.to_vec();
    I2cDriver::new(move || {
        Ok(RecordingBus {
            present: vec![0x10, 0x52],
            reply: reply.clone(),
            ..Default::default()
        })
    })
}

fn transactions<C>(drv: &mut I2cDriver<RecordingBus, C>) -> Vec<(u8, Vec<Op>)>
where
    C: FnMut() -> Result<RecordingBus, String>,
{
    core::mem::take(&mut drv.bus().unwrap().transactions)
}

#[test]
fn platform() {
    assert!(is_platform("artemis"));
    assert!(is_platform("esp32"));
    assert!(!is_platform("linux"));
    assert_eq!("MicroPython", PLATFORM_NAME);
}

#[test]
fn lazy_connect() {
    let attempts = Cell::new(0);
    let mut drv = I2cDriver::new(|| {
        attempts.set(attempts.get() + 1);
        Ok::<_, String>(RecordingBus {
            present: vec![0x10],
            ..Default::default()
        })
    });
    assert!(!drv.is_connected());
    assert_eq!(0, attempts.get());

    drv.write_command(0x10, 0x01).unwrap();
    drv.write_command(0x10, 0x02).unwrap();
    assert!(drv.is_connected());
    assert_eq!(1, attempts.get());
}

#[test]
fn reads_use_repeated_start() {
    let mut drv = driver(&[0x34, 0x12, 0xFF]);
    assert_eq!(Ok(0x1234), drv.read_word(0x52, 0x0A));
    assert_eq!(Ok(0x34), drv.read_byte(0x52, 0x0B));
    assert_eq!(Ok(vec![0x34, 0x12, 0xFF]), drv.read_block(0x52, 0x0C, 3));

    assert_eq!(
        vec![
            (0x52, vec![Op::Write(vec![0x0A]), Op::Read(2)]),
            (0x52, vec![Op::Write(vec![0x0B]), Op::Read(1)]),
            (0x52, vec![Op::Write(vec![0x0C]), Op::Read(3)]),
        ],
        transactions(&mut drv)
    );
}

#[test]
fn writes_prefix_command() {
    let mut drv = driver(&[]);
    drv.write_command(0x10, 0x80).unwrap();
    drv.write_byte(0x10, 0x81, 0x7F).unwrap();
    drv.write_word(0x10, 0x82, 0xBEEF).unwrap();
    drv.write_block(0x10, 0x83, &[1, 2, 3]).unwrap();

    assert_eq!(
        vec![
            (0x10, vec![Op::Write(vec![0x80])]),
            (0x10, vec![Op::Write(vec![0x81, 0x7F])]),
            (0x10, vec![Op::Write(vec![0x82, 0xEF, 0xBE])]),
            (0x10, vec![Op::Write(vec![0x83, 1, 2, 3])]),
        ],
        transactions(&mut drv)
    );
}

#[test]
fn bus_errors_propagate() {
    let mut drv = driver(&[0, 0]);
    assert_eq!(Err(Error::Bus(ErrorKind::Other)), drv.read_word(0x33, 0));
}

#[test]
fn connect_failure() {
    let mut drv = I2cDriver::new(|| Err::<RecordingBus, _>("no board".to_string()));
    assert_eq!(Err(Error::NotConnected), drv.read_byte(0x10, 0));
    assert!(drv.scan().is_empty());
    assert!(!drv.is_connected());
}

#[test]
fn scan_reports_present_devices() {
    let mut drv = driver(&[0]);
    assert_eq!(vec![0x10, 0x52], drv.scan());
}

/// 所有地址都应答的 IOM
struct AckAll;

impl Iom for AckAll {
    fn initialize(&mut self, _: u8) -> Status {
        Status::Success
    }

    fn uninitialize(&mut self) {}

    fn power(&mut self, _: PowerState) {}

    fn configure(&mut self, _: &IomConfig) -> Status {
        Status::Success
    }

    fn enable(&mut self) {}

    fn disable(&mut self) {}

    fn configure_pin(&mut self, _: Pad, _: &PinConfig) -> Status {
        Status::Success
    }

    fn blocking_transfer(&mut self, _: Transfer<'_, '_>) -> Status {
        Status::Success
    }
}

#[test]
fn machine_bus_connects_port_zero() {
    let mut drv = I2cDriver::new(machine_bus(|| AckAll));
    assert_eq!(0x70, drv.scan().len());
    assert_eq!(
        "I2C(4, scl=39, sda=40, freq=100000)",
        drv.bus().unwrap().to_string()
    );
}

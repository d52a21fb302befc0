//! EVT2 board mapping
//!
//! Generated by `cargo xtask gen-board` from `evt2.toml`. Do not edit.

use bsp::{Addressing, BoardId, BoardMapping, BusType, PeripheralDescriptor, SignalDescriptor, SignalFlags};

use super::{bus, peripheral, signal};
use crate::{PeripheralId, SignalId};

const SIGNALS: [Option<SignalDescriptor>; 10] = [
    signal(0, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // amp_left_reset
    signal(1, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // amp_right_reset
    signal(2, SignalFlags::ACTIVE_LOW), // usb_reset_n
    signal(3, SignalFlags::ACTIVE_HIGH), // debug_uart_tx
    signal(4, SignalFlags::PULL_UP), // debug_uart_rx
    signal(5, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // button_n
    signal(6, SignalFlags::PULL_DOWN), // power_enable
    signal(16, SignalFlags::PULL_UP), // i2c0_sda
    signal(17, SignalFlags::PULL_UP), // i2c0_scl
    signal(22, SignalFlags::ACTIVE_LOW), // motor_driver_cs
];

const PERIPHERALS: [Option<PeripheralDescriptor<SignalId>>; 3] = [
    peripheral(bus(BusType::I2c, 1), Addressing::I2c { address: 0x45 }), // audio_amp_left
    peripheral(bus(BusType::I2c, 1), Addressing::I2c { address: 0x46 }), // audio_amp_right
    peripheral(bus(BusType::Spi, 0), Addressing::Spi { chip_select: SignalId::MotorDriverCs }), // motor_driver
];

/// EVT2 (board id 2)
pub static EVT2: BoardMapping<'static, SignalId, PeripheralId> =
    BoardMapping::new(BoardId::new(2), "evt2", &SIGNALS, &PERIPHERALS);

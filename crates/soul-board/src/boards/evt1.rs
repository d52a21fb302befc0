//! EVT1 engineering validation board
//!
//! Adds the haptic motor driver on SPI0 and routes I²C0 through the board
//! table. The debug UART header was depopulated on this run.

use bsp::{BoardId, BoardMapping, BusHandle, PeripheralDescriptor, SignalDescriptor, SignalFlags};

use super::{i2c, signal, spi};
use crate::{PeripheralId, SignalId};

const SIGNALS: [Option<SignalDescriptor>; 10] = [
    signal(0, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // amp_left_reset
    signal(1, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // amp_right_reset
    signal(2, SignalFlags::ACTIVE_LOW),                             // usb_reset_n
    None,                                                           // debug_uart_tx
    None,                                                           // debug_uart_rx
    signal(5, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // button_n
    signal(6, SignalFlags::PULL_DOWN),                              // power_enable
    signal(14, SignalFlags::PULL_UP),                               // i2c0_sda
    signal(15, SignalFlags::PULL_UP),                               // i2c0_scl
    signal(22, SignalFlags::ACTIVE_LOW),                            // motor_driver_cs
];

const PERIPHERALS: [Option<PeripheralDescriptor<SignalId>>; 3] = [
    i2c(BusHandle::I2C0, 0x45),                  // audio_amp_left
    i2c(BusHandle::I2C2, 0x20),                  // audio_amp_right
    spi(BusHandle::SPI0, SignalId::MotorDriverCs), // motor_driver
];

/// EVT1 (board id 1)
///
/// - Amplifiers: as DEV0
/// - Motor driver: SPI0, chip-select on pin 22
/// - Debug UART: not fitted
pub static EVT1: BoardMapping<'static, SignalId, PeripheralId> =
    BoardMapping::new(BoardId::new(1), "evt1", &SIGNALS, &PERIPHERALS);

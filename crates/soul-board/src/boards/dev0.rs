//! DEV0 development board
//!
//! First bring-up board. Both audio amplifiers, no haptics. Signals past
//! `PowerEnable` did not exist yet, so the signal table stops there.

use bsp::{BoardId, BoardMapping, BusHandle, PeripheralDescriptor, SignalDescriptor, SignalFlags};

use super::{i2c, signal};
use crate::{PeripheralId, SignalId};

const SIGNALS: [Option<SignalDescriptor>; 7] = [
    signal(0, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // amp_left_reset
    signal(1, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // amp_right_reset
    signal(2, SignalFlags::ACTIVE_LOW),                             // usb_reset_n
    signal(3, SignalFlags::ACTIVE_HIGH),                            // debug_uart_tx
    signal(4, SignalFlags::PULL_UP),                                // debug_uart_rx
    signal(5, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)), // button_n
    signal(6, SignalFlags::PULL_DOWN),                              // power_enable
];

const PERIPHERALS: [Option<PeripheralDescriptor<SignalId>>; 2] = [
    i2c(BusHandle::I2C0, 0x45), // audio_amp_left
    i2c(BusHandle::I2C2, 0x20), // audio_amp_right
];

/// DEV0 (board id 0)
///
/// - Left amplifier: I²C0 @ 0x45
/// - Right amplifier: I²C2 @ 0x20
/// - Amplifier resets: pins 0/1, active low, pulled up
pub static DEV0: BoardMapping<'static, SignalId, PeripheralId> =
    BoardMapping::new(BoardId::new(0), "dev0", &SIGNALS, &PERIPHERALS);

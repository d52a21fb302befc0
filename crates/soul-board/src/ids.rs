//! Logical signal and peripheral ids
//!
//! Ids are stable across every board revision of the product. New ids are
//! appended; existing ids are never renumbered, since each id's discriminant
//! is its row in every board table.

use bsp::LogicalId;

/// Named hardware lines drivers ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SignalId {
    /// Left audio amplifier reset.
    AmpLeftReset = 0,
    /// Right audio amplifier reset.
    AmpRightReset = 1,
    /// USB PHY reset, active low.
    UsbResetN = 2,
    /// Debug UART transmit.
    DebugUartTx = 3,
    /// Debug UART receive.
    DebugUartRx = 4,
    /// User button, active low.
    ButtonN = 5,
    /// Main power rail enable.
    PowerEnable = 6,
    /// I²C0 data line.
    I2c0Sda = 7,
    /// I²C0 clock line.
    I2c0Scl = 8,
    /// Motor driver SPI chip-select.
    MotorDriverCs = 9,
}

impl LogicalId for SignalId {
    const COUNT: usize = 10;

    const ALL: &'static [Self] = &[
        SignalId::AmpLeftReset,
        SignalId::AmpRightReset,
        SignalId::UsbResetN,
        SignalId::DebugUartTx,
        SignalId::DebugUartRx,
        SignalId::ButtonN,
        SignalId::PowerEnable,
        SignalId::I2c0Sda,
        SignalId::I2c0Scl,
        SignalId::MotorDriverCs,
    ];

    fn index(self) -> usize {
        usize::from(self as u8)
    }

    fn name(self) -> &'static str {
        match self {
            SignalId::AmpLeftReset => "amp_left_reset",
            SignalId::AmpRightReset => "amp_right_reset",
            SignalId::UsbResetN => "usb_reset_n",
            SignalId::DebugUartTx => "debug_uart_tx",
            SignalId::DebugUartRx => "debug_uart_rx",
            SignalId::ButtonN => "button_n",
            SignalId::PowerEnable => "power_enable",
            SignalId::I2c0Sda => "i2c0_sda",
            SignalId::I2c0Scl => "i2c0_scl",
            SignalId::MotorDriverCs => "motor_driver_cs",
        }
    }
}

/// Bus-attached devices drivers ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PeripheralId {
    /// Left-channel audio amplifier.
    AudioAmpLeft = 0,
    /// Right-channel audio amplifier.
    AudioAmpRight = 1,
    /// Haptic motor driver.
    MotorDriver = 2,
}

impl LogicalId for PeripheralId {
    const COUNT: usize = 3;

    const ALL: &'static [Self] = &[
        PeripheralId::AudioAmpLeft,
        PeripheralId::AudioAmpRight,
        PeripheralId::MotorDriver,
    ];

    fn index(self) -> usize {
        usize::from(self as u8)
    }

    fn name(self) -> &'static str {
        match self {
            PeripheralId::AudioAmpLeft => "audio_amp_left",
            PeripheralId::AudioAmpRight => "audio_amp_right",
            PeripheralId::MotorDriver => "motor_driver",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_dense<T: LogicalId + core::fmt::Debug>() {
        assert_eq!(T::ALL.len(), T::COUNT);
        for (i, id) in T::ALL.iter().enumerate() {
            assert_eq!(id.index(), i, "{id:?} out of order");
            assert_eq!(T::from_index(i), Some(*id));
            assert_eq!(T::from_name(id.name()), Some(*id));
        }
        assert_eq!(T::from_index(T::COUNT), None);
    }

    #[test]
    fn signal_ids_are_dense_and_named() {
        check_dense::<SignalId>();
    }

    #[test]
    fn peripheral_ids_are_dense_and_named() {
        check_dense::<PeripheralId>();
    }

    #[test]
    fn reference_ids_keep_their_rows() {
        assert_eq!(SignalId::AmpLeftReset.index(), 0);
        assert_eq!(PeripheralId::AudioAmpLeft.index(), 0);
        assert_eq!(PeripheralId::AudioAmpRight.index(), 1);
    }
}

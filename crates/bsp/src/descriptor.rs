//! Descriptor types
//!
//! Value types describing what a logical id resolves to on a board revision:
//! a [`SignalDescriptor`] (pin + electrical flags) or a
//! [`PeripheralDescriptor`] (bus handle + bus-specific addressing).
//!
//! Descriptors carry no behaviour beyond field access. Interpreting them
//! (configuring a pin, opening a bus) is the consuming driver's job.

use core::fmt;

use crate::bus::{BusHandle, BusType};

// ── PinId ────────────────────────────────────────────────────────────────────

/// Physical pin identifier, as understood by the chip's GPIO driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PinId(u32);

impl PinId {
    /// Wrap a raw pin number.
    pub const fn new(pin: u32) -> Self {
        Self(pin)
    }

    /// Raw pin number.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for PinId {
    fn from(pin: u32) -> Self {
        Self(pin)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin {}", self.0)
    }
}

// ── SignalFlags ──────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Electrical flags of a signal.
    ///
    /// | Bit | Meaning                  |
    /// |-----|--------------------------|
    /// | 0   | active-low (clear = active-high) |
    /// | 4   | pull-up                  |
    /// | 5   | pull-down                |
    ///
    /// Bits 1–3 and 6+ are reserved: they must be zero and are never
    /// interpreted. [`SignalFlags::from_bits`] rejects them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SignalFlags: u32 {
        /// Asserted when the line is driven low.
        const ACTIVE_LOW = 1 << 0;
        /// Internal or external pull-up.
        const PULL_UP = 1 << 4;
        /// Internal or external pull-down.
        const PULL_DOWN = 1 << 5;
    }
}

impl SignalFlags {
    /// Asserted when the line is driven high (no polarity bit).
    pub const ACTIVE_HIGH: Self = Self::empty();

    /// Bits that must be zero.
    pub const RESERVED_MASK: u32 = !Self::all().bits();
}

#[cfg(feature = "defmt")]
impl defmt::Format for SignalFlags {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "SignalFlags({=u32:#b})", self.bits());
    }
}

/// Signal polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Asserted high.
    ActiveHigh,
    /// Asserted low.
    ActiveLow,
}

/// Signal bias resistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bias {
    /// Floating.
    None,
    /// Pulled up.
    PullUp,
    /// Pulled down.
    PullDown,
}

/// Errors from constructing a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorError {
    /// Pull-up and pull-down requested together.
    #[error("pull-up and pull-down are mutually exclusive")]
    BiasConflict,
    /// Raw flag word sets reserved bits.
    #[error("reserved signal flag bits set: {0:#x}")]
    ReservedFlags(u32),
    /// Addressing payload belongs to a different bus type than the handle.
    #[error("{payload} addressing on a {bus} bus")]
    BusMismatch {
        /// Bus type of the handle.
        bus: BusType,
        /// Bus type the payload was tagged with.
        payload: BusType,
    },
}

// ── SignalDescriptor ─────────────────────────────────────────────────────────

/// Pin and electrical flags a signal resolves to.
///
/// Direction and pin-mux function are deliberately absent: the consumer
/// knows whether it drives or samples the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalDescriptor {
    pin: PinId,
    flags: SignalFlags,
}

impl SignalDescriptor {
    /// Build a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::ReservedFlags`] if `flags` carries reserved
    /// bits (possible through [`SignalFlags::from_bits_retain`]), or
    /// [`DescriptorError::BiasConflict`] if both pull bits are set.
    pub const fn new(pin: PinId, flags: SignalFlags) -> Result<Self, DescriptorError> {
        let reserved = flags.bits() & SignalFlags::RESERVED_MASK;
        if reserved != 0 {
            return Err(DescriptorError::ReservedFlags(reserved));
        }
        if flags.contains(SignalFlags::PULL_UP.union(SignalFlags::PULL_DOWN)) {
            return Err(DescriptorError::BiasConflict);
        }
        Ok(Self { pin, flags })
    }

    /// Build a descriptor from a raw pin number and raw flag word.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::ReservedFlags`] if reserved bits are set,
    /// or [`DescriptorError::BiasConflict`] if both pull bits are set.
    pub const fn from_raw(pin: u32, flags: u32) -> Result<Self, DescriptorError> {
        Self::new(PinId::new(pin), SignalFlags::from_bits_retain(flags))
    }

    /// Physical pin.
    pub const fn pin(&self) -> PinId {
        self.pin
    }

    /// Electrical flags.
    pub const fn flags(&self) -> SignalFlags {
        self.flags
    }

    /// `true` if the signal is asserted low.
    pub const fn is_active_low(&self) -> bool {
        self.flags.contains(SignalFlags::ACTIVE_LOW)
    }

    /// Signal polarity.
    pub const fn polarity(&self) -> Polarity {
        if self.is_active_low() {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }

    /// Bias resistor.
    pub const fn bias(&self) -> Bias {
        if self.flags.contains(SignalFlags::PULL_UP) {
            Bias::PullUp
        } else if self.flags.contains(SignalFlags::PULL_DOWN) {
            Bias::PullDown
        } else {
            Bias::None
        }
    }
}

// ── PeripheralDescriptor ─────────────────────────────────────────────────────

/// Bus-specific addressing of a peripheral, tagged by bus type.
///
/// `S` is the product's signal id type: an SPI device names its chip-select
/// line as a signal, resolved through the same board mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Addressing<S> {
    /// Device address on an I²C bus.
    I2c {
        /// 7-bit device address.
        address: u8,
    },
    /// Static address on an I³C bus.
    I3c {
        /// Static device address.
        address: u8,
    },
    /// Device selected by a chip-select line on an SPI bus.
    Spi {
        /// Chip-select signal.
        chip_select: S,
    },
    /// Sole device on a 1-Wire bus (ROM id discovered at runtime).
    OneWire,
    /// Device behind a USB controller (enumerated at runtime).
    Usb,
}

impl<S> Addressing<S> {
    /// Bus type this payload belongs to.
    pub const fn bus_type(&self) -> BusType {
        match self {
            Self::I2c { .. } => BusType::I2c,
            Self::I3c { .. } => BusType::I3c,
            Self::Spi { .. } => BusType::Spi,
            Self::OneWire => BusType::OneWire,
            Self::Usb => BusType::Usb,
        }
    }
}

/// Bus handle and addressing a peripheral resolves to.
///
/// The addressing tag always matches the handle's bus type: the only
/// constructor checks it. Bus-specific fields are read either by matching on
/// [`PeripheralDescriptor::addressing`] or through the `Option`-returning
/// readers, which yield `None` for a different bus type.
///
/// ```
/// use bsp::bus::BusHandle;
/// use bsp::descriptor::{Addressing, PeripheralDescriptor};
///
/// let amp = PeripheralDescriptor::<u8>::new(BusHandle::I2C0, Addressing::I2c { address: 0x45 }).unwrap();
/// assert_eq!(amp.i2c_address(), Some(0x45));
/// assert_eq!(amp.chip_select(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeripheralDescriptor<S> {
    bus: BusHandle,
    addressing: Addressing<S>,
}

impl<S: Copy> PeripheralDescriptor<S> {
    /// Build a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::BusMismatch`] if the payload is tagged with a
    /// different bus type than `bus`.
    pub const fn new(bus: BusHandle, addressing: Addressing<S>) -> Result<Self, DescriptorError> {
        let payload = addressing.bus_type();
        if !bus.bus_type().same_as(payload) {
            return Err(DescriptorError::BusMismatch {
                bus: bus.bus_type(),
                payload,
            });
        }
        Ok(Self { bus, addressing })
    }

    /// Bus handle.
    pub const fn bus(&self) -> BusHandle {
        self.bus
    }

    /// Bus type (shorthand for `bus().bus_type()`).
    pub const fn bus_type(&self) -> BusType {
        self.bus.bus_type()
    }

    /// Addressing payload.
    pub const fn addressing(&self) -> Addressing<S> {
        self.addressing
    }

    /// I²C device address, or `None` if this is not an I²C peripheral.
    pub const fn i2c_address(&self) -> Option<u8> {
        match self.addressing {
            Addressing::I2c { address } => Some(address),
            _ => None,
        }
    }

    /// I³C static address, or `None` if this is not an I³C peripheral.
    pub const fn i3c_address(&self) -> Option<u8> {
        match self.addressing {
            Addressing::I3c { address } => Some(address),
            _ => None,
        }
    }

    /// SPI chip-select signal, or `None` if this is not an SPI peripheral.
    pub const fn chip_select(&self) -> Option<S> {
        match self.addressing {
            Addressing::Spi { chip_select } => Some(chip_select),
            _ => None,
        }
    }
}

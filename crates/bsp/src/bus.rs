//! Bus identifier codec
//!
//! A [`BusHandle`] packs a [`BusType`] and a per-type controller index into a
//! single byte, so descriptors and driver APIs pass one value instead of a
//! `(type, index)` pair:
//!
//! ```text
//!  7       4 3       0
//! +---------+---------+
//! |  type   |  index  |
//! +---------+---------+
//! ```
//!
//! The index field is [`BusHandle::INDEX_BITS`] wide. [`BusHandle::new`]
//! rejects anything above [`BusHandle::MAX_INDEX`] instead of wrapping, and
//! every handle in existence came through a validating constructor, so
//! [`BusHandle::decode`] is total.

use core::fmt;

/// Bus families available on the chip. Fixed for the chip family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusType {
    /// I²C controller
    I2c = 0,
    /// I³C controller
    I3c = 1,
    /// SPI controller
    Spi = 2,
    /// 1-Wire master
    OneWire = 3,
    /// USB controller
    Usb = 4,
}

impl BusType {
    /// Every bus type, in encoding order.
    pub const ALL: [BusType; 5] = [
        BusType::I2c,
        BusType::I3c,
        BusType::Spi,
        BusType::OneWire,
        BusType::Usb,
    ];

    /// Decode the type nibble of a packed handle.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::I2c),
            1 => Some(Self::I3c),
            2 => Some(Self::Spi),
            3 => Some(Self::OneWire),
            4 => Some(Self::Usb),
            _ => None,
        }
    }

    /// Raw type nibble.
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Lower-case name, as used in board description files (`"i2c"`, `"spi"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::I2c => "i2c",
            Self::I3c => "i3c",
            Self::Spi => "spi",
            Self::OneWire => "onewire",
            Self::Usb => "usb",
        }
    }

    /// Parse a lower-case bus type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Compile-time equality (`PartialEq` is not usable in `const fn`).
    pub(crate) const fn same_as(self, other: Self) -> bool {
        self as u8 == other as u8
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from encoding or parsing a bus handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Controller index does not fit in the index field.
    #[error("bus index {index} exceeds maximum {max}")]
    IndexOutOfRange {
        /// Rejected index.
        index: u8,
        /// Largest encodable index.
        max: u8,
    },
    /// Type nibble of a raw handle names no known bus type.
    #[error("unknown bus type {0:#x} in raw handle")]
    UnknownType(u8),
}

/// Packed `(BusType, index)` pair.
///
/// ```
/// use bsp::bus::{BusHandle, BusType};
///
/// let bus = BusHandle::new(BusType::I2c, 2).unwrap();
/// assert_eq!(bus.raw(), 0x02);
/// assert_eq!(bus.decode(), (BusType::I2c, 2));
/// assert!(BusHandle::new(BusType::Spi, 16).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct BusHandle(u8);

// Shifts are by the constant INDEX_BITS, always < 8.
#[allow(clippy::arithmetic_side_effects)]
impl BusHandle {
    /// Width of the index field in bits.
    pub const INDEX_BITS: u32 = 4;
    /// Mask selecting the index field.
    pub const INDEX_MASK: u8 = 0x0F;
    /// Largest encodable controller index.
    pub const MAX_INDEX: u8 = Self::INDEX_MASK;

    /// I²C controller 0.
    pub const I2C0: Self = Self::pack(BusType::I2c, 0);
    /// I²C controller 1.
    pub const I2C1: Self = Self::pack(BusType::I2c, 1);
    /// I²C controller 2.
    pub const I2C2: Self = Self::pack(BusType::I2c, 2);
    /// SPI controller 0.
    pub const SPI0: Self = Self::pack(BusType::Spi, 0);

    /// Encode a bus type and controller index.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::IndexOutOfRange`] if `index > MAX_INDEX`.
    pub const fn new(bus_type: BusType, index: u8) -> Result<Self, BusError> {
        if index > Self::MAX_INDEX {
            return Err(BusError::IndexOutOfRange {
                index,
                max: Self::MAX_INDEX,
            });
        }
        Ok(Self::pack(bus_type, index))
    }

    /// Accept a raw packed byte (generated tables, diagnostics).
    ///
    /// # Errors
    ///
    /// Returns [`BusError::UnknownType`] if the type nibble is not a [`BusType`].
    pub const fn from_raw(raw: u8) -> Result<Self, BusError> {
        let nibble = raw >> Self::INDEX_BITS;
        match BusType::from_raw(nibble) {
            Some(_) => Ok(Self(raw)),
            None => Err(BusError::UnknownType(nibble)),
        }
    }

    // Callers guarantee `index <= MAX_INDEX`; the mask keeps the type nibble intact regardless.
    const fn pack(bus_type: BusType, index: u8) -> Self {
        Self((bus_type.raw() << Self::INDEX_BITS) | (index & Self::INDEX_MASK))
    }

    /// Split into `(type, index)`. Exact inverse of [`BusHandle::new`].
    pub const fn decode(self) -> (BusType, u8) {
        (self.bus_type(), self.index())
    }

    /// Bus type.
    pub const fn bus_type(self) -> BusType {
        // Constructors only admit type nibbles 0..=4.
        match self.0 >> Self::INDEX_BITS {
            0 => BusType::I2c,
            1 => BusType::I3c,
            2 => BusType::Spi,
            3 => BusType::OneWire,
            _ => BusType::Usb,
        }
    }

    /// Controller index within the bus type.
    pub const fn index(self) -> u8 {
        self.0 & Self::INDEX_MASK
    }

    /// Packed byte.
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for BusHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.bus_type(), self.index())
    }
}

impl TryFrom<u8> for BusHandle {
    type Error = BusError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<BusHandle> for u8 {
    fn from(handle: BusHandle) -> Self {
        handle.raw()
    }
}

/// Encode a bus handle. Free-function form of [`BusHandle::new`].
///
/// # Errors
///
/// Returns [`BusError::IndexOutOfRange`] if `index` does not fit the index field.
pub const fn encode_bus(bus_type: BusType, index: u8) -> Result<BusHandle, BusError> {
    BusHandle::new(bus_type, index)
}

/// Decode a bus handle. Free-function form of [`BusHandle::decode`].
pub const fn decode_bus(handle: BusHandle) -> (BusType, u8) {
    handle.decode()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_every_type_and_index() {
        for bus_type in BusType::ALL {
            for index in 0..=BusHandle::MAX_INDEX {
                let handle = encode_bus(bus_type, index).unwrap();
                assert_eq!(decode_bus(handle), (bus_type, index));
            }
        }
    }

    #[test]
    fn max_index_encodes() {
        let handle = BusHandle::new(BusType::Usb, 15).unwrap();
        assert_eq!(handle.index(), 15);
        assert_eq!(handle.bus_type(), BusType::Usb);
    }

    #[test]
    fn one_past_max_index_is_rejected() {
        assert_eq!(
            BusHandle::new(BusType::I2c, 16),
            Err(BusError::IndexOutOfRange { index: 16, max: 15 })
        );
        assert!(BusHandle::new(BusType::Spi, u8::MAX).is_err());
    }

    #[test]
    fn index_width_constants_agree() {
        assert_eq!(u32::from(BusHandle::INDEX_MASK).count_ones(), BusHandle::INDEX_BITS);
        assert_eq!(BusHandle::MAX_INDEX, 15);
    }

    #[test]
    fn encoding_matches_reference_layout() {
        // (type << 4) | index
        assert_eq!(BusHandle::I2C0.raw(), 0x00);
        assert_eq!(BusHandle::I2C2.raw(), 0x02);
        assert_eq!(BusHandle::SPI0.raw(), 0x20);
        assert_eq!(BusHandle::new(BusType::Usb, 3).unwrap().raw(), 0x43);
    }

    #[test]
    fn from_raw_rejects_unknown_type_nibble() {
        assert_eq!(BusHandle::from_raw(0x50), Err(BusError::UnknownType(5)));
        assert_eq!(BusHandle::from_raw(0xF3), Err(BusError::UnknownType(0xF)));
        assert_eq!(BusHandle::from_raw(0x21), Ok(BusHandle::new(BusType::Spi, 1).unwrap()));
    }

    #[test]
    fn display_is_type_and_index() {
        assert_eq!(BusHandle::I2C2.to_string(), "i2c2");
        assert_eq!(BusHandle::new(BusType::OneWire, 0).unwrap().to_string(), "onewire0");
    }

    #[test]
    fn bus_type_names_parse_back() {
        for bus_type in BusType::ALL {
            assert_eq!(BusType::from_name(bus_type.name()), Some(bus_type));
        }
        assert_eq!(BusType::from_name("can"), None);
    }
}

//! Board revision tables
//!
//! One module per revision. Each exposes a `static` [`BoardMapping`] built
//! entirely in `const` context with the helpers below: a malformed literal
//! (bias conflict, bus index out of range, payload on the wrong bus) fails the
//! build instead of reaching the registry.
//!
//! The helpers are private to this crate, so nothing calls them at runtime:
//!
//! ```compile_fail
//! let _ = soul_board::boards::bus(bsp::BusType::I2c, 16);
//! ```
//!
//! [`BoardMapping`]: bsp::BoardMapping

// Helpers are called from `const` initialisers, where a panic is a build error.
#![allow(clippy::panic)]

use bsp::{Addressing, BusHandle, BusType, PeripheralDescriptor, PinId, SignalDescriptor, SignalFlags};

use crate::SignalId;

pub mod dev0;
pub mod evt1;
// Output of `cargo xtask gen-board`; formatting belongs to the generator.
#[rustfmt::skip]
pub mod evt2;

pub use dev0::DEV0;
pub use evt1::EVT1;
pub use evt2::EVT2;

/// Bus handle for controller `index` of `bus_type`.
pub(crate) const fn bus(bus_type: BusType, index: u8) -> BusHandle {
    match BusHandle::new(bus_type, index) {
        Ok(handle) => handle,
        Err(_) => panic!("bus index out of range"),
    }
}

/// Mapped signal row.
pub(crate) const fn signal(pin: u32, flags: SignalFlags) -> Option<SignalDescriptor> {
    match SignalDescriptor::new(PinId::new(pin), flags) {
        Ok(descriptor) => Some(descriptor),
        Err(_) => panic!("pull-up and pull-down on one signal"),
    }
}

/// Mapped peripheral row.
pub(crate) const fn peripheral(
    bus: BusHandle,
    addressing: Addressing<SignalId>,
) -> Option<PeripheralDescriptor<SignalId>> {
    match PeripheralDescriptor::new(bus, addressing) {
        Ok(descriptor) => Some(descriptor),
        Err(_) => panic!("addressing does not match the bus type"),
    }
}

/// Mapped I²C peripheral row.
pub(crate) const fn i2c(bus: BusHandle, address: u8) -> Option<PeripheralDescriptor<SignalId>> {
    peripheral(bus, Addressing::I2c { address })
}

/// Mapped SPI peripheral row.
pub(crate) const fn spi(bus: BusHandle, chip_select: SignalId) -> Option<PeripheralDescriptor<SignalId>> {
    peripheral(bus, Addressing::Spi { chip_select })
}

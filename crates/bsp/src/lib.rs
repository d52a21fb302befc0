//! Board support indirection layer
//!
//! Drivers name hardware by *logical* id (a signal such as "left amplifier
//! reset", a peripheral such as "left audio amplifier") and ask this crate what
//! that id resolves to on the board they are running on. Every board revision
//! contributes one [`BoardMapping`]; the registry selects exactly one at
//! initialisation from the detected [`BoardId`], and the accessor API answers
//! lookups from it.
//!
//! ```text
//! drivers ── get_signal(id) / get_peripheral(id) ──► BoardAccess
//!                                                       │
//!                          Registry / GlobalRegistry ◄──┘
//!                                   │ select(catalog, board id)
//!                                   ▼
//!               Catalog [ BoardMapping rev A, BoardMapping rev B, ... ]
//! ```
//!
//! The crate is generic over the product's id enumerations ([`LogicalId`]);
//! a product crate defines its signals, peripherals and board tables and
//! reuses everything here unchanged.
//!
//! # Modules
//!
//! - [`bus`] - packed `(bus type, controller index)` handle and its codec
//! - [`descriptor`] - signal and peripheral descriptors
//! - [`mapping`] - per-revision tables and the board catalog
//! - [`registry`] - selection of the active mapping
//! - [`accessor`] - bounds-checked lookups
//! - [`global`] - `static` write-once registry
//!
//! # Features
//!
//! - `defmt`: `defmt::Format` on every public type, log through `defmt`
//! - `tracing`: log through `tracing` (host builds)

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
mod fmt;

pub mod accessor;
pub mod bus;
pub mod descriptor;
pub mod global;
pub mod id;
pub mod mapping;
pub mod registry;

#[cfg(test)]
mod testing;

pub use accessor::{BoardAccess, LookupError};
pub use bus::{decode_bus, encode_bus, BusError, BusHandle, BusType};
pub use descriptor::{
    Addressing, Bias, DescriptorError, PeripheralDescriptor, PinId, Polarity, SignalDescriptor,
    SignalFlags,
};
pub use global::GlobalRegistry;
pub use id::{BoardId, LogicalId};
pub use mapping::{BoardMapping, Catalog, MappingError};
pub use registry::{BoardIdentity, DetectError, Registry, SelectError};

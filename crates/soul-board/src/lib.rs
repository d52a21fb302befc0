//! Soul product family board support
//!
//! Logical ids, every board revision's mapping and the process-wide registry
//! for the Soul hardware family. Drivers depend on this crate and name
//! hardware only by [`SignalId`] / [`PeripheralId`]:
//!
//! ```
//! use soul_board::{BoardAccess, PeripheralId, SignalId, SoulRegistry, boards::DEV0};
//!
//! let registry = SoulRegistry::with_mapping(&DEV0);
//! let amp = registry.get_peripheral(PeripheralId::AudioAmpLeft).unwrap();
//! assert_eq!(amp.i2c_address(), Some(0x45));
//!
//! let reset = registry.get_signal(SignalId::AmpLeftReset).unwrap();
//! assert!(reset.is_active_low());
//! ```
//!
//! Firmware selects the running board once at start-up:
//!
//! ```ignore
//! soul_board::BSP.select_detected(&mut straps, &soul_board::CATALOG)?;
//! ```
//!
//! Board revisions:
//!
//! | Board | Id | Notes |
//! |-------|----|-------|
//! | [`DEV0`](boards::DEV0) | 0 | bring-up board, amplifiers only |
//! | [`EVT1`](boards::EVT1) | 1 | adds haptics on SPI0, no debug UART |
//! | [`EVT2`](boards::EVT2) | 2 | amplifiers moved to I²C1; generated from `boards/evt2.toml` |

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boards;
mod ids;

pub use bsp::{BoardAccess, BoardId, LookupError, SelectError};
pub use ids::{PeripheralId, SignalId};

/// A Soul board revision's mapping.
pub type SoulMapping = bsp::BoardMapping<'static, SignalId, PeripheralId>;

/// Injectable registry over Soul ids (tests, single-board builds).
pub type SoulRegistry = bsp::Registry<'static, SignalId, PeripheralId>;

static BOARDS: [&SoulMapping; 3] = [&boards::DEV0, &boards::EVT1, &boards::EVT2];

/// Every Soul board revision the firmware supports.
pub static CATALOG: bsp::Catalog<'static, SignalId, PeripheralId> = bsp::Catalog::new(&BOARDS);

/// Process-wide registry. Select once at start-up, then look up from anywhere.
pub static BSP: bsp::GlobalRegistry<SignalId, PeripheralId> = bsp::GlobalRegistry::new();

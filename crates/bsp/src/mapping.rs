//! Board mapping tables
//!
//! A [`BoardMapping`] is one board revision's wiring: a signal table and a
//! peripheral table, each indexed by [`LogicalId::index`]. Each table's length
//! is its declared size for the revision and may be shorter than the id
//! enumeration. Rows inside the table that the revision leaves unwired hold
//! `None`, the explicit unmapped marker.
//!
//! Mappings are plain data built in `const` context:
//!
//! ```
//! use bsp::{BoardId, BoardMapping, PinId, SignalDescriptor, SignalFlags};
//! # use bsp::LogicalId;
//! # #[derive(Clone, Copy, PartialEq, Eq, Debug)] enum Sig { Reset }
//! # impl LogicalId for Sig {
//! #     const COUNT: usize = 1;
//! #     const ALL: &'static [Self] = &[Sig::Reset];
//! #     fn index(self) -> usize { 0 }
//! #     fn name(self) -> &'static str { "reset" }
//! # }
//! # #[derive(Clone, Copy, PartialEq, Eq, Debug)] enum Dev {}
//! # impl LogicalId for Dev {
//! #     const COUNT: usize = 0;
//! #     const ALL: &'static [Self] = &[];
//! #     fn index(self) -> usize { match self {} }
//! #     fn name(self) -> &'static str { match self {} }
//! # }
//! const RESET: Option<SignalDescriptor> = match SignalDescriptor::new(PinId::new(4), SignalFlags::ACTIVE_LOW) {
//!     Ok(d) => Some(d),
//!     Err(_) => panic!("bad descriptor"),
//! };
//! const SIGNALS: [Option<SignalDescriptor>; 1] = [RESET];
//! static REV_A: BoardMapping<'static, Sig, Dev> = BoardMapping::new(BoardId::new(1), "rev-a", &SIGNALS, &[]);
//!
//! assert_eq!(REV_A.signal(Sig::Reset).map(|d| d.pin().get()), Some(4));
//! ```

use core::marker::PhantomData;

use crate::descriptor::{PeripheralDescriptor, SignalDescriptor};
use crate::id::{BoardId, LogicalId};

/// Integrity violations in a mapping or catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MappingError {
    /// Signal table declares more rows than there are signal ids.
    #[error("signal table declares {declared} rows, only {max} signal ids exist")]
    SignalTableTooLong {
        /// Declared rows.
        declared: usize,
        /// Number of signal ids.
        max: usize,
    },
    /// Peripheral table declares more rows than there are peripheral ids.
    #[error("peripheral table declares {declared} rows, only {max} peripheral ids exist")]
    PeripheralTableTooLong {
        /// Declared rows.
        declared: usize,
        /// Number of peripheral ids.
        max: usize,
    },
    /// An SPI peripheral's chip-select names a signal this mapping leaves unwired.
    #[error("chip-select {signal} of {peripheral} is not mapped on this board")]
    UnmappedChipSelect {
        /// Peripheral name.
        peripheral: &'static str,
        /// Chip-select signal name.
        signal: &'static str,
    },
    /// Two catalog entries claim the same board id.
    #[error("board id {0} appears more than once in the catalog")]
    DuplicateBoard(BoardId),
}

/// One board revision's signal and peripheral tables.
#[derive(Debug, Clone, Copy)]
pub struct BoardMapping<'a, S, P> {
    board: BoardId,
    name: &'static str,
    signals: &'a [Option<SignalDescriptor>],
    peripherals: &'a [Option<PeripheralDescriptor<S>>],
    _peripheral_ids: PhantomData<fn() -> P>,
}

impl<'a, S, P> BoardMapping<'a, S, P> {
    /// Build a mapping. The table lengths are the declared sizes.
    pub const fn new(
        board: BoardId,
        name: &'static str,
        signals: &'a [Option<SignalDescriptor>],
        peripherals: &'a [Option<PeripheralDescriptor<S>>],
    ) -> Self {
        Self {
            board,
            name,
            signals,
            peripherals,
            _peripheral_ids: PhantomData,
        }
    }

    /// Board revision this mapping describes.
    pub const fn board(&self) -> BoardId {
        self.board
    }

    /// Short revision name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Declared size of the signal table.
    pub const fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Declared size of the peripheral table.
    pub const fn peripheral_count(&self) -> usize {
        self.peripherals.len()
    }

    /// Signal descriptor in row `index`; `None` past the declared size or for an unmapped row.
    pub fn signal_at(&self, index: usize) -> Option<SignalDescriptor> {
        self.signals.get(index).copied().flatten()
    }
}

impl<S: Copy, P> BoardMapping<'_, S, P> {
    /// Peripheral descriptor in row `index`; `None` past the declared size or for an unmapped row.
    pub fn peripheral_at(&self, index: usize) -> Option<PeripheralDescriptor<S>> {
        self.peripherals.get(index).copied().flatten()
    }
}

impl<S: LogicalId, P: LogicalId> BoardMapping<'_, S, P> {
    /// Signal descriptor for `id`, if this revision wires it.
    pub fn signal(&self, id: S) -> Option<SignalDescriptor> {
        self.signal_at(id.index())
    }

    /// Peripheral descriptor for `id`, if this revision fits it.
    pub fn peripheral(&self, id: P) -> Option<PeripheralDescriptor<S>> {
        self.peripheral_at(id.index())
    }

    /// Every wired signal with its descriptor, in id order.
    pub fn mapped_signals(&self) -> impl Iterator<Item = (S, SignalDescriptor)> + '_ {
        self.signals
            .iter()
            .enumerate()
            .filter_map(|(index, row)| Some((S::from_index(index)?, (*row)?)))
    }

    /// Every fitted peripheral with its descriptor, in id order.
    pub fn mapped_peripherals(&self) -> impl Iterator<Item = (P, PeripheralDescriptor<S>)> + '_ {
        self.peripherals
            .iter()
            .enumerate()
            .filter_map(|(index, row)| Some((P::from_index(index)?, (*row)?)))
    }

    /// Check the mapping's internal consistency.
    ///
    /// Several signals sharing one pin is allowed: jumpered boards do that.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: a table longer than its id
    /// enumeration, or an SPI chip-select naming a signal this mapping
    /// leaves unwired.
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.signal_count() > S::COUNT {
            return Err(MappingError::SignalTableTooLong {
                declared: self.signal_count(),
                max: S::COUNT,
            });
        }
        if self.peripheral_count() > P::COUNT {
            return Err(MappingError::PeripheralTableTooLong {
                declared: self.peripheral_count(),
                max: P::COUNT,
            });
        }
        for (peripheral, descriptor) in self.mapped_peripherals() {
            if let Some(cs) = descriptor.chip_select() {
                if self.signal(cs).is_none() {
                    return Err(MappingError::UnmappedChipSelect {
                        peripheral: peripheral.name(),
                        signal: cs.name(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The set of board revisions a firmware image knows about.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a, S, P> {
    boards: &'a [&'a BoardMapping<'a, S, P>],
}

impl<'a, S, P> Catalog<'a, S, P> {
    /// Wrap a list of revisions.
    pub const fn new(boards: &'a [&'a BoardMapping<'a, S, P>]) -> Self {
        Self { boards }
    }

    /// Mapping for `board`, if the catalog has one.
    pub fn find(&self, board: BoardId) -> Option<&'a BoardMapping<'a, S, P>> {
        self.boards.iter().copied().find(|m| m.board() == board)
    }

    /// Every revision, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'a BoardMapping<'a, S, P>> + '_ {
        self.boards.iter().copied()
    }

    /// Number of revisions.
    pub const fn len(&self) -> usize {
        self.boards.len()
    }

    /// `true` if the catalog lists no revisions.
    pub const fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl<S: LogicalId, P: LogicalId> Catalog<'_, S, P> {
    /// Validate every revision and check board ids are unique.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`] found.
    pub fn validate(&self) -> Result<(), MappingError> {
        for (position, mapping) in self.boards.iter().enumerate() {
            mapping.validate()?;
            let mut earlier = self.boards.iter().take(position);
            if earlier.any(|m| m.board() == mapping.board()) {
                return Err(MappingError::DuplicateBoard(mapping.board()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::bus::BusHandle;
    use crate::descriptor::{PinId, SignalFlags};
    use crate::testing::{sig, spi, Dev, Sig, EMPTY, REV_A, REV_B};

    #[test]
    fn declared_rows_resolve_to_their_literal_descriptor() {
        let reset = REV_A.signal(Sig::Reset).unwrap();
        assert_eq!(reset.pin(), PinId::new(0));
        assert_eq!(reset.flags(), SignalFlags::ACTIVE_LOW | SignalFlags::PULL_UP);
        let amp = REV_A.peripheral(Dev::Amp).unwrap();
        assert_eq!(amp.bus(), BusHandle::I2C0);
        assert_eq!(amp.i2c_address(), Some(0x45));
    }

    #[test]
    fn unmapped_row_is_absent() {
        assert_eq!(REV_A.signal(Sig::Enable), None);
    }

    #[test]
    fn rows_past_declared_size_are_absent() {
        // REV_B declares only the first signal row.
        assert_eq!(REV_B.signal_count(), 1);
        assert_eq!(REV_B.signal(Sig::ChipSelect), None);
        assert_eq!(REV_B.signal_at(Sig::COUNT), None);
        assert_eq!(REV_B.signal_at(usize::MAX), None);
    }

    #[test]
    fn zero_valued_descriptor_is_distinct_from_absent() {
        // Pin 0 with no flags is a legitimate descriptor.
        let zero = REV_B.signal(Sig::Reset).unwrap();
        assert_eq!(zero.pin().get(), 0);
        assert_eq!(zero.flags().bits(), 0);
    }

    #[test]
    fn mapped_iterators_skip_unmapped_rows() {
        let signals: Vec<_> = REV_A.mapped_signals().map(|(id, _)| id).collect();
        assert_eq!(signals, [Sig::Reset, Sig::ChipSelect]);
        let peripherals: Vec<_> = REV_A.mapped_peripherals().map(|(id, _)| id).collect();
        assert_eq!(peripherals, [Dev::Amp, Dev::Flash]);
    }

    #[test]
    fn shipped_fixtures_validate() {
        assert_eq!(REV_A.validate(), Ok(()));
        assert_eq!(REV_B.validate(), Ok(()));
        assert_eq!(EMPTY.validate(), Ok(()));
    }

    #[test]
    fn unmapped_chip_select_is_rejected() {
        const SIGNALS: [Option<SignalDescriptor>; 1] = [sig(0, SignalFlags::ACTIVE_HIGH)];
        const PERIPHERALS: [Option<PeripheralDescriptor<Sig>>; 2] =
            [None, spi(BusHandle::SPI0, Sig::ChipSelect)];
        let broken: BoardMapping<'_, Sig, Dev> =
            BoardMapping::new(BoardId::new(9), "broken", &SIGNALS, &PERIPHERALS);
        assert_eq!(
            broken.validate(),
            Err(MappingError::UnmappedChipSelect {
                peripheral: "flash",
                signal: "chip_select",
            })
        );
    }

    #[test]
    fn oversized_table_is_rejected() {
        let signals = [None; 4];
        let oversized: BoardMapping<'_, Sig, Dev> =
            BoardMapping::new(BoardId::new(9), "oversized", &signals, &[]);
        assert_eq!(
            oversized.validate(),
            Err(MappingError::SignalTableTooLong { declared: 4, max: 3 })
        );
    }

    #[test]
    fn catalog_finds_by_board_id() {
        let boards = [&REV_A, &REV_B];
        let catalog = Catalog::new(&boards);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find(REV_B.board()).map(BoardMapping::name), Some("rev-b"));
        assert!(catalog.find(BoardId::new(99)).is_none());
        assert_eq!(catalog.validate(), Ok(()));
    }

    #[test]
    fn catalog_rejects_duplicate_board_ids() {
        let boards = [&REV_A, &REV_B, &REV_A];
        assert_eq!(
            Catalog::new(&boards).validate(),
            Err(MappingError::DuplicateBoard(REV_A.board()))
        );
    }
}

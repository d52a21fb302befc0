//! Logical identifiers
//!
//! The core is generic over a product's signal and peripheral enumerations.
//! A product implements [`LogicalId`] for both; the index of an id is its
//! row in every board revision's mapping table.

use core::fmt;

/// A closed enumeration of logical ids with a dense `0..COUNT` index.
///
/// Implementations must keep `ALL[i].index() == i` for every `i`, and
/// `ALL.len() == COUNT`. Ids are stable across board revisions, so new ids
/// are only ever appended.
pub trait LogicalId: Copy + Eq + 'static {
    /// Number of ids in the enumeration.
    const COUNT: usize;

    /// Every id, in index order.
    const ALL: &'static [Self];

    /// Row of this id in a mapping table.
    fn index(self) -> usize;

    /// Lower-case name used in logs and board description files.
    fn name(self) -> &'static str;

    /// Id at `index`, if any.
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Id named `name`, if any.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }
}

/// Identity of a board revision, as reported by the board-identity detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct BoardId(u16);

impl BoardId {
    /// Wrap a raw board id.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Raw board id.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for BoardId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "board#{}", self.0)
    }
}

//! Accessor API
//!
//! Drivers resolve logical ids through [`BoardAccess`] and never see which
//! board revision they run on. Every lookup is a pure read of the active
//! mapping and returns an owned copy of the descriptor.

use crate::descriptor::{PeripheralDescriptor, SignalDescriptor};
use crate::id::LogicalId;
use crate::mapping::BoardMapping;

/// Lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LookupError {
    /// Id is beyond the active revision's declared table size, or unmapped there.
    #[error("id is not mapped on the active board")]
    NotFound,
    /// No board mapping has been selected yet.
    #[error("no board mapping selected")]
    Unconfigured,
}

/// Read access to the active board mapping.
///
/// Implementors only provide [`BoardAccess::active_mapping`]; the lookups are
/// shared. Repeated calls with the same id return equal values.
pub trait BoardAccess {
    /// Product's signal ids.
    type Signal: LogicalId;
    /// Product's peripheral ids.
    type Peripheral: LogicalId;

    /// The selected mapping.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Unconfigured`] before selection.
    fn active_mapping(&self) -> Result<&BoardMapping<'_, Self::Signal, Self::Peripheral>, LookupError>;

    /// Resolve a signal id.
    ///
    /// # Errors
    ///
    /// [`LookupError::Unconfigured`] before selection, [`LookupError::NotFound`]
    /// if the active revision does not wire `id`.
    fn get_signal(&self, id: Self::Signal) -> Result<SignalDescriptor, LookupError> {
        self.get_signal_at(id.index())
    }

    /// Resolve a signal by raw table index.
    ///
    /// Indices at or past `Self::Signal::COUNT` are reported as
    /// [`LookupError::NotFound`], like any other row the revision leaves out.
    ///
    /// # Errors
    ///
    /// As [`BoardAccess::get_signal`].
    fn get_signal_at(&self, index: usize) -> Result<SignalDescriptor, LookupError> {
        let mapping = self.active_mapping()?;
        if index >= Self::Signal::COUNT {
            return Err(LookupError::NotFound);
        }
        mapping.signal_at(index).ok_or(LookupError::NotFound)
    }

    /// Resolve a peripheral id.
    ///
    /// # Errors
    ///
    /// [`LookupError::Unconfigured`] before selection, [`LookupError::NotFound`]
    /// if the active revision does not fit `id`.
    fn get_peripheral(
        &self,
        id: Self::Peripheral,
    ) -> Result<PeripheralDescriptor<Self::Signal>, LookupError> {
        self.get_peripheral_at(id.index())
    }

    /// Resolve a peripheral by raw table index.
    ///
    /// Indices at or past `Self::Peripheral::COUNT` are reported as
    /// [`LookupError::NotFound`].
    ///
    /// # Errors
    ///
    /// As [`BoardAccess::get_peripheral`].
    fn get_peripheral_at(
        &self,
        index: usize,
    ) -> Result<PeripheralDescriptor<Self::Signal>, LookupError> {
        let mapping = self.active_mapping()?;
        if index >= Self::Peripheral::COUNT {
            return Err(LookupError::NotFound);
        }
        mapping.peripheral_at(index).ok_or(LookupError::NotFound)
    }
}

//! Mapping registry
//!
//! Holds the one board mapping selected for the running board. Selection
//! happens once, at initialisation, from the board id reported by the
//! board-identity detector; there is no re-selection and no fallback board.

use crate::accessor::{BoardAccess, LookupError};
use crate::id::{BoardId, LogicalId};
use crate::mapping::{BoardMapping, Catalog, MappingError};

/// Selection failures. Fatal at initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectError {
    /// Catalog has no mapping for the detected board.
    #[error("no mapping for {0}")]
    UnknownBoard(BoardId),
    /// A mapping is already active.
    #[error("{active} already selected")]
    AlreadySelected {
        /// Board id of the active mapping.
        active: BoardId,
    },
    /// The catalog's mapping for the board failed validation.
    #[error("invalid mapping: {0}")]
    InvalidMapping(#[from] MappingError),
}

/// Board-identity detector (strap resistors, EEPROM, OTP fuses...).
pub trait BoardIdentity {
    /// Detector failure.
    type Error;

    /// Read the identity of the running board.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn read_board_id(&mut self) -> Result<BoardId, Self::Error>;
}

/// Failure of [`Registry::select_detected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DetectError<E> {
    /// The detector could not report a board id.
    #[error("board identity could not be read")]
    Detection(E),
    /// A board id was read but could not be selected.
    #[error(transparent)]
    Select(#[from] SelectError),
}

/// Look `board` up in `catalog` and validate it.
pub(crate) fn resolve<'a, S: LogicalId, P: LogicalId>(
    catalog: &Catalog<'a, S, P>,
    board: BoardId,
) -> Result<&'a BoardMapping<'a, S, P>, SelectError> {
    let mapping = catalog.find(board).ok_or(SelectError::UnknownBoard(board))?;
    mapping.validate()?;
    Ok(mapping)
}

/// Explicit, injectable registry.
///
/// ```
/// # use bsp::{BoardAccess, LookupError, Registry, BoardMapping, LogicalId};
/// # #[derive(Clone, Copy, PartialEq, Eq, Debug)] enum Sig { Reset }
/// # impl LogicalId for Sig {
/// #     const COUNT: usize = 1;
/// #     const ALL: &'static [Self] = &[Sig::Reset];
/// #     fn index(self) -> usize { 0 }
/// #     fn name(self) -> &'static str { "reset" }
/// # }
/// let registry: Registry<'_, Sig, Sig> = Registry::new();
/// assert_eq!(registry.get_signal(Sig::Reset), Err(LookupError::Unconfigured));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a, S, P> {
    active: Option<&'a BoardMapping<'a, S, P>>,
}

impl<'a, S, P> Registry<'a, S, P> {
    /// Unconfigured registry.
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Registry with `mapping` already active, bypassing the catalog.
    ///
    /// `mapping` is not validated. Rows past the id range stay unreachable:
    /// lookups at or past `COUNT` report [`LookupError::NotFound`].
    pub const fn with_mapping(mapping: &'a BoardMapping<'a, S, P>) -> Self {
        Self {
            active: Some(mapping),
        }
    }

    /// `true` once a mapping is active.
    pub const fn is_configured(&self) -> bool {
        self.active.is_some()
    }
}

impl<S, P> Default for Registry<'_, S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: LogicalId, P: LogicalId> Registry<'a, S, P> {
    /// Select the catalog's mapping for `board`.
    ///
    /// # Errors
    ///
    /// [`SelectError::AlreadySelected`] if a mapping is active,
    /// [`SelectError::UnknownBoard`] if the catalog lacks `board`, and
    /// [`SelectError::InvalidMapping`] if its mapping fails validation.
    pub fn select(
        &mut self,
        catalog: &Catalog<'a, S, P>,
        board: BoardId,
    ) -> Result<&'a BoardMapping<'a, S, P>, SelectError> {
        if let Some(active) = self.active {
            let err = SelectError::AlreadySelected {
                active: active.board(),
            };
            warn!("board selection rejected: {}", err);
            return Err(err);
        }
        let mapping = resolve(catalog, board).inspect_err(|err| {
            warn!("board selection rejected: {}", err);
        })?;
        info!("selected {} ({})", mapping.board(), mapping.name());
        self.active = Some(mapping);
        Ok(mapping)
    }

    /// Read the board id from `detector` and select its mapping.
    ///
    /// # Errors
    ///
    /// [`DetectError::Detection`] if the detector fails, otherwise as
    /// [`Registry::select`].
    pub fn select_detected<D: BoardIdentity>(
        &mut self,
        detector: &mut D,
        catalog: &Catalog<'a, S, P>,
    ) -> Result<&'a BoardMapping<'a, S, P>, DetectError<D::Error>> {
        let board = detector.read_board_id().map_err(DetectError::Detection)?;
        Ok(self.select(catalog, board)?)
    }
}

impl<S: LogicalId, P: LogicalId> BoardAccess for Registry<'_, S, P> {
    type Signal = S;
    type Peripheral = P;

    fn active_mapping(&self) -> Result<&BoardMapping<'_, S, P>, LookupError> {
        self.active.ok_or(LookupError::Unconfigured)
    }
}
